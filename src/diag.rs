use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label as CsLabel};
use codespan_reporting::term::{self, Config};
use termcolor::{ColorChoice, StandardStream};

use crate::location::Span;
use crate::sourcemap::{SourceId, SourceMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn code(&self) -> &'static str {
        self.0
    }
}

macro_rules! code {
    ($category:ident :: $name:ident) => {
        $crate::diag::Code::new(concat!(stringify!($category), "::", stringify!($name)))
    };
}

pub(crate) use code;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub span: Span,
    pub msg: Option<String>,
}

impl Label {
    pub fn primary(span: Span) -> Self {
        Self { span, msg: None }
    }

    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());

        self
    }
}

/// A renderer-agnostic error report.
///
/// Every diagnostic produced by this crate is fatal, so there is no severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Option<Span>,
    pub msg: String,
    pub code: Code,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error() -> DiagnosticBuilder {
        DiagnosticBuilder::default()
    }

    pub fn to_codespan(&self, source_id: SourceId) -> CsDiagnostic<SourceId> {
        let labels = self
            .labels
            .iter()
            .map(|label| {
                let cs_label = CsLabel::primary(source_id, label.span);

                match &label.msg {
                    Some(msg) => cs_label.with_message(msg),
                    None => cs_label,
                }
            })
            .collect();

        CsDiagnostic::error()
            .with_message(&self.msg)
            .with_code(self.code.code())
            .with_labels(labels)
            .with_notes(self.notes.clone())
    }
}

#[derive(Debug, Default)]
pub struct DiagnosticBuilder {
    span: Option<Span>,
    msg: Option<String>,
    code: Option<Code>,
    labels: Vec<Label>,
    notes: Vec<String>,
}

impl DiagnosticBuilder {
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);

        self
    }

    pub fn with_msg(mut self, msg: impl ToString) -> Self {
        self.msg = Some(msg.to_string());

        self
    }

    pub fn with_code(mut self, code: Code) -> Self {
        self.code = Some(code);

        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);

        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());

        self
    }

    pub fn make(self) -> Diagnostic {
        Diagnostic {
            span: self.span,
            msg: self.msg.expect("the diagnostic must have a message"),
            code: self.code.expect("the diagnostic must have a code"),
            labels: self.labels,
            notes: self.notes,
        }
    }
}

pub trait IntoDiagnostic {
    fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
    fn into_diagnostic(self) -> Diagnostic {
        self
    }
}

pub trait DiagCtx {
    fn emit(&mut self, diag: impl IntoDiagnostic);
}

pub fn print_to_stderr(
    diag: &Diagnostic,
    source_map: &SourceMap,
    source_id: SourceId,
    color: ColorChoice,
) {
    let writer = StandardStream::stderr(color);
    let config = Config::default();

    if let Err(e) = term::emit(
        &mut writer.lock(),
        &config,
        source_map.to_files(),
        &diag.to_codespan(source_id),
    ) {
        tracing::error!("could not render a diagnostic: {e}");
    }
}

pub struct StderrDiagCtx<'src> {
    source_map: &'src SourceMap,
    source_id: SourceId,
    color: ColorChoice,
}

impl<'src> StderrDiagCtx<'src> {
    pub fn new(source_map: &'src SourceMap, source_id: SourceId, color: ColorChoice) -> Self {
        Self {
            source_map,
            source_id,
            color,
        }
    }
}

impl DiagCtx for StderrDiagCtx<'_> {
    fn emit(&mut self, diag: impl IntoDiagnostic) {
        print_to_stderr(
            &diag.into_diagnostic(),
            self.source_map,
            self.source_id,
            self.color,
        );
    }
}
