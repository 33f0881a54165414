use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::{Regex, RegexSet};

use crate::{Outcome, RunData};

/// An expectation embedded in a program as a `#!` comment.
pub enum Directive {
    Error(ErrorDirective),
    Pass,
}

impl Directive {
    pub fn check(&self, run_data: &RunData) -> Outcome {
        match self {
            Self::Error(d) => d.check(run_data),

            Self::Pass if run_data.failed => {
                eprintln!("The program failed to parse!");

                Outcome::Failed
            }

            Self::Pass => Outcome::Passed,
        }
    }
}

pub struct ErrorDirective {
    line: usize,
    target_line: usize,
    target_offsets: RangeInclusive<usize>,
    code: String,
}

static ERROR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^ERROR\((?<code>[[:word:]]+::[[:word:]]+)\)$"#).unwrap()
});

static PASS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^PASS$"#).unwrap());

static DIRECTIVE_REGEX: LazyLock<RegexSet> =
    LazyLock::new(|| RegexSet::new([ERROR_REGEX.as_str(), PASS_REGEX.as_str()]).unwrap());

impl ErrorDirective {
    fn parse(directive: &str, line: usize, target: (usize, RangeInclusive<usize>)) -> Self {
        let captures = ERROR_REGEX.captures(directive).unwrap();
        let (target_line, target_offsets) = target;

        Self {
            line,
            target_line,
            target_offsets,
            code: captures["code"].to_owned(),
        }
    }

    fn check(&self, run_data: &RunData) -> Outcome {
        let found = run_data.diags.iter().any(|diag| {
            diag.code.code() == self.code
                && diag
                    .span
                    .is_some_and(|span| self.target_offsets.contains(&span.start))
        });

        if found {
            Outcome::Passed
        } else {
            eprintln!(
                "Could not find a `{}` error on line {} (directive at line {})",
                self.code, self.target_line, self.line,
            );

            Outcome::Failed
        }
    }
}

/// Splits the source into lines, returning each line's offsets including its end.
fn split_lines(s: &str) -> Vec<(RangeInclusive<usize>, &str)> {
    let mut start = 0;

    s.split('\n')
        .map(|line| {
            let range = start..=start + line.len();
            start += line.len() + 1;

            (range, line)
        })
        .collect()
}

/// Collects directives.
///
/// `#! D` targets the following line, `#!< D` its own line and `#!^ D` the preceding one.
pub fn parse_directives(s: &str) -> Result<Vec<Directive>, String> {
    let lines = split_lines(s);
    let mut directives = vec![];

    for (idx, (_, line)) in lines.iter().enumerate() {
        let Some((_, directive)) = line.split_once("#!") else {
            continue;
        };

        let (directive, target_idx) = if let Some(d) = directive.strip_prefix('<') {
            (d, idx)
        } else if let Some(d) = directive.strip_prefix('^') {
            (d, idx.saturating_sub(1))
        } else {
            (directive, idx + 1)
        };

        let directive = directive.trim();
        let matches = DIRECTIVE_REGEX.matches(directive);

        if !matches.matched_any() {
            return Err(format!("unrecognized directive at line {}", idx + 1));
        }

        let target_offsets = lines
            .get(target_idx)
            .map(|(r, _)| r.clone())
            .unwrap_or(s.len()..=s.len());

        let directive = if matches.matched(0) {
            Directive::Error(ErrorDirective::parse(
                directive,
                idx + 1,
                (target_idx + 1, target_offsets),
            ))
        } else {
            Directive::Pass
        };

        directives.push(directive);
    }

    if directives.is_empty() {
        return Err("no directives found".into());
    }

    Ok(directives)
}
