mod cli;
mod directive;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use fxhash::FxHashSet;
use glob::glob;
use lambda_syntax::diag::{DiagCtx, Diagnostic, IntoDiagnostic, print_to_stderr};
use lambda_syntax::parse::parse_str;
use lambda_syntax::sourcemap::SourceMap;
use lambda_syntax::util::format_iter;
use termcolor::ColorChoice;
use yansi::Paint;

use self::cli::Args;
use self::directive::{Directive, parse_directives};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Passed,
    Failed,
}

#[derive(Default)]
struct CollectingDiagCtx {
    diags: Vec<Diagnostic>,
}

impl DiagCtx for CollectingDiagCtx {
    fn emit(&mut self, diag: impl IntoDiagnostic) {
        self.diags.push(diag.into_diagnostic());
    }
}

struct Program {
    path: String,
    contents: String,
    directives: Vec<Directive>,
}

struct RunData {
    diags: Vec<Diagnostic>,
    failed: bool,
}

impl Program {
    fn run(&self, ctx: &RunCtx) -> Outcome {
        let mut source_map = SourceMap::new();
        let file_id = source_map
            .add_source(self.path.clone(), self.contents.clone())
            .id();
        let mut diag = CollectingDiagCtx::default();

        let failed = match parse_str(source_map.get_by_id(file_id).contents()) {
            Ok(_) => false,

            Err(e) => {
                diag.emit(e);

                true
            }
        };

        let run_data = RunData {
            diags: diag.diags,
            failed,
        };

        let mut outcome = Outcome::Passed;

        for directive in &self.directives {
            if directive.check(&run_data) == Outcome::Failed {
                outcome = Outcome::Failed;

                if ctx.fail_fast {
                    break;
                }
            }
        }

        if outcome == Outcome::Failed || ctx.verbose {
            if run_data.diags.is_empty() {
                eprintln!("No diagnostics reported");
            } else {
                eprintln!("Reported diagnostics:");

                for diag in &run_data.diags {
                    print_to_stderr(diag, &source_map, file_id, ColorChoice::Auto);
                }
            }
        }

        outcome
    }
}

struct RunCtx {
    fail_fast: bool,
    verbose: bool,
    programs: Vec<Program>,
    skipped: FxHashSet<String>,
}

impl RunCtx {
    fn new(args: &Args, programs: Vec<Program>) -> Result<Self, String> {
        let mut skipped = FxHashSet::default();

        if let Some(selected) = &args.programs {
            let mut selected = selected.iter().collect::<FxHashSet<_>>();

            for program in &programs {
                if !selected.remove(&program.path) {
                    skipped.insert(program.path.clone());
                }
            }

            if !selected.is_empty() {
                return Err(format!(
                    "unknown programs: {}",
                    format_iter(selected.iter().map(|path| format!("`{path}`")), "and", ""),
                ));
            }
        }

        Ok(Self {
            fail_fast: args.fail_fast,
            verbose: args.verbose,
            programs,
            skipped,
        })
    }

    fn run(self) -> ExitCode {
        let mut passed = 0usize;
        let mut failed = vec![];

        for program in &self.programs {
            if self.skipped.contains(&program.path) {
                continue;
            }

            eprintln!("{} `{}`...", "Parsing".bright_cyan().bold(), program.path);

            match program.run(&self) {
                Outcome::Passed => passed += 1,

                Outcome::Failed => {
                    eprintln!("{}", format_args!("Program `{}` failed!", program.path).bright_red());
                    failed.push(program.path.as_str());
                }
            }
        }

        eprintln!();
        eprintln!(
            "Result: {}. {} passed, {} failed, {} skipped",
            if failed.is_empty() {
                "ok".bright_green().bold()
            } else {
                "FAILED".bright_red().bold()
            },
            passed.bright_green(),
            failed.len().bright_red(),
            self.skipped.len().white(),
        );

        if failed.is_empty() {
            ExitCode::SUCCESS
        } else {
            eprintln!("Failed: {}", format_iter(&failed, "and", "none"));

            ExitCode::FAILURE
        }
    }
}

fn load_program(path: impl AsRef<Path>) -> Result<Program, String> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("could not read `{}`: {e}", path.display()))?;
    let directives = parse_directives(&contents)
        .map_err(|e| format!("could not parse directives in `{}`: {e}", path.display()))?;

    Ok(Program {
        path: path.display().to_string(),
        contents,
        directives,
    })
}

fn load_programs(pattern: &str) -> Result<Vec<Program>, String> {
    let paths = glob(pattern).map_err(|e| format!("invalid pattern `{pattern}`: {e}"))?;
    let mut programs = vec![];

    for entry in paths {
        let path = entry.map_err(|e| e.to_string())?;
        programs.push(load_program(path)?);
    }

    if programs.is_empty() {
        return Err(format!("no programs match `{pattern}`"));
    }

    Ok(programs)
}

fn main() -> ExitCode {
    fn load_ctx() -> Result<RunCtx, String> {
        let args = Args::parse();
        let programs = load_programs(&args.pattern)?;

        RunCtx::new(&args, programs)
    }

    let ctx = match load_ctx() {
        Ok(ctx) => ctx,

        Err(e) => {
            eprintln!("{}: {e}", "Error".bright_red().bold());

            return ExitCode::from(2);
        }
    };

    ctx.run()
}
