#[derive(clap::Parser, Debug)]
#[command(about = "Runs the annotated sample programs")]
pub struct Args {
    /// Program paths to run. Defaults to every program matched by `--pattern`.
    pub programs: Option<Vec<String>>,

    /// Glob pattern used to discover programs.
    #[arg(long, default_value = "tests/programs/**/*.lambda")]
    pub pattern: String,

    /// Stop checking a program after its first failed directive.
    #[arg(short = 'x', long)]
    pub fail_fast: bool,

    /// Print diagnostics of every program, not only of the failing ones.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse() -> Self {
        clap::Parser::parse()
    }
}
