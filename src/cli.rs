use clap::ValueEnum;
use termcolor::ColorChoice;

#[derive(clap::Parser, Debug)]
#[command(about = "Parses a program and prints its syntax tree")]
pub struct Args {
    /// Path to the source file, or `-` to read from stdin.
    pub input: Option<String>,

    /// Print the token stream instead of the syntax tree.
    #[arg(short, long)]
    pub tokens: bool,

    /// Print the syntax tree in its debug representation.
    #[arg(short, long, conflicts_with = "tokens")]
    pub debug: bool,

    /// When to use colors.
    #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
    pub color: ColorArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(color: ColorArg) -> Self {
        match color {
            ColorArg::Auto => ColorChoice::Auto,
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
        }
    }
}

impl Args {
    pub fn parse() -> Self {
        clap::Parser::parse()
    }
}
