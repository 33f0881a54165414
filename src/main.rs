mod cli;

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use lambda_syntax::ast::Node;
use lambda_syntax::diag::{DiagCtx, StderrDiagCtx};
use lambda_syntax::parse::{Cursor, Lexer, Parser};
use lambda_syntax::sourcemap::SourceMap;
use tracing_subscriber::EnvFilter;
use yansi::Paint;

use self::cli::{Args, ColorArg};

fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut contents = String::new();
        io::stdin().read_to_string(&mut contents)?;

        Ok(contents)
    } else {
        fs::read_to_string(input)
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match args.color {
        ColorArg::Auto => yansi::whenever(yansi::Condition::TTY_AND_COLOR),
        ColorArg::Always => yansi::enable(),
        ColorArg::Never => yansi::disable(),
    }

    let input = args.input.as_deref().unwrap_or("-");
    let contents = match read_input(input) {
        Ok(contents) => contents,

        Err(e) => {
            eprintln!("Could not read the input file `{input}`: {e}");
            return ExitCode::from(2);
        }
    };

    let name = if input == "-" { "<stdin>" } else { input };
    let mut sourcemap = SourceMap::new();
    let file_id = sourcemap.add_source(name.to_owned(), contents).id();
    let f = sourcemap.get_by_id(file_id);
    let mut diag = StderrDiagCtx::new(&sourcemap, file_id, args.color.into());
    let lexer = Lexer::new(Cursor::new(f.contents()));

    if args.tokens {
        for token in lexer {
            match token {
                Ok(token) => println!("{} : {}", token.kind().cyan(), token.value.text()),

                Err(e) => {
                    diag.emit(e);

                    return ExitCode::FAILURE;
                }
            }
        }

        return ExitCode::SUCCESS;
    }

    let ast = match Parser::new(lexer).parse() {
        Ok(ast) => ast,

        Err(e) => {
            diag.emit(e);

            return ExitCode::FAILURE;
        }
    };

    if args.debug {
        println!("{ast:#?}");
    } else if let Node::Prog(statements) = &ast {
        for statement in statements {
            println!("{} {statement}", format_args!("{}:", statement.kind()).bold());
        }
    }

    ExitCode::SUCCESS
}
