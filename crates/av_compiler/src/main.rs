mod cli;
mod compiler;


use av_session::diagnostics::PrettyDiagnosticEmitter;
use av_session::ErrorsEmitted;
use clap::Parser as _;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

use crate::compiler::Compiler;

#[derive(thiserror::Error, Debug)]
enum CompilerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("errors while compiling")]
    HadErrors,
}

impl From<ErrorsEmitted> for CompilerError {
    fn from(_: ErrorsEmitted) -> Self {
        CompilerError::HadErrors
    }
}

type CompilerResult<T> = Result<T, CompilerError>;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> CompilerResult<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut compiler = Compiler::new(PrettyDiagnosticEmitter::new(cli.color.into()));

    match cli.command {
        Command::Lex(input) => {
            let source_id = compiler.load(input)?;
            print!("{}", compiler.dump_tokens(source_id)?);
        }

        Command::Parse(input) => {
            let source_id = compiler.load(input)?;
            print!("{}", compiler.print_ast(source_id)?);
        }

        Command::Check(input) => {
            let source_id = compiler.load(input)?;
            compiler.parse(source_id)?;
            println!("no errors");
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
