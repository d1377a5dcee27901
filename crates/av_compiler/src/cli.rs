use av_diagnostic::termcolor::ColorChoice;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log more. Repeat for more detail. `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// When to colour diagnostics.
    #[arg(long, value_enum, default_value_t = Color::Auto, global = true)]
    pub color: Color,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the tokens of a program, one per line.
    Lex(Input),

    /// Print the syntax tree of a program.
    Parse(Input),

    /// Check a program for errors without printing anything else.
    Check(Input),
}

#[derive(Args)]
pub struct Input {
    /// The input file.
    pub input: String,

    /// Whether the given input should be used directly as the source instead
    /// of as the source file path.
    #[clap(long, short, action)]
    pub source: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Auto,
    Always,
    Never,
}

impl From<Color> for ColorChoice {
    fn from(color: Color) -> Self {
        match color {
            Color::Auto => ColorChoice::Auto,
            Color::Always => ColorChoice::Always,
            Color::Never => ColorChoice::Never,
        }
    }
}
