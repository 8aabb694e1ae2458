//! graft - translate C# source into PowerShell.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use graft_surface_syntax::{Dialect, translate_file};

#[derive(Parser)]
#[command(name = "graft")]
#[command(about = "Translate C# source into PowerShell")]
struct Cli {
    /// Input C# source file
    input: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output dialect
    #[arg(short, long, value_enum, default_value = "function")]
    dialect: DialectArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    /// Standalone script functions
    Function,
    /// PowerShell 5 class declarations
    Type,
}

impl From<DialectArg> for Dialect {
    fn from(value: DialectArg) -> Self {
        match value {
            DialectArg::Function => Dialect::Function,
            DialectArg::Type => Dialect::Type,
        }
    }
}

fn main() {
    std::process::exit(run(Cli::parse()));
}

fn run(cli: Cli) -> i32 {
    match translate_file(&cli.input, cli.output.as_deref(), cli.dialect.into()) {
        Ok(Some(text)) => {
            print!("{text}");
            0
        }
        Ok(None) => {
            if let Some(output) = &cli.output {
                eprintln!(
                    "Translated {} -> {}",
                    cli.input.display(),
                    output.display()
                );
            }
            0
        }
        Err(err) => {
            eprintln!("Failed to translate {}: {}", cli.input.display(), err);
            1
        }
    }
}
