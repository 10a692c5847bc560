//! qsgen CLI - Query-set generator for ORM models
//!
//! Commands:
//! - `qsgen generate` - Generate the query-set module for a source file
//! - `qsgen inspect` - Print the query-set configs of a source file as JSON
//!
//! Exit status is 0 on success (including "nothing to generate"), the
//! [`QsError::error_code`] of a generation failure, or 1 for any other error.

use clap::{ArgAction, Parser, Subcommand};
use qsgen_core::QsError;
use std::path::PathBuf;
use std::process::ExitCode;

mod config;
mod generate;
mod inspect;
mod logging;

#[derive(Parser)]
#[command(name = "qsgen")]
#[command(author, version, about = "Generate type-safe query sets for ORM models", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate query sets for structs marked with `/// gen:qs`
    Generate {
        /// Rust source file containing the model structs
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (default: <input stem><suffix> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extra template rendered after the built-in one
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Path to qsgen.toml (default: ./qsgen.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Module path of the ORM facade (e.g., crate::orm)
        #[arg(long)]
        orm_path: Option<String>,

        /// Omit the generated-file header
        #[arg(long)]
        no_header: bool,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Print the query-set configs of a source file as JSON
    Inspect {
        /// Rust source file containing the model structs
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            input,
            output,
            template,
            config,
            orm_path,
            no_header,
            stdout,
        } => {
            generate::run(generate::GenerateArgs {
                input,
                output,
                template,
                config,
                orm_path,
                no_header,
                stdout,
            })?;
        }
        Commands::Inspect { input } => {
            inspect::run(&input)?;
        }
    }

    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<QsError>()
        .map(QsError::error_code)
        .unwrap_or(1)
}
