#![deny(missing_docs)]

//! # Autodoc CLI
//!
//! Command Line Interface for the API documentation generator.
//!
//! Supported Commands:
//! - `generate`: Source -> IR -> OpenAPI document, reference tables and diagrams.
//! - `openapi`: Source -> IR -> OpenAPI document only.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::CliResult;

mod error;
mod generate;
mod metadata;
mod parser;

#[derive(Parser, Debug)]
#[clap(author, version, about = "API documentation generator")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[clap(long, short, global = true)]
    verbose: bool,

    /// Disable colored log output.
    #[clap(long, global = true)]
    no_color: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the OpenAPI document, Markdown tables and Mermaid diagrams.
    Generate(generate::GenerateArgs),
    /// Generate only the OpenAPI document.
    Openapi(generate::OpenapiArgs),
}

/// Installs the stderr log subscriber.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(level)
    });

    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi),
        )
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Generate(args) => {
            let written = generate::execute(args)?;
            info!(
                files = written.len(),
                out_dir = %args.out_dir.display(),
                "Documentation generated"
            );
        }
        Commands::Openapi(args) => generate::execute_openapi(args)?,
    }
    Ok(())
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    match run(&cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
