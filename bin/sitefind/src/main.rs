//! Sitefind CLI
//!
//! Builds the search index asset a documentation site ships next to its
//! pages. This is the binary entry point; the command implementations live
//! in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for sitefind.
#[derive(Parser)]
#[command(
    name = "sitefind",
    version,
    about = "Build search index assets for static documentation sites"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sitefind.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the search index asset from a pages manifest
    Build {
        /// Pages manifest produced by the site pipeline
        #[arg(short, long, default_value = "pages.json")]
        pages: std::path::PathBuf,
        /// Output path, overriding the configured location
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Pretty-print the asset (larger, diffable)
        #[arg(long)]
        pretty: bool,
    },
    /// Validate a pages manifest
    Check {
        /// Pages manifest to validate
        #[arg(short, long, default_value = "pages.json")]
        pages: std::path::PathBuf,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    sitefind::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            pages,
            output,
            pretty,
        } => {
            sitefind::cmd::build::run(&cli.config, &pages, output.as_deref(), pretty)?;
        }
        Commands::Check { pages, strict } => {
            sitefind::cmd::check::run(&pages, strict)?;
        }
    }

    Ok(())
}
