mod commands;
mod manifest;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "octo")]
#[command(version, about = "Octothorpe route table inspector", long_about = None)]
struct Cli {
    /// Route manifest to operate on
    #[arg(short, long, default_value = "routes.toml", global = true)]
    manifest: String,

    /// Enable debug logging (RUST_LOG overrides the default filter)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route table and report its shape
    Check,

    /// List registered routes in registration order
    Routes,

    /// Resolve a path against the table
    Resolve {
        /// Path to resolve, e.g. /chat/42
        path: String,

        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the URL for a named route
    Url {
        /// Route name
        name: String,

        /// Parameters as key=value pairs
        params: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    "octothorpe=debug,octothorpe_nav=debug,octo=debug".into()
                }),
            )
            .init();
    }

    match cli.command {
        Commands::Check => commands::check::execute(&cli.manifest)?,
        Commands::Routes => commands::routes::execute(&cli.manifest)?,
        Commands::Resolve { path, json } => {
            commands::resolve::execute(&cli.manifest, &path, json)?
        }
        Commands::Url { name, params } => {
            commands::url::execute(&cli.manifest, &name, &params)?
        }
    }

    Ok(())
}
