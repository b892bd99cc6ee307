//! mediastash CLI binary.
//!
//! - Encode files as data URIs and decode them back
//! - Inspect the media fields of the configured schema
//! - Run an in-memory create/find round trip through the media middleware

use clap::Parser;
use mediastash::{MediaStashConfig, ObservabilityConfig, init_observability_with_config};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, decode_file, encode_file, print_schema, run_demo};

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MediaStashConfig::from_file(path)?,
        None => MediaStashConfig::load()?,
    };

    let mut observability = ObservabilityConfig::from(&config.logging);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability_with_config(observability)?;

    match cli.command {
        Commands::Encode { file, mimetype } => {
            encode_file(&file, &mimetype).await?;
        }

        Commands::Decode { uri, output } => {
            decode_file(&uri, &output).await?;
        }

        Commands::Schema => {
            print_schema(&config)?;
        }

        Commands::Demo {
            file,
            mimetype,
            collection,
        } => {
            run_demo(&config, &file, &mimetype, &collection).await?;
        }
    }

    Ok(())
}
