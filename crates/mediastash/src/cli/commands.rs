//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mediastash - store media fields out of line and read them back as URLs
#[derive(Parser, Debug)]
#[command(name = "mediastash")]
#[command(about = "Store media fields out of line and read them back as URLs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the data URI of a file
    Encode {
        /// File to encode
        file: PathBuf,

        /// MIME type of the file
        #[arg(long)]
        mimetype: String,
    },

    /// Write the content of a data URI to a file
    Decode {
        /// The data URI
        uri: String,

        /// Destination file
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Print the media fields of every configured collection
    Schema,

    /// Store a file in a media field in memory and read it back
    Demo {
        /// File to store
        file: PathBuf,

        /// MIME type of the file
        #[arg(long)]
        mimetype: String,

        /// Collection to create the object in
        #[arg(long, default_value = "user")]
        collection: String,
    },
}
