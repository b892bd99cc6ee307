//! Command-line interface for the mediastash binary.

mod commands;
mod data_uri;
mod demo;
mod schema;

pub use commands::{Cli, Commands};
pub use data_uri::{decode_file, encode_file};
pub use demo::run_demo;
pub use schema::print_schema;
