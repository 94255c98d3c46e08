//! Binary crate for the `citycast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and city search
//! - Human-friendly output formatting

use clap::Parser;
use log::LevelFilter;

mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silent unless RUST_LOG is set.
    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Off)
        .parse_default_env()
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
