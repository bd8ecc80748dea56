//! paddockdocs CLI - race document acquisition and summarization.
//!
//! Fetches official race documents from the governing body's portal and
//! answers fixed per-class question batteries over them with an
//! OpenAI-compatible model.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
