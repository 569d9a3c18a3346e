mod cli;
mod config;
mod error;
mod output;
mod providers;
mod report;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if !cli.quiet() {
        output::print_banner();
    }

    info!("Starting jitdash");
    cli.execute().await?;

    Ok(())
}
