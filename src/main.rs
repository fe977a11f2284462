use anyhow::Result;
use clap::Parser;
use environment_reader::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    environment_reader::run(cli).await
}
