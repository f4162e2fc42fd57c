use anyhow::Result;
use clap::Parser;
use nightbloom::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    nightbloom::run(cli).await
}
