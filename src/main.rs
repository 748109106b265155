use anyhow::Result;
use carbonledger::cli::Cli;
use clap::Parser;

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run().await
}
