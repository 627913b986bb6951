//! seq-cli - Command line tool for the sequestration calculator: catalogs,
//! input validation and offline PDF reports.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "seq-cli",
    version,
    about = "Indonesia carbon sequestration calculator toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: seq_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("seq-cli {}", env!("CARGO_PKG_VERSION"));
    seq_cmd::run(cli.command).await
}
