//! WQL CLI - Command line tool for logging pH and flow-rate readings.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wql-cli",
    version,
    about = "Water quality log: pH and flow-rate readings per location"
)]
struct Cli {
    #[command(flatten)]
    config: wql_cmd::Config,

    #[command(subcommand)]
    command: wql_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Using workbook {}", cli.config.workbook.display());
    wql_cmd::run(&cli.config, cli.command)
}
