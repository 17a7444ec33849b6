//! Gazette CLI - Extract contract notices from official-gazette documents.

use clap::Parser;
use gazette_cli::commands;
use gazette_cli::{AppConfig, Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG wins over --log-level
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> gazette_cli::Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_secrets(&cli.secrets);

    let formatter = Formatter::new(cli.format, !cli.no_color);

    match cli.command {
        Command::Run => commands::execute_run(&config, &formatter).await?,
        Command::Process(args) => commands::execute_process(args.ids, &config, &formatter).await?,
        Command::Status(args) => commands::execute_status(args, &config, &formatter)?,
        Command::Segment(args) => commands::execute_segment(args, &config, &formatter)?,
        Command::InitDb => commands::execute_init_db(&config, &formatter)?,
        Command::Config => commands::execute_config(&config, cli.format)?,
    }

    Ok(())
}
