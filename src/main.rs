use anyhow::Result;
use clap::Parser;
use tracing::Level;

use setcoach::{
    cli::{Cli, Commands},
    commands,
    config::{Config, config_path},
    db::open,
    store::SqliteStore,
    types::OutputFmt,
};

fn log_level(verbose: u8, cfg: &Config) -> Level {
    match verbose {
        0 => cfg.log_level(),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

async fn connect(cfg: &Config) -> Result<SqliteStore> {
    Ok(SqliteStore::new(open(cfg.db_path()).await?))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let fmt = OutputFmt::from_flag(cli.json);

    let cfg = match config_path() {
        Ok(path) => Config::load(&path)?,
        Err(_) => Config::default(),
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose, &cfg))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.cmd {
        Commands::Config(cmd) => commands::config::handle(cmd, fmt)?,
        Commands::Session(cmd) => {
            let store = connect(&cfg).await?;
            commands::session::handle(cmd, &store, &cfg, fmt).await?
        }
        Commands::Program(cmd) => commands::program::handle(cmd, &connect(&cfg).await?, fmt).await?,
        Commands::History(cmd) => commands::history::handle(cmd, &connect(&cfg).await?, fmt).await?,
    }

    Ok(())
}
