mod catalog;
mod cli;
mod commands;
mod config;
mod error;
mod source;
mod state_machine;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use config::BuddiesConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = BuddiesConfig::load()?;
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    init_tracing(&config.log_level, cli.verbose);

    match cli.command {
        Command::Quiz { answers } => match answers {
            Some(path) => commands::run_quiz_from_file(&path),
            None => commands::run_quiz_interactive(),
        },
        Command::Swipe { decisions } => commands::run_swipe(decisions.as_deref()),
        Command::Voice { takes } => commands::run_voice(&config, takes).await,
        Command::Loading => commands::run_loading(&config).await,
        Command::Hostels { save } => commands::run_hostels(&save),
        Command::Decor { count } => commands::run_decor(&config, count),
    }
}

fn init_tracing(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
