mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use attendance_projector::config::AppConfig;
use cli::args::{Cli, Commands};
use cli::{handlers, wizard};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("Loading config")?;

    match cli.command {
        Some(Commands::Report(args)) => {
            handlers::handle_report(&config, &args)?;
        }
        Some(Commands::Subjects { timetable }) => {
            handlers::handle_subjects(&timetable)?;
        }
        Some(Commands::Holidays { start, end }) => {
            handlers::handle_holidays(&config, &start, &end)?;
        }
        Some(Commands::Config { init }) => {
            let path = match cli.config {
                Some(path) => path,
                None => AppConfig::config_path()?,
            };
            handlers::handle_config(&config, &path, init)?;
        }
        // No subcommand → launch the wizard
        Some(Commands::Wizard) | None => {
            wizard::handle_wizard(&config)?;
        }
    }

    Ok(())
}
