mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod persistence;
mod render;
mod session;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    logging::initialize(config.log_destination, config.level());
    app::run(&config)
}
