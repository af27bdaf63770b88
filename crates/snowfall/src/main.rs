mod app;
mod cli;
mod driver;
mod frame_source;
mod logging;

use std::path::PathBuf;

use clap::Parser;
use log::info;
use ratatui::DefaultTerminal;
use snowfall_config::Config;

use crate::app::App;
use crate::cli::Cli;
use crate::frame_source::Capabilities;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let config_path = cli.config.clone().or_else(Config::default_path);
    cli.apply(&mut config);
    config.validate()?;

    // Detect before the terminal switches to the alternate screen.
    let caps = Capabilities::detect();
    info!("starting with {config:?}, {caps:?}");

    let terminal = ratatui::init();
    let result = run(terminal, &config, config_path, caps);
    ratatui::restore();
    result
}

fn run(
    terminal: DefaultTerminal,
    config: &Config,
    config_path: Option<PathBuf>,
    caps: Capabilities,
) -> color_eyre::Result<()> {
    let size = terminal.size()?;
    App::new(config, config_path, caps, size)?.run(terminal)
}
