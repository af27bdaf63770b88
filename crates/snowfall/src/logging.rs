//! Logger setup.
//!
//! The terminal belongs to the animation, so log records go to a file.
//! Filter with `SNOWFALL_LOG` (default `warn`).

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use env_logger::{Env, Target, WriteStyle};

const LOG_ENV: &str = "SNOWFALL_LOG";
const LOG_FILE: &str = "snowfall.log";

/// Default log file location.
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "snowfall").map(|dirs| dirs.data_local_dir().join(LOG_FILE))
}

/// Install the global logger, appending to `path` or the default location.
/// Without either, logging stays disabled.
pub fn init(path: Option<&Path>) -> color_eyre::Result<()> {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_log_path) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::from_env(Env::new().filter_or(LOG_ENV, "warn"))
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .try_init()?;
    Ok(())
}
