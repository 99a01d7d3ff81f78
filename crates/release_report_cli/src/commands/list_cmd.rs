use tracing::{debug, instrument};

use crate::config::{get_config_path, AppConfig};
use crate::errors::Error;

#[cfg(test)]
#[path = "list_cmd_tests.rs"]
mod tests;

/// Print the configured releases
#[instrument]
pub fn execute_releases(config: Option<&str>) -> Result<(), Error> {
    let config = load(config)?;
    print!("{}", render_releases(&config));
    Ok(())
}

/// Print the configured folders
#[instrument]
pub fn execute_folders(config: Option<&str>) -> Result<(), Error> {
    let config = load(config)?;
    print!("{}", render_folders(&config));
    Ok(())
}

fn load(path: Option<&str>) -> Result<AppConfig, Error> {
    let config_path = get_config_path(path);
    debug!(message = "Loading configuration", path = ?config_path);
    AppConfig::load(&config_path)
}

/// One release identifier per line, in configuration order.
pub fn render_releases(config: &AppConfig) -> String {
    config
        .releases
        .iter()
        .map(|release| format!("{release}\n"))
        .collect()
}

/// One `label -> path` line per folder, sorted by label.
pub fn render_folders(config: &AppConfig) -> String {
    let width = config
        .folders
        .keys()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);

    config
        .folders
        .iter()
        .map(|(label, path)| format!("{label:<width$}  {path}\n"))
        .collect()
}
