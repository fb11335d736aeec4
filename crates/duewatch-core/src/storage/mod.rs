mod config;
pub mod measurement_file;

pub use config::{Config, DisplayConfig};
pub use measurement_file::{load_measurement_log, save_measurement_log};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/duewatch[-dev]/` based on DUEWATCH_ENV.
///
/// Set DUEWATCH_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DUEWATCH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("duewatch-dev")
    } else {
        base_dir.join("duewatch")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
