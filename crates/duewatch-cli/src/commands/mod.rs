//! Subcommand implementations and shared input helpers.

pub mod assess;
pub mod classify;
pub mod config;
pub mod evaluate;
pub mod measure;

use std::path::Path;

use chrono::{DateTime, Utc};
use duewatch_core::Config;
use serde::de::DeserializeOwned;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Load config from an explicit path, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    tracing::debug!(path = ?path, "loading config");
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Read a JSON or TOML document, chosen by file extension.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let value = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(value)
}

/// Parse an RFC 3339 instant, defaulting to the current time.
pub fn parse_instant(value: Option<&str>) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match value {
        Some(s) => {
            let parsed = DateTime::parse_from_rfc3339(s)
                .map_err(|e| format!("invalid timestamp '{s}': {e} (expected RFC 3339)"))?;
            Ok(parsed.with_timezone(&Utc))
        }
        None => Ok(Utc::now()),
    }
}
