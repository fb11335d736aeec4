use std::path::Path;

use super::{load_config, CmdResult};

pub fn run(percent: u8, config_path: Option<&Path>) -> CmdResult {
    if percent > 100 {
        return Err(format!("percent must be between 0 and 100 (got {percent})").into());
    }
    let config = load_config(config_path)?;
    println!("{}", config.severity_thresholds().classify(percent));
    Ok(())
}
