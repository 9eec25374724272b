//! CLI subcommands.

pub mod analyze;
pub mod batch;
pub mod config;
pub mod extract;
pub mod fold;
pub mod sequence;

use std::path::Path;

use tracing::debug;

use hemalyze_core::models::config::HemalyzeConfig;

/// Load configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<HemalyzeConfig> {
    let config = match config_path {
        Some(path) => HemalyzeConfig::from_file(Path::new(path))?,
        None => {
            let default_path = config::default_config_path();
            if default_path.exists() {
                debug!("Using config from {}", default_path.display());
                HemalyzeConfig::from_file(&default_path)?
            } else {
                HemalyzeConfig::default()
            }
        }
    };

    Ok(config.with_env_overrides())
}
