/// `load_config` module: loads the static YAML config into typed structs.
///
/// This is the only place where untrusted YAML is parsed. Secrets (API
/// tokens) never live in the config file — the concrete clients read them
/// from the environment.
///
/// # Errors
/// All errors use `anyhow::Error` for context-rich diagnostics surfaced at
/// the CLI boundary.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct CliConfig {
    /// Account whose repositories are synchronised.
    pub account: String,
    /// Directory the content documents are written into.
    pub content_dir: PathBuf,
    /// Path of the record-store JSON snapshot.
    pub store_path: PathBuf,
    /// Hero image used when a README embeds no media.
    #[serde(default = "default_hero_image")]
    pub default_hero_image: String,
}

fn default_hero_image() -> String {
    "/post_img.webp".to_string()
}

/// Loads the static YAML config file (no secrets).
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    match serde_yaml::from_str::<CliConfig>(&config_content) {
        Ok(config) => {
            info!(config_path = ?path_ref, account = %config.account, "Parsed config YAML successfully");
            Ok(config)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}
