//! Loader options: the loader's own knobs, as opposed to the configuration
//! being loaded.

use std::path::PathBuf;

use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// How the loader finds its inputs.
///
/// Values come from programmatic defaults overridden by `TESSERA_CONFIG_*`
/// environment variables (e.g. `TESSERA_CONFIG_ENVIRONMENT=production`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoaderOptions {
    /// Binary invoked for `config-defaults` / `config-dump`.
    #[serde(default = "default_dump_command")]
    pub dump_command: String,

    /// Directory holding the legacy `application.yml` files.
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Environment section applied from the legacy files.
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_dump_command() -> String {
    "tessera-server".to_string()
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("config")
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            dump_command: default_dump_command(),
            config_dir: default_config_dir(),
            environment: default_environment(),
        }
    }
}

impl LoaderOptions {
    /// Load options: programmatic defaults, then `TESSERA_CONFIG_*`
    /// environment variables (highest priority).
    pub fn load() -> Result<Self> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("TESSERA_CONFIG_").split("__"))
            .extract()
            .context("Failed to extract loader options")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoaderOptions::default();
        assert_eq!(options.dump_command, "tessera-server");
        assert_eq!(options.config_dir, PathBuf::from("config"));
        assert_eq!(options.environment, "development");
    }

    #[test]
    fn test_env_override() {
        temp_env::with_vars(
            [
                ("TESSERA_CONFIG_ENVIRONMENT", Some("production")),
                ("TESSERA_CONFIG_DUMP_COMMAND", Some("/usr/local/bin/tessera-server")),
            ],
            || {
                let options = LoaderOptions::load().unwrap();
                assert_eq!(options.environment, "production");
                assert_eq!(options.dump_command, "/usr/local/bin/tessera-server");
                assert_eq!(options.config_dir, PathBuf::from("config"), "untouched default");
            },
        );
    }
}
