//! Legacy `application.yml` loading.
//!
//! The legacy per-application format keeps a `common` section plus one
//! section per environment name. `application.default.yml` is read first,
//! then `application.yml` overrides it; within each file the environment
//! section overrides `common`. Missing and empty files are skipped.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::merge::merge_into;
use crate::domain::models::value::{ConfigMap, ConfigValue};

/// Files read from the application config directory, in override order.
const LEGACY_FILES: [&str; 2] = ["application.default.yml", "application.yml"];

/// Load and flatten the legacy configuration from `config_dir` for the given
/// environment. Returns an empty mapping when no legacy files exist.
pub fn load_legacy_config(config_dir: &Path, environment: &str) -> ConfigResult<ConfigMap> {
    let mut merged = ConfigMap::new();

    for name in LEGACY_FILES {
        let path = config_dir.join(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => continue,
            Err(err) => return Err(ConfigError::Io { path, source: err }),
        };
        if text.trim().is_empty() {
            continue;
        }

        let value: serde_yaml::Value = serde_yaml::from_str(&text)
            .map_err(|err| ConfigError::InvalidYaml { path: path.clone(), source: err })?;
        // An all-comments file parses as null; treat it like an empty file.
        let Some(document) = ConfigMap::from_yaml(value) else {
            continue;
        };

        debug!(path = %path.display(), environment, "merging legacy configuration file");
        if let Some(ConfigValue::Map(common)) = document.get("common") {
            merge_into(&mut merged, common);
        }
        if let Some(ConfigValue::Map(env_section)) = document.get(environment) {
            merge_into(&mut merged, env_section);
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_missing_directory_yields_empty_config() {
        let merged =
            load_legacy_config(Path::new("/nonexistent/config/dir"), "production").unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_common_then_environment_section() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "application.yml",
            "common:\n  site_name: Common Name\n  site_theme: default\nproduction:\n  site_name: Production Name\n",
        );

        let merged = load_legacy_config(dir.path(), "production").unwrap();
        assert_eq!(merged.get("site_name").and_then(ConfigValue::as_str), Some("Production Name"));
        assert_eq!(merged.get("site_theme").and_then(ConfigValue::as_str), Some("default"));

        let merged = load_legacy_config(dir.path(), "development").unwrap();
        assert_eq!(merged.get("site_name").and_then(ConfigValue::as_str), Some("Common Name"));
    }

    #[test]
    fn test_application_yml_overrides_default_yml() {
        let dir = TempDir::new().unwrap();
        write(&dir, "application.default.yml", "common:\n  site_name: Default\n  repositories: true\n");
        write(&dir, "application.yml", "common:\n  site_name: Site\n");

        let merged = load_legacy_config(dir.path(), "test").unwrap();
        assert_eq!(merged.get("site_name").and_then(ConfigValue::as_str), Some("Site"));
        assert_eq!(merged.get("repositories"), Some(&ConfigValue::Bool(true)));
    }

    #[test]
    fn test_empty_and_comment_only_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "application.default.yml", "");
        write(&dir, "application.yml", "# nothing here\n");

        let merged = load_legacy_config(dir.path(), "test").unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "application.yml", "common: [unclosed\n");

        let err = load_legacy_config(dir.path(), "test").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml { .. }));
    }

    #[test]
    fn test_unrelated_sections_are_ignored() {
        let dir = TempDir::new().unwrap();
        write(&dir, "application.yml", "production:\n  site_name: Prod\nstaging:\n  site_name: Staging\n");

        let merged = load_legacy_config(dir.path(), "production").unwrap();
        assert_eq!(merged.get("site_name").and_then(ConfigValue::as_str), Some("Prod"));
        assert_eq!(merged.len(), 1);
    }
}
