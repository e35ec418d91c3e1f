//! Startup pipeline: build, validate, and install the configuration.
//!
//! Three snapshots are built in order and none is mutated afterwards:
//!
//! 1. `defaults`: compiled-in defaults overlaid with `config-defaults`.
//! 2. `cluster`: `defaults` overlaid with `config-dump` (site overrides).
//! 3. `active`: `cluster` with legacy `application.yml` keys migrated in;
//!    legacy values win where both exist.
//!
//! Type coercion runs on all three; the required-field check runs only on
//! `active`.

use tracing::{info, warn};

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::merge::{deep_merge, merge_into};
use crate::domain::models::value::{ConfigMap, ConfigValue};
use crate::domain::ports::ConfigSource;
use crate::infrastructure::dump::{parse_cluster_yaml, CLUSTER_ID_KEY};
use crate::infrastructure::legacy::load_legacy_config;
use crate::infrastructure::options::LoaderOptions;
use crate::infrastructure::settings::{self, Settings};
use crate::services::schema::workbench_loader;

/// Compiled-in defaults, embedded at build time.
const COMPILED_DEFAULTS: &str = include_str!("../../config.default.yml");

/// The three configuration snapshots plus migration diagnostics.
#[derive(Debug, Clone)]
pub struct ConfigSnapshots {
    /// Identifier of the configured cluster.
    pub cluster_id: String,

    /// Schema defaults.
    pub defaults: ConfigMap,

    /// Defaults merged with cluster-wide overrides.
    pub cluster: ConfigMap,

    /// Cluster config merged with migrated legacy keys; the only snapshot
    /// that passes the required-field check.
    pub active: ConfigMap,

    /// Legacy keys no declaration consumed.
    pub remaining: ConfigMap,
}

/// Parse the compiled-in defaults.
pub fn compiled_defaults() -> ConfigResult<ConfigMap> {
    parse_cluster_yaml(COMPILED_DEFAULTS.as_bytes())
        .map(|cluster| cluster.config)
        .ok_or_else(|| {
            ConfigError::InvalidDefaults("embedded config.default.yml is not a cluster config".to_string())
        })
}

/// Build and validate the three snapshots.
///
/// The dump tool's two invocations resolve strictly in order: defaults are
/// in place before the cluster overlay is applied.
pub async fn load(source: &dyn ConfigSource, options: &LoaderOptions) -> ConfigResult<ConfigSnapshots> {
    let loader = workbench_loader();

    let mut defaults = compiled_defaults()?;
    match source.defaults().await {
        Some(dump) => merge_into(&mut defaults, &dump.config),
        None => warn!("config-defaults unavailable, using compiled-in defaults"),
    }

    let mut cluster = match source.active().await {
        Some(dump) => deep_merge(&defaults, &dump.config),
        None => {
            warn!("cluster configuration unavailable, starting from defaults");
            defaults.clone()
        }
    };

    let mut active = cluster.clone();
    let legacy = load_legacy_config(&options.config_dir, &options.environment)?;
    let remaining = loader.migrate(&legacy, &mut active)?;
    if !remaining.is_empty() {
        let keys: Vec<&str> = remaining.keys().map(String::as_str).collect();
        warn!(?keys, "legacy configuration keys were not migrated");
    }

    loader.coerce_and_check(&mut defaults, false)?;
    loader.coerce_and_check(&mut cluster, false)?;
    loader.coerce_and_check(&mut active, true)?;

    let cluster_id = active
        .get(CLUSTER_ID_KEY)
        .and_then(ConfigValue::as_str)
        .unwrap_or_default()
        .to_string();
    info!(cluster_id = %cluster_id, "cluster configuration loaded");

    Ok(ConfigSnapshots { cluster_id, defaults, cluster, active, remaining })
}

/// Run the full pipeline and install the result into the process-wide
/// settings store. Returns the installed settings.
pub async fn install(
    source: &dyn ConfigSource,
    options: &LoaderOptions,
) -> ConfigResult<&'static Settings> {
    let snapshots = load(source, options).await?;
    settings::install(Settings::new(
        snapshots.active,
        snapshots.remaining,
        snapshots.cluster_id,
    ))
}
