//! Implementation of the `tessera-config dump` command.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use crate::application::bootstrap::{self, ConfigSnapshots};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::value::{ConfigMap, ConfigValue};
use crate::infrastructure::dump::DumpTool;
use crate::infrastructure::options::LoaderOptions;

/// Which snapshot to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Snapshot {
    /// Schema defaults.
    Defaults,
    /// Defaults merged with cluster-wide overrides.
    Cluster,
    /// Final merged configuration, legacy keys included.
    Active,
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Snapshot to print
    #[arg(long, value_enum, default_value = "active")]
    pub snapshot: Snapshot,
}

#[derive(Debug, serde::Serialize)]
pub struct DumpOutput {
    pub cluster_id: String,
    pub config: serde_json::Value,
    #[serde(skip)]
    yaml: String,
}

impl DumpOutput {
    fn new(cluster_id: &str, config: &ConfigMap) -> Result<Self> {
        let wrapped = wrap_in_clusters(cluster_id, config);
        Ok(Self {
            cluster_id: cluster_id.to_string(),
            config: serde_json::to_value(config.to_yaml())
                .context("Failed to render configuration as JSON")?,
            yaml: serde_yaml::to_string(&wrapped.to_yaml())
                .context("Failed to render configuration as YAML")?,
        })
    }
}

impl CommandOutput for DumpOutput {
    fn to_human(&self) -> String {
        self.yaml.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Wrap a cluster mapping back into the `Clusters: {<id>: ...}` document
/// shape the dump tool uses.
pub(crate) fn wrap_in_clusters(cluster_id: &str, config: &ConfigMap) -> ConfigMap {
    let mut inner = ConfigMap::new();
    inner.insert(cluster_id, ConfigValue::Map(config.clone()));
    let mut root = ConfigMap::new();
    root.insert("Clusters", ConfigValue::Map(inner));
    root
}

pub async fn execute(args: DumpArgs, json_mode: bool) -> Result<()> {
    let options = LoaderOptions::load()?;
    let tool = DumpTool::new(options.dump_command.clone());
    let snapshots = bootstrap::load(&tool, &options)
        .await
        .context("Failed to load cluster configuration")?;

    let ConfigSnapshots { cluster_id, defaults, cluster, active, .. } = snapshots;
    let config = match args.snapshot {
        Snapshot::Defaults => &defaults,
        Snapshot::Cluster => &cluster,
        Snapshot::Active => &active,
    };

    output(&DumpOutput::new(&cluster_id, config)?, json_mode);
    Ok(())
}
