//! Implementation of the `tessera-config migrate` command.
//!
//! Prints the legacy `application.yml` keys expressed in cluster config
//! format. The output is meant to be added to `/etc/tessera/config.yml`,
//! after which the legacy files can be deleted.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::commands::dump::wrap_in_clusters;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::value::ConfigMap;
use crate::domain::ports::ConfigSource;
use crate::infrastructure::dump::DumpTool;
use crate::infrastructure::legacy::load_legacy_config;
use crate::infrastructure::options::LoaderOptions;
use crate::services::schema::workbench_loader;

/// Placeholder used when the cluster identifier is unknown.
const UNKNOWN_CLUSTER_ID: &str = "xxxxx";

#[derive(Args, Debug)]
pub struct MigrateArgs {}

#[derive(Debug, serde::Serialize)]
pub struct MigrateOutput {
    pub cluster_id: String,
    pub migrated: serde_json::Value,
    pub unmigrated_keys: Vec<String>,
    #[serde(skip)]
    yaml: String,
}

impl CommandOutput for MigrateOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            "# Add the following to /etc/tessera/config.yml, then delete".to_string(),
            "# the legacy application.yml files.".to_string(),
            self.yaml.clone(),
        ];
        if !self.unmigrated_keys.is_empty() {
            lines.push("# Keys with no cluster config counterpart (left in place):".to_string());
            for key in &self.unmigrated_keys {
                lines.push(format!("#   {key}"));
            }
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(_args: MigrateArgs, json_mode: bool) -> Result<()> {
    let options = LoaderOptions::load()?;
    let legacy = load_legacy_config(&options.config_dir, &options.environment)
        .context("Failed to load legacy configuration")?;

    let mut migrated = ConfigMap::new();
    let remaining = workbench_loader()
        .migrate(&legacy, &mut migrated)
        .context("Failed to migrate legacy configuration")?;

    let tool = DumpTool::new(options.dump_command.clone());
    let cluster_id = tool
        .active()
        .await
        .map_or_else(|| UNKNOWN_CLUSTER_ID.to_string(), |dump| dump.cluster_id);

    let wrapped = wrap_in_clusters(&cluster_id, &migrated);
    let result = MigrateOutput {
        cluster_id,
        migrated: serde_json::to_value(migrated.to_yaml())
            .context("Failed to render migrated configuration as JSON")?,
        unmigrated_keys: remaining.keys().cloned().collect(),
        yaml: serde_yaml::to_string(&wrapped.to_yaml())
            .context("Failed to render migrated configuration as YAML")?,
    };
    output(&result, json_mode);
    Ok(())
}
