//! Implementation of the `tessera-config check` command.

use anyhow::{Context, Result};
use clap::Args;

use crate::application::bootstrap;
use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::dump::DumpTool;
use crate::infrastructure::options::LoaderOptions;

#[derive(Args, Debug)]
pub struct CheckArgs {}

#[derive(Debug, serde::Serialize)]
pub struct CheckOutput {
    pub success: bool,
    pub cluster_id: String,
    pub unmigrated_keys: Vec<String>,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Configuration for cluster {} is valid.",
            self.cluster_id
        )];
        if !self.unmigrated_keys.is_empty() {
            lines.push("\nLegacy keys with no cluster config counterpart:".to_string());
            for key in &self.unmigrated_keys {
                lines.push(format!("  - {key}"));
            }
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(_args: CheckArgs, json_mode: bool) -> Result<()> {
    let options = LoaderOptions::load()?;
    let tool = DumpTool::new(options.dump_command.clone());
    let snapshots = bootstrap::load(&tool, &options)
        .await
        .context("Configuration check failed")?;

    let result = CheckOutput {
        success: true,
        cluster_id: snapshots.cluster_id,
        unmigrated_keys: snapshots.remaining.keys().cloned().collect(),
    };
    output(&result, json_mode);
    Ok(())
}
