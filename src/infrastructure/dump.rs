//! External config-dump tool invocation.
//!
//! `tessera-server` owns the authoritative configuration: `config-defaults`
//! prints the schema defaults and `config-dump` prints the defaults merged
//! with the site's `/etc/tessera/config.yml`. Both print YAML of the form
//! `Clusters: {<id>: <mapping>}` on stdout.
//!
//! Failure here is never fatal. A missing binary, non-zero exit, or
//! unparsable output means "no configuration available" and the caller falls
//! back to compiled-in defaults.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::models::value::{ConfigMap, ConfigValue};
use crate::domain::ports::{ClusterConfig, ConfigSource};

/// Key the cluster identifier is copied into inside the cluster mapping.
pub const CLUSTER_ID_KEY: &str = "ClusterID";

/// Runs the external dump tool.
#[derive(Debug, Clone)]
pub struct DumpTool {
    program: String,
}

impl DumpTool {
    /// Create a runner for the given binary name or path.
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    async fn run(&self, subcommand: &str) -> Option<ClusterConfig> {
        let output = match Command::new(&self.program).arg(subcommand).output().await {
            Ok(output) => output,
            Err(err) => {
                warn!(
                    program = %self.program,
                    subcommand,
                    error = %err,
                    "failed to spawn config dump tool"
                );
                return None;
            }
        };

        if !output.status.success() {
            warn!(
                program = %self.program,
                subcommand,
                status = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr),
                "config dump tool exited with failure"
            );
            return None;
        }

        match parse_cluster_yaml(&output.stdout) {
            Some(cluster) => {
                debug!(
                    subcommand,
                    cluster_id = %cluster.cluster_id,
                    "loaded cluster configuration from dump tool"
                );
                Some(cluster)
            }
            None => {
                warn!(program = %self.program, subcommand, "config dump tool produced no usable output");
                None
            }
        }
    }
}

#[async_trait]
impl ConfigSource for DumpTool {
    async fn defaults(&self) -> Option<ClusterConfig> {
        self.run("config-defaults").await
    }

    async fn active(&self) -> Option<ClusterConfig> {
        self.run("config-dump").await
    }
}

/// Parse `Clusters: {<id>: <mapping>}` output. Takes the first cluster entry
/// and records its identifier under [`CLUSTER_ID_KEY`] inside the mapping.
pub fn parse_cluster_yaml(bytes: &[u8]) -> Option<ClusterConfig> {
    let value: serde_yaml::Value = serde_yaml::from_slice(bytes).ok()?;
    let document = ConfigMap::from_yaml(value)?;
    let clusters = document.get("Clusters")?.as_map()?;
    let (cluster_id, cluster_value) = clusters.iter().next()?;
    let mut config = cluster_value.as_map()?.clone();
    config.insert(CLUSTER_ID_KEY, ConfigValue::String(cluster_id.clone()));
    Some(ClusterConfig { cluster_id: cluster_id.clone(), config })
}
