//! Ports to external collaborators.

use async_trait::async_trait;

use crate::domain::models::value::ConfigMap;

/// One cluster's configuration as produced by the dump tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    /// Cluster identifier (the key under `Clusters` in the dump output).
    pub cluster_id: String,

    /// The cluster's configuration mapping. Carries the identifier again
    /// under the `ClusterID` key so consumers of the mapping alone can see it.
    pub config: ConfigMap,
}

/// Source of authoritative cluster configuration.
///
/// Both operations are non-fatal by contract: any failure to produce
/// configuration (tool missing, non-zero exit, unparsable output) resolves to
/// `None` and the caller falls back to compiled-in defaults.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// The schema defaults (`config-defaults`).
    async fn defaults(&self) -> Option<ClusterConfig>;

    /// The active configuration with site overrides applied (`config-dump`).
    async fn active(&self) -> Option<ClusterConfig>;
}
