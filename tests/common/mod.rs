//! Shared helpers for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;

use tessera_config::domain::models::value::{ConfigMap, ConfigValue};
use tessera_config::domain::ports::{ClusterConfig, ConfigSource};

/// Parse a YAML snippet into a `ConfigMap`, panicking on bad fixtures.
pub fn parse_map(yaml: &str) -> ConfigMap {
    ConfigMap::from_yaml(serde_yaml::from_str(yaml).expect("fixture YAML should parse"))
        .expect("fixture should be a mapping")
}

/// Build a `ClusterConfig` the way the dump tool would, with the identifier
/// recorded inside the mapping.
pub fn cluster(cluster_id: &str, yaml: &str) -> ClusterConfig {
    let mut config = parse_map(yaml);
    config.insert("ClusterID", ConfigValue::String(cluster_id.to_string()));
    ClusterConfig { cluster_id: cluster_id.to_string(), config }
}

/// In-memory `ConfigSource` standing in for the dump tool.
#[derive(Debug, Default)]
pub struct FakeSource {
    pub defaults: Option<ClusterConfig>,
    pub active: Option<ClusterConfig>,
}

#[async_trait]
impl ConfigSource for FakeSource {
    async fn defaults(&self) -> Option<ClusterConfig> {
        self.defaults.clone()
    }

    async fn active(&self) -> Option<ClusterConfig> {
        self.active.clone()
    }
}
