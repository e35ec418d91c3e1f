//! Domain layer: pure configuration logic with no external dependencies.

pub mod errors;
pub mod merge;
pub mod models;
pub mod ports;

pub use errors::{ConfigError, ConfigResult};
pub use models::{ConfigMap, ConfigType, ConfigValue, Declaration, Transform};
pub use ports::{ClusterConfig, ConfigSource};
