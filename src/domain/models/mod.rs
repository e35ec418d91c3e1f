//! Domain models: the configuration value tree and item declarations.

pub mod declaration;
pub mod value;

pub use declaration::{ConfigType, Declaration, Transform};
pub use value::{ConfigMap, ConfigValue};
