//! tessera-config - Cluster configuration loader for the Tessera Workbench
//!
//! Loads and normalizes the Workbench's configuration by layering
//! cluster-wide YAML (from the `tessera-server` dump tool) over compiled-in
//! defaults, migrating legacy `application.yml` keys into the cluster schema,
//! coercing types, validating required fields, and installing the result into
//! a process-wide settings store.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): the configuration value tree, deep merge,
//!   item declarations, and errors
//! - **Service Layer** (`services`): the declaration registry and the
//!   Workbench schema
//! - **Application Layer** (`application`): the startup pipeline
//! - **Infrastructure Layer** (`infrastructure`): dump tool invocation,
//!   legacy file loading, loader options, settings store
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use tessera_config::application::bootstrap;
//! use tessera_config::infrastructure::{DumpTool, LoaderOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let options = LoaderOptions::load()?;
//!     let tool = DumpTool::new(options.dump_command.clone());
//!     let settings = bootstrap::install(&tool, &options).await?;
//!     println!("cluster: {}", settings.cluster_id());
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{compiled_defaults, ConfigSnapshots};
pub use domain::{
    ClusterConfig, ConfigError, ConfigMap, ConfigResult, ConfigSource, ConfigType, ConfigValue,
    Declaration,
};
pub use infrastructure::{DumpTool, LoaderOptions, SecretString, Settings};
pub use services::{workbench_loader, ConfigLoader};
