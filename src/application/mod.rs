//! Application layer: the startup pipeline.

pub mod bootstrap;

pub use bootstrap::{compiled_defaults, ConfigSnapshots};
