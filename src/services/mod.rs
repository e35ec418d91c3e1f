//! Service layer: the declaration registry and the Workbench schema.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::workbench_loader;
