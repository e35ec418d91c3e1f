//! Configuration item declarations.
//!
//! Each declaration maps one dotted path in the cluster schema to an expected
//! type, an optional legacy `application.yml` key, and an optional transform
//! used when the legacy value needs rewriting on the way in.

use crate::domain::errors::ConfigResult;
use crate::domain::models::value::{ConfigMap, ConfigValue};

/// Transform invoked during migration instead of a verbatim copy.
///
/// The transform receives the target mapping, the destination path, and the
/// legacy value, and is responsible for setting the derived value itself.
pub type Transform = fn(&mut ConfigMap, &str, &ConfigValue) -> ConfigResult<()>;

/// Expected type of a declared configuration item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigType {
    /// UTF-8 string.
    String,
    /// Boolean flag.
    Bool,
    /// Signed integer.
    Integer,
    /// Duration in humantime syntax, or integer seconds.
    Duration,
    /// Absolute URL.
    Url,
    /// Sequence of values.
    Array,
    /// Nested mapping.
    Map,
}

impl ConfigType {
    /// Name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            ConfigType::String => "string",
            ConfigType::Bool => "boolean",
            ConfigType::Integer => "integer",
            ConfigType::Duration => "duration",
            ConfigType::Url => "URL",
            ConfigType::Array => "array",
            ConfigType::Map => "mapping",
        }
    }
}

/// One declared configuration item.
///
/// Declarations are registered once at startup and never modified afterwards;
/// migration and coercion walk them in declaration order.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Dotted destination path in the cluster schema.
    pub path: String,

    /// Expected type at `path`.
    pub ty: ConfigType,

    /// Whether the field must be non-empty in the final merged config.
    pub required: bool,

    /// Legacy `application.yml` key migrated into `path`, if any.
    pub legacy_key: Option<String>,

    /// Transform applied to the legacy value instead of a verbatim copy.
    pub transform: Option<Transform>,
}

impl Declaration {
    /// A declaration with no legacy counterpart.
    pub fn new(path: impl Into<String>, ty: ConfigType) -> Self {
        Self { path: path.into(), ty, required: false, legacy_key: None, transform: None }
    }

    /// Attach a legacy key to migrate from.
    pub fn with_legacy(mut self, legacy_key: impl Into<String>) -> Self {
        self.legacy_key = Some(legacy_key.into());
        self
    }

    /// Attach a migration transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Mark the field required in the final merged config.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        fn noop(_: &mut ConfigMap, _: &str, _: &ConfigValue) -> ConfigResult<()> {
            Ok(())
        }

        let decl = Declaration::new("Workbench.SiteName", ConfigType::String)
            .with_legacy("site_name")
            .with_transform(noop)
            .required();

        assert_eq!(decl.path, "Workbench.SiteName");
        assert_eq!(decl.ty, ConfigType::String);
        assert!(decl.required);
        assert_eq!(decl.legacy_key.as_deref(), Some("site_name"));
        assert!(decl.transform.is_some());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ConfigType::Duration.name(), "duration");
        assert_eq!(ConfigType::Url.name(), "URL");
    }
}
