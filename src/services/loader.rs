//! Declaration registry, legacy-key migration, and type coercion.

use std::time::Duration;

use tracing::debug;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::declaration::{ConfigType, Declaration, Transform};
use crate::domain::models::value::{ConfigMap, ConfigValue};

/// Registry of declared configuration items.
///
/// Declarations are registered once, then consumed by [`migrate`] (legacy key
/// mapping) and [`coerce_and_check`] (type coercion and required-field
/// validation), both of which walk the registry in declaration order.
///
/// [`migrate`]: ConfigLoader::migrate
/// [`coerce_and_check`]: ConfigLoader::coerce_and_check
#[derive(Debug, Default)]
pub struct ConfigLoader {
    declarations: Vec<Declaration>,
}

impl ConfigLoader {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an item with no legacy counterpart.
    pub fn declare(&mut self, path: &str, ty: ConfigType) {
        self.declarations.push(Declaration::new(path, ty));
    }

    /// Declare an item migrated verbatim from a legacy key.
    pub fn declare_legacy(&mut self, path: &str, ty: ConfigType, legacy_key: &str) {
        self.declarations.push(Declaration::new(path, ty).with_legacy(legacy_key));
    }

    /// Declare an item migrated from a legacy key through a transform.
    pub fn declare_legacy_with(
        &mut self,
        path: &str,
        ty: ConfigType,
        legacy_key: &str,
        transform: Transform,
    ) {
        self.declarations
            .push(Declaration::new(path, ty).with_legacy(legacy_key).with_transform(transform));
    }

    /// Mark an already-declared path as required in the final merged config.
    pub fn require(&mut self, path: &str) {
        for decl in &mut self.declarations {
            if decl.path == path {
                decl.required = true;
            }
        }
    }

    /// The registered declarations, in declaration order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Migrate legacy keys into `target`.
    ///
    /// For each declaration whose legacy key is present in `legacy`, the
    /// value is either copied verbatim to the declared path or handed to the
    /// declaration's transform. Consumed keys are dropped; the unconsumed
    /// remainder is returned for diagnostics.
    pub fn migrate(&self, legacy: &ConfigMap, target: &mut ConfigMap) -> ConfigResult<ConfigMap> {
        let mut remaining = legacy.clone();
        for decl in &self.declarations {
            let Some(key) = decl.legacy_key.as_deref() else {
                continue;
            };
            let Some(value) = remaining.remove(key) else {
                continue;
            };
            debug!(legacy_key = key, path = %decl.path, "migrating legacy configuration key");
            match decl.transform {
                Some(transform) => transform(target, &decl.path, &value)?,
                None => target.set_at(&decl.path, value),
            }
        }
        Ok(remaining)
    }

    /// Coerce declared fields to their native types and, when
    /// `check_nonempty` is set, fail on the first required field that is
    /// missing, null, or an empty string. Optional empty fields are passed
    /// over. Coercion failures are fatal regardless of `check_nonempty`.
    pub fn coerce_and_check(&self, map: &mut ConfigMap, check_nonempty: bool) -> ConfigResult<()> {
        for decl in &self.declarations {
            match map.get_at(&decl.path).cloned() {
                None | Some(ConfigValue::Null) => {
                    if check_nonempty && decl.required {
                        return Err(ConfigError::MissingRequiredConfig(decl.path.clone()));
                    }
                }
                Some(value) => {
                    let coerced = coerce(&decl.path, decl.ty, value)?;
                    if check_nonempty && decl.required && coerced.is_empty_value() {
                        return Err(ConfigError::MissingRequiredConfig(decl.path.clone()));
                    }
                    map.set_at(&decl.path, coerced);
                }
            }
        }
        Ok(())
    }
}

/// Coerce a single value to the declared type.
fn coerce(path: &str, ty: ConfigType, value: ConfigValue) -> ConfigResult<ConfigValue> {
    let mismatch = |value: &ConfigValue| ConfigError::InvalidConfigType {
        path: path.to_string(),
        expected: ty.name(),
        actual: format!("{} ({})", render_actual(value), value.type_name()),
    };

    match ty {
        ConfigType::String => match value {
            ConfigValue::String(_) => Ok(value),
            other => Err(mismatch(&other)),
        },
        ConfigType::Bool => match value {
            ConfigValue::Bool(_) => Ok(value),
            ConfigValue::String(ref s) => match s.as_str() {
                "true" => Ok(ConfigValue::Bool(true)),
                "false" => Ok(ConfigValue::Bool(false)),
                _ => Err(mismatch(&value)),
            },
            other => Err(mismatch(&other)),
        },
        ConfigType::Integer => match value {
            ConfigValue::Int(_) => Ok(value),
            ConfigValue::String(ref s) => {
                s.trim().parse::<i64>().map(ConfigValue::Int).map_err(|_| mismatch(&value))
            }
            other => Err(mismatch(&other)),
        },
        ConfigType::Duration => match value {
            ConfigValue::Duration(_) => Ok(value),
            ConfigValue::Int(secs) => match u64::try_from(secs) {
                Ok(secs) => Ok(ConfigValue::Duration(Duration::from_secs(secs))),
                Err(_) => Err(mismatch(&ConfigValue::Int(secs))),
            },
            ConfigValue::String(ref s) if s.is_empty() => Ok(value),
            ConfigValue::String(ref s) => humantime::parse_duration(s.trim())
                .map(ConfigValue::Duration)
                .map_err(|_| mismatch(&value)),
            other => Err(mismatch(&other)),
        },
        ConfigType::Url => match value {
            ConfigValue::String(ref s) if s.is_empty() => Ok(value),
            ConfigValue::String(ref s) => url::Url::parse(s)
                .map(|u| ConfigValue::String(u.to_string()))
                .map_err(|_| mismatch(&value)),
            other => Err(mismatch(&other)),
        },
        ConfigType::Array => match value {
            ConfigValue::List(_) => Ok(value),
            other => Err(mismatch(&other)),
        },
        ConfigType::Map => match value {
            ConfigValue::Map(_) => Ok(value),
            other => Err(mismatch(&other)),
        },
    }
}

fn render_actual(value: &ConfigValue) -> String {
    match value {
        ConfigValue::Null => "null".to_string(),
        ConfigValue::Bool(b) => b.to_string(),
        ConfigValue::Int(i) => i.to_string(),
        ConfigValue::Float(f) => f.to_string(),
        ConfigValue::String(s) => format!("{s:?}"),
        ConfigValue::Duration(d) => humantime::format_duration(*d).to_string(),
        ConfigValue::List(items) => format!("list of {} items", items.len()),
        ConfigValue::Map(map) => format!("mapping of {} keys", map.len()),
    }
}
