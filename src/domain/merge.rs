//! Deep merge for configuration mappings.
//!
//! Merge semantics: keys present in only one mapping pass through; keys
//! present in both recurse when both values are mappings, otherwise the
//! overlay value wins. Lists are replaced wholesale, never concatenated.

use crate::domain::models::value::{ConfigMap, ConfigValue};

/// Merge `overlay` into `base` in place.
pub fn merge_into(base: &mut ConfigMap, overlay: &ConfigMap) {
    for (key, overlay_value) in overlay {
        match (base.get_mut(key), overlay_value) {
            (Some(ConfigValue::Map(base_map)), ConfigValue::Map(overlay_map)) => {
                merge_into(base_map, overlay_map);
            }
            _ => {
                base.insert(key.clone(), overlay_value.clone());
            }
        }
    }
}

/// Merge `overlay` over `base`, returning the combined mapping.
pub fn deep_merge(base: &ConfigMap, overlay: &ConfigMap) -> ConfigMap {
    let mut merged = base.clone();
    merge_into(&mut merged, overlay);
    merged
}
