//! Property-based tests for deep-merge semantics.

use proptest::prelude::*;

use tessera_config::domain::merge::deep_merge;
use tessera_config::domain::models::value::{ConfigMap, ConfigValue};

fn arb_value() -> impl Strategy<Value = ConfigValue> {
    let leaf = prop_oneof![
        Just(ConfigValue::Null),
        any::<bool>().prop_map(ConfigValue::Bool),
        any::<i64>().prop_map(ConfigValue::Int),
        "[a-z]{0,8}".prop_map(ConfigValue::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(ConfigValue::List),
            prop::collection::vec(("[a-d]{1,2}", inner), 0..4)
                .prop_map(|entries| ConfigValue::Map(entries.into_iter().collect())),
        ]
    })
}

fn arb_map() -> impl Strategy<Value = ConfigMap> {
    // Narrow key space so merges actually collide.
    prop::collection::vec(("[a-d]{1,2}", arb_value()), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn merge_is_idempotent(base in arb_map(), overlay in arb_map()) {
        let once = deep_merge(&base, &overlay);
        let twice = deep_merge(&once, &overlay);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_with_empty_overlay_is_identity(base in arb_map()) {
        prop_assert_eq!(deep_merge(&base, &ConfigMap::new()), base);
    }

    #[test]
    fn merge_onto_empty_base_yields_overlay(overlay in arb_map()) {
        prop_assert_eq!(deep_merge(&ConfigMap::new(), &overlay), overlay);
    }

    #[test]
    fn every_overlay_key_is_present_after_merge(base in arb_map(), overlay in arb_map()) {
        let merged = deep_merge(&base, &overlay);
        for (key, _) in &overlay {
            prop_assert!(merged.contains_key(key));
        }
    }

    #[test]
    fn non_mapping_overlay_values_win(base in arb_map(), overlay in arb_map()) {
        let merged = deep_merge(&base, &overlay);
        for (key, value) in &overlay {
            if !matches!(value, ConfigValue::Map(_)) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }
}
