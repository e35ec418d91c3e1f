//! Dynamic configuration value tree.
//!
//! Cluster configuration is schemaless at the edges (the dump tool and the
//! legacy `application.yml` both produce arbitrary YAML), so the loader works
//! on a dynamic tree and only pins types down during coercion. Mappings keep
//! insertion order, matching the YAML documents they came from.

use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;

/// A single configuration value.
///
/// `Duration` only appears after coercion; YAML input carries durations as
/// strings (`"1h 30m"`) or integer seconds.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// YAML null or an absent value.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Native duration, produced by coercion.
    Duration(Duration),
    /// Sequence of values. Merging replaces lists wholesale.
    List(Vec<ConfigValue>),
    /// Nested mapping.
    Map(ConfigMap),
}

impl ConfigValue {
    /// Borrow the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the nested mapping, if this is a mapping.
    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Mutably borrow the nested mapping, if this is a mapping.
    pub fn as_map_mut(&mut self) -> Option<&mut ConfigMap> {
        match self {
            ConfigValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Whether this value counts as empty for required-field checks:
    /// null or an empty string.
    pub fn is_empty_value(&self) -> bool {
        matches!(self, ConfigValue::Null) || matches!(self, ConfigValue::String(s) if s.is_empty())
    }

    /// Short name of the value's runtime type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Int(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Duration(_) => "duration",
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "mapping",
        }
    }

    /// Convert a parsed YAML value into a config value.
    ///
    /// Mapping keys that are not YAML strings (`5:`, `true:`) are rendered to
    /// their scalar string form so the tree is uniformly string-keyed.
    pub fn from_yaml(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => ConfigValue::Null,
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ConfigValue::Int(i)
                } else {
                    ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_yaml::Value::String(s) => ConfigValue::String(s),
            serde_yaml::Value::Sequence(seq) => {
                ConfigValue::List(seq.into_iter().map(ConfigValue::from_yaml).collect())
            }
            serde_yaml::Value::Mapping(mapping) => {
                ConfigValue::Map(ConfigMap::from_yaml_mapping(mapping))
            }
            serde_yaml::Value::Tagged(tagged) => ConfigValue::from_yaml(tagged.value),
        }
    }

    /// Render back to a YAML value. Durations render in humantime syntax so a
    /// dumped config round-trips through coercion.
    pub fn to_yaml(&self) -> serde_yaml::Value {
        match self {
            ConfigValue::Null => serde_yaml::Value::Null,
            ConfigValue::Bool(b) => serde_yaml::Value::Bool(*b),
            ConfigValue::Int(i) => serde_yaml::Value::Number((*i).into()),
            ConfigValue::Float(f) => serde_yaml::Value::Number((*f).into()),
            ConfigValue::String(s) => serde_yaml::Value::String(s.clone()),
            ConfigValue::Duration(d) => {
                serde_yaml::Value::String(humantime::format_duration(*d).to_string())
            }
            ConfigValue::List(items) => {
                serde_yaml::Value::Sequence(items.iter().map(ConfigValue::to_yaml).collect())
            }
            ConfigValue::Map(map) => serde_yaml::Value::Mapping(map.to_yaml_mapping()),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

/// An ordered mapping of configuration keys to values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigMap {
    entries: IndexMap<String, ConfigValue>,
}

impl ConfigMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, returning the previous value if one existed.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) -> Option<ConfigValue> {
        self.entries.insert(key.into(), value)
    }

    /// Look up a direct child key.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Mutably look up a direct child key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigValue> {
        self.entries.get_mut(key)
    }

    /// Remove a direct child key.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.entries.shift_remove(key)
    }

    /// Whether a direct child key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ConfigValue> {
        self.entries.iter()
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Look up a dotted path (`"Services.WebDAV.ExternalURL"`).
    ///
    /// Returns `None` if any intermediate segment is missing or is not a
    /// mapping.
    pub fn get_at(&self, path: &str) -> Option<&ConfigValue> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.get(first)?;
        for segment in segments {
            current = current.as_map()?.get(segment)?;
        }
        Some(current)
    }

    /// Set a value at a dotted path, creating intermediate mappings as
    /// needed. A non-mapping intermediate value is replaced by a mapping,
    /// matching the override-wins merge semantics.
    pub fn set_at(&mut self, path: &str, value: ConfigValue) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let last = segments.pop().unwrap_or(path);

        let mut current = self;
        for segment in segments {
            let slot = current
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| ConfigValue::Map(ConfigMap::new()));
            if !matches!(slot, ConfigValue::Map(_)) {
                *slot = ConfigValue::Map(ConfigMap::new());
            }
            let ConfigValue::Map(next) = slot else {
                // normalized to a mapping just above
                return;
            };
            current = next;
        }
        current.insert(last, value);
    }

    /// Convert a parsed YAML value into a mapping. Returns `None` if the
    /// document is not a mapping (e.g. an empty file parses as null).
    pub fn from_yaml(value: serde_yaml::Value) -> Option<Self> {
        match ConfigValue::from_yaml(value) {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Convert a YAML mapping into a config mapping.
    pub fn from_yaml_mapping(mapping: serde_yaml::Mapping) -> Self {
        let mut map = ConfigMap::new();
        for (key, value) in mapping {
            map.insert(yaml_key_to_string(&key), ConfigValue::from_yaml(value));
        }
        map
    }

    /// Render to a YAML mapping.
    pub fn to_yaml_mapping(&self) -> serde_yaml::Mapping {
        self.entries
            .iter()
            .map(|(k, v)| (serde_yaml::Value::String(k.clone()), v.to_yaml()))
            .collect()
    }

    /// Render to a YAML value.
    pub fn to_yaml(&self) -> serde_yaml::Value {
        serde_yaml::Value::Mapping(self.to_yaml_mapping())
    }
}

impl fmt::Display for ConfigMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_yaml::to_string(&self.to_yaml()) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigMap {
    fn from_iter<T: IntoIterator<Item = (String, ConfigValue)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a ConfigMap {
    type Item = (&'a String, &'a ConfigValue);
    type IntoIter = indexmap::map::Iter<'a, String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for ConfigMap {
    type Item = (String, ConfigValue);
    type IntoIter = indexmap::map::IntoIter<String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

fn yaml_key_to_string(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => String::new(),
        other => {
            serde_yaml::to_string(other).map_or_else(|_| String::new(), |s| s.trim_end().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ConfigMap {
        ConfigMap::from_yaml(serde_yaml::from_str(yaml).expect("YAML should parse"))
            .expect("document should be a mapping")
    }

    #[test]
    fn test_from_yaml_scalars() {
        let map = parse("a: 1\nb: true\nc: hello\nd: ~\ne: 1.5");
        assert_eq!(map.get("a"), Some(&ConfigValue::Int(1)));
        assert_eq!(map.get("b"), Some(&ConfigValue::Bool(true)));
        assert_eq!(map.get("c"), Some(&ConfigValue::String("hello".to_string())));
        assert_eq!(map.get("d"), Some(&ConfigValue::Null));
        assert_eq!(map.get("e"), Some(&ConfigValue::Float(1.5)));
    }

    #[test]
    fn test_preserves_insertion_order() {
        let map = parse("zebra: 1\napple: 2\nmango: 3");
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, ["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_get_at_nested() {
        let map = parse("Services:\n  WebDAV:\n    ExternalURL: https://dav.example.com");
        assert_eq!(
            map.get_at("Services.WebDAV.ExternalURL").and_then(ConfigValue::as_str),
            Some("https://dav.example.com")
        );
        assert_eq!(map.get_at("Services.Missing.ExternalURL"), None);
    }

    #[test]
    fn test_get_at_through_scalar_is_none() {
        let map = parse("Services: not-a-mapping");
        assert_eq!(map.get_at("Services.WebDAV"), None);
    }

    #[test]
    fn test_set_at_creates_intermediates() {
        let mut map = ConfigMap::new();
        map.set_at("Users.AnonymousUserToken", ConfigValue::from("abc"));
        assert_eq!(
            map.get_at("Users.AnonymousUserToken").and_then(ConfigValue::as_str),
            Some("abc")
        );
    }

    #[test]
    fn test_set_at_replaces_scalar_intermediate() {
        let mut map = parse("Users: oops");
        map.set_at("Users.AnonymousUserToken", ConfigValue::from("abc"));
        assert_eq!(
            map.get_at("Users.AnonymousUserToken").and_then(ConfigValue::as_str),
            Some("abc")
        );
    }

    #[test]
    fn test_duration_renders_as_humantime() {
        let mut map = ConfigMap::new();
        map.insert("Timeout", ConfigValue::Duration(std::time::Duration::from_secs(90)));
        let yaml = serde_yaml::to_string(&map.to_yaml()).unwrap();
        assert!(yaml.contains("1m 30s"), "got: {yaml}");
    }

    #[test]
    fn test_empty_values() {
        assert!(ConfigValue::Null.is_empty_value());
        assert!(ConfigValue::String(String::new()).is_empty_value());
        assert!(!ConfigValue::String(" ".to_string()).is_empty_value());
        assert!(!ConfigValue::Bool(false).is_empty_value());
        assert!(!ConfigValue::Int(0).is_empty_value());
    }

    #[test]
    fn test_non_string_yaml_keys_are_stringified() {
        let map = parse("5: five\ntrue: yes-it-is");
        assert_eq!(map.get("5").and_then(ConfigValue::as_str), Some("five"));
        assert_eq!(map.get("true").and_then(ConfigValue::as_str), Some("yes-it-is"));
    }
}
