//! Process-wide settings store.
//!
//! The validated configuration is installed once at startup and read for the
//! lifetime of the process. The secret key lives in a separate slot whose
//! debug output is redacted so it cannot leak through logging.

use std::fmt;
use std::sync::OnceLock;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::value::{ConfigMap, ConfigValue};

/// A string that never renders its contents.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the secret. Call sites should be few.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the secret is unset.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString(***)")
    }
}

/// The installed application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    active: ConfigMap,
    remaining: ConfigMap,
    cluster_id: String,
    secret_key_base: SecretString,
}

impl Settings {
    /// Assemble settings from the validated active snapshot, the unconsumed
    /// legacy keys, and the cluster identifier. The secret key is pulled out
    /// of `Workbench.SecretKeyBase`.
    pub fn new(active: ConfigMap, remaining: ConfigMap, cluster_id: impl Into<String>) -> Self {
        let secret_key_base = SecretString::new(
            active
                .get_at("Workbench.SecretKeyBase")
                .and_then(ConfigValue::as_str)
                .unwrap_or_default(),
        );
        Self { active, remaining, cluster_id: cluster_id.into(), secret_key_base }
    }

    /// The validated, fully merged configuration.
    pub fn active(&self) -> &ConfigMap {
        &self.active
    }

    /// Legacy keys that no declaration consumed, kept reachable for
    /// application code that has not migrated yet.
    pub fn remaining(&self) -> &ConfigMap {
        &self.remaining
    }

    /// Identifier of the configured cluster.
    pub fn cluster_id(&self) -> &str {
        &self.cluster_id
    }

    /// The session secret.
    pub fn secret_key_base(&self) -> &SecretString {
        &self.secret_key_base
    }

    /// Look up a dotted path in the active configuration.
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        self.active.get_at(path)
    }
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Install settings for the process. Fails if called twice.
pub fn install(settings: Settings) -> ConfigResult<&'static Settings> {
    let mut stored = false;
    let installed = SETTINGS.get_or_init(|| {
        stored = true;
        settings
    });
    if stored {
        Ok(installed)
    } else {
        Err(ConfigError::AlreadyInstalled)
    }
}

/// The installed settings, if startup has completed.
pub fn try_get() -> Option<&'static Settings> {
    SETTINGS.get()
}
