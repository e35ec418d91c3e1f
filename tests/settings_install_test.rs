//! End-to-end install into the process-wide settings store.
//!
//! Lives in its own test binary: the store is a process-wide OnceLock and
//! can only be installed once.

mod common;

use std::fs;

use tempfile::TempDir;

use common::FakeSource;
use tessera_config::application::bootstrap;
use tessera_config::domain::errors::ConfigError;
use tessera_config::domain::models::value::ConfigValue;
use tessera_config::infrastructure::options::LoaderOptions;
use tessera_config::infrastructure::settings;

#[tokio::test]
async fn test_install_populates_store_and_secret_slot() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("application.yml"),
        "\
common:
  api_base_url: https://api.example.com/
  secret_key_base: install-test-secret
  site_name: Install Site
  old_plugin_flag: true
",
    )
    .unwrap();
    let options = LoaderOptions {
        dump_command: "unused".to_string(),
        config_dir: dir.path().to_path_buf(),
        environment: "production".to_string(),
    };

    assert!(settings::try_get().is_none(), "nothing installed before bootstrap");

    let installed = bootstrap::install(&FakeSource::default(), &options)
        .await
        .expect("install succeeds");

    assert_eq!(
        installed.get("Workbench.SiteName").and_then(ConfigValue::as_str),
        Some("Install Site")
    );
    assert_eq!(installed.secret_key_base().expose(), "install-test-secret");
    assert!(
        !format!("{installed:?}").contains("install-test-secret"),
        "secret must not leak through Debug"
    );
    assert_eq!(
        installed.remaining().get("old_plugin_flag"),
        Some(&ConfigValue::Bool(true)),
        "unmigrated legacy keys stay reachable"
    );
    assert!(settings::try_get().is_some());

    // A second install attempt fails; the store is set-once.
    let err = bootstrap::install(&FakeSource::default(), &options).await.unwrap_err();
    assert!(matches!(err, ConfigError::AlreadyInstalled));
}
