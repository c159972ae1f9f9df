//! Tests for `YamlConfigStore` loading and validation.
//!
//! These tests mutate `MGMT_POSTURE_CONFIG` and are serialized.

#![allow(clippy::expect_used, clippy::unwrap_used, unsafe_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use mgmt_posture::application::ports::ConfigStore;
use mgmt_posture::domain::config::ScanConfig;
use mgmt_posture::infra::config::{CONFIG_ENV_VAR, YamlConfigStore};
use serial_test::serial;

fn point_config_at(path: &Path) {
    // set_var is needed because YamlConfigStore::path() reads MGMT_POSTURE_CONFIG.
    unsafe { std::env::set_var(CONFIG_ENV_VAR, path) };
}

fn clear_config_override() {
    unsafe { std::env::remove_var(CONFIG_ENV_VAR) };
}

#[test]
#[serial]
fn env_var_overrides_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.yaml");
    point_config_at(&path);
    let resolved = YamlConfigStore.path().expect("path");
    clear_config_override();
    assert_eq!(resolved, path);
}

#[test]
#[serial]
fn default_path_is_under_config_dir() {
    clear_config_override();
    if let Ok(path) = YamlConfigStore.path() {
        assert!(path.ends_with(PathBuf::from("mgmt-posture").join("config.yaml")));
    }
}

#[test]
#[serial]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    point_config_at(&dir.path().join("absent.yaml"));
    let config = YamlConfigStore.load();
    clear_config_override();
    assert_eq!(config.expect("defaults"), ScanConfig::default());
}

#[test]
#[serial]
fn partial_file_merges_with_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "probes:\n  command_timeout_secs: 2\ncollectors:\n  command_timeout_secs: 10\nsignatures_path: /etc/mgmt-posture/signatures.yaml\n",
    )
    .unwrap();
    point_config_at(&path);
    let config = YamlConfigStore.load();
    clear_config_override();

    let config = config.expect("load");
    assert_eq!(config.command_timeout(), Duration::from_secs(2));
    assert_eq!(config.service_query_timeout(), Duration::from_secs(5));
    assert_eq!(config.collector_timeout(), Duration::from_secs(10));
    assert_eq!(
        config.signatures_path.as_deref(),
        Some(Path::new("/etc/mgmt-posture/signatures.yaml"))
    );
    assert_eq!(
        config.probes.launch_daemon_dirs,
        ScanConfig::default().probes.launch_daemon_dirs
    );
}

#[test]
#[serial]
fn zero_timeout_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "probes:\n  service_query_timeout_secs: 0\n").unwrap();
    point_config_at(&path);
    let result = YamlConfigStore.load();
    clear_config_override();

    let err = format!("{:#}", result.expect_err("invalid"));
    assert!(err.contains("invalid config"), "{err}");
    assert!(err.contains("probes.service_query_timeout_secs"), "{err}");
}

#[test]
#[serial]
fn malformed_yaml_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "probes: [not, a, map\n").unwrap();
    point_config_at(&path);
    let result = YamlConfigStore.load();
    clear_config_override();

    let err = format!("{:#}", result.expect_err("malformed"));
    assert!(err.contains("cannot parse"), "{err}");
}
