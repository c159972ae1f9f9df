//! Tests for the plist-backed launch-daemon probe.

#![allow(clippy::expect_used)]

use mgmt_posture::application::ports::LaunchDaemonProbe;
use mgmt_posture::domain::config::ScanConfig;
use mgmt_posture::domain::platform::Platform;
use mgmt_posture::infra::launch_daemon::PlistLaunchDaemonProbe;
use tempfile::TempDir;

fn daemon_dirs() -> (TempDir, TempDir) {
    let daemons = tempfile::tempdir().expect("tempdir");
    let agents = tempfile::tempdir().expect("tempdir");
    std::fs::write(daemons.path().join("com.jamf.management.daemon.plist"), b"").expect("write");
    std::fs::write(agents.path().join("com.addigy.agent.plist"), b"").expect("write");
    std::fs::create_dir(daemons.path().join("com.directory.plist")).expect("mkdir");
    (daemons, agents)
}

#[test]
fn finds_plists_in_any_configured_directory() {
    let (daemons, agents) = daemon_dirs();
    let probe = PlistLaunchDaemonProbe::new(
        vec![daemons.path().to_path_buf(), agents.path().to_path_buf()],
        Platform::MacOs,
    );
    assert!(probe.plist_exists("com.jamf.management.daemon"));
    assert!(probe.plist_exists("com.addigy.agent"));
    assert!(!probe.plist_exists("com.absent"));
}

#[test]
fn rejects_directories_and_unsafe_labels() {
    let (daemons, _agents) = daemon_dirs();
    let probe = PlistLaunchDaemonProbe::new(vec![daemons.path().to_path_buf()], Platform::MacOs);
    assert!(!probe.plist_exists("com.directory"));
    assert!(!probe.plist_exists(""));
    assert!(!probe.plist_exists("../com.jamf.management.daemon"));
}

#[test]
fn reports_nothing_off_macos() {
    let (daemons, _agents) = daemon_dirs();
    for platform in [Platform::Linux, Platform::Windows] {
        let probe = PlistLaunchDaemonProbe::new(vec![daemons.path().to_path_buf()], platform);
        assert!(!probe.plist_exists("com.jamf.management.daemon"));
    }
}

#[test]
fn from_config_uses_configured_directories() {
    let (daemons, _agents) = daemon_dirs();
    let mut config = ScanConfig::default();
    config.probes.launch_daemon_dirs = vec![daemons.path().to_path_buf()];
    let probe = PlistLaunchDaemonProbe::from_config(&config, Platform::MacOs);
    assert!(probe.plist_exists("com.jamf.management.daemon"));
}
