//! Launch-daemon plist lookup.

use std::path::PathBuf;

use crate::application::ports::LaunchDaemonProbe;
use crate::domain::config::ScanConfig;
use crate::domain::platform::Platform;

/// Looks for `<label>.plist` in the configured launchd directories.
///
/// Reports nothing off macOS.
#[derive(Debug, Clone)]
pub struct PlistLaunchDaemonProbe {
    dirs: Vec<PathBuf>,
    platform: Platform,
}

impl PlistLaunchDaemonProbe {
    #[must_use]
    pub fn new(dirs: Vec<PathBuf>, platform: Platform) -> Self {
        Self { dirs, platform }
    }

    #[must_use]
    pub fn from_config(config: &ScanConfig, platform: Platform) -> Self {
        Self::new(config.probes.launch_daemon_dirs.clone(), platform)
    }
}

impl LaunchDaemonProbe for PlistLaunchDaemonProbe {
    fn plist_exists(&self, label: &str) -> bool {
        if self.platform != Platform::MacOs || label.is_empty() || label.contains('/') {
            return false;
        }
        let file_name = format!("{label}.plist");
        self.dirs.iter().any(|dir| dir.join(&file_name).is_file())
    }
}
