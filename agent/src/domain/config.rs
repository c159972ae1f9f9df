//! Scan configuration schema and validation.
//!
//! Pure types only: loading lives in `infra::config`.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Default deadline for every bounded probe or collector command.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Directories searched for `<label>.plist` by launch-daemon checks.
pub const DEFAULT_LAUNCH_DAEMON_DIRS: &[&str] = &["/Library/LaunchDaemons", "/Library/LaunchAgents"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level scan configuration (`config.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// Probe evaluator settings.
    pub probes: ProbeConfig,
    /// Deep collector settings.
    pub collectors: CollectorConfig,
    /// Signature database location; the caller supplies signatures when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signatures_path: Option<PathBuf>,
}

/// Settings for individual checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProbeConfig {
    /// Deadline for `command` checks.
    pub command_timeout_secs: u64,
    /// Deadline for service-manager queries.
    pub service_query_timeout_secs: u64,
    /// Deadline for registry queries.
    pub registry_query_timeout_secs: u64,
    /// Directories searched by `launch_daemon` checks.
    pub launch_daemon_dirs: Vec<PathBuf>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: DEFAULT_TIMEOUT_SECS,
            service_query_timeout_secs: DEFAULT_TIMEOUT_SECS,
            registry_query_timeout_secs: DEFAULT_TIMEOUT_SECS,
            launch_daemon_dirs: DEFAULT_LAUNCH_DAEMON_DIRS
                .iter()
                .map(PathBuf::from)
                .collect(),
        }
    }
}

/// Settings for the identity and policy collectors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CollectorConfig {
    /// Deadline for each collector command.
    pub command_timeout_secs: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ScanConfig {
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.probes.command_timeout_secs)
    }

    #[must_use]
    pub fn service_query_timeout(&self) -> Duration {
        Duration::from_secs(self.probes.service_query_timeout_secs)
    }

    #[must_use]
    pub fn registry_query_timeout(&self) -> Duration {
        Duration::from_secs(self.probes.registry_query_timeout_secs)
    }

    #[must_use]
    pub fn collector_timeout(&self) -> Duration {
        Duration::from_secs(self.collectors.command_timeout_secs)
    }

    /// Reject settings that would make every bounded call fail immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if any timeout is zero or no launch-daemon directory
    /// is configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timeouts = [
            ("probes.command_timeout_secs", self.probes.command_timeout_secs),
            (
                "probes.service_query_timeout_secs",
                self.probes.service_query_timeout_secs,
            ),
            (
                "probes.registry_query_timeout_secs",
                self.probes.registry_query_timeout_secs,
            ),
            (
                "collectors.command_timeout_secs",
                self.collectors.command_timeout_secs,
            ),
        ];
        if let Some((key, _)) = timeouts.into_iter().find(|&(_, secs)| secs == 0) {
            return Err(ConfigError::ZeroTimeout { key });
        }
        if self.probes.launch_daemon_dirs.is_empty() {
            return Err(ConfigError::NoLaunchDaemonDirs);
        }
        Ok(())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
