//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `posture_common`, never
//! from `crate::infra`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use posture_common::{Detection, IdentityStatus, Signature};

use crate::domain::config::ScanConfig;
use crate::domain::registry::RegistryPath;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`](crate::domain::error::CommandError) if the
    /// process cannot be spawned or exceeds `timeout`. On timeout, the child
    /// process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Host Probe Ports ──────────────────────────────────────────────────────────

/// OS service-manager queries.
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    /// Whether the named service is currently running.
    ///
    /// # Errors
    ///
    /// Returns an error if the service manager cannot be queried or does not
    /// know the service.
    async fn is_running(&self, name: &str) -> Result<bool>;
}

/// Read-only registry access.
#[allow(async_fn_in_trait)]
pub trait RegistryProbe {
    /// Whether the key can be opened for reading.
    async fn key_exists(&self, key: &RegistryPath) -> Result<bool>;
    /// Direct subkey names of `key`, or `None` when the key does not exist.
    async fn subkey_names(&self, key: &RegistryPath) -> Result<Option<Vec<String>>>;
}

/// Launch daemon/agent property-list lookup.
pub trait LaunchDaemonProbe {
    /// True when `<label>.plist` exists in a launch-daemon directory.
    fn plist_exists(&self, label: &str) -> bool;
}

/// Filesystem existence checks.
pub trait FileProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Composite trait: everything the probe evaluator touches on the host.
pub trait HostProbes:
    CommandRunner + ServiceManager + RegistryProbe + LaunchDaemonProbe + FileProbe
{
}

/// Blanket implementation: any type implementing all five sub-traits is `HostProbes`.
impl<T> HostProbes for T where
    T: CommandRunner + ServiceManager + RegistryProbe + LaunchDaemonProbe + FileProbe
{
}

// ── Process Listing Port ──────────────────────────────────────────────────────

/// One row of the OS process table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    /// `None` when the name could not be read.
    pub name: Option<String>,
}

/// Enumerates running processes.
pub trait ProcessSource {
    /// List every process visible to this user.
    ///
    /// # Errors
    ///
    /// Returns an error if the process table cannot be enumerated at all.
    fn list_processes(&self) -> Result<Vec<ProcessEntry>>;
}

// ── Deep Collector Ports ──────────────────────────────────────────────────────

/// Directory-join status of the device.
#[allow(async_fn_in_trait)]
pub trait IdentityCollector {
    /// Collect the identity status.
    ///
    /// Command failures resolve to a defaulted status; an `Err` is reserved
    /// for faults the collector cannot interpret.
    async fn collect_identity(&self) -> Result<IdentityStatus>;
}

/// Policy-enrollment signals (Group Policy, Configuration Manager, profiles).
#[allow(async_fn_in_trait)]
pub trait PolicyCollector {
    /// Collect policy detections; empty when nothing is enrolled.
    async fn collect_policies(&self) -> Result<Vec<Detection>>;
}

// ── Diagnostics Port ──────────────────────────────────────────────────────────

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

/// Receives diagnostics from scan components. Sync trait, no async needed.
pub trait DiagnosticsSink: Send + Sync {
    /// Record one message from `component`.
    fn emit(&self, level: Level, component: &'static str, message: &str);

    fn debug(&self, component: &'static str, message: &str) {
        self.emit(Level::Debug, component, message);
    }

    fn info(&self, component: &'static str, message: &str) {
        self.emit(Level::Info, component, message);
    }

    fn warn(&self, component: &'static str, message: &str) {
        self.emit(Level::Warn, component, message);
    }

    fn error(&self, component: &'static str, message: &str) {
        self.emit(Level::Error, component, message);
    }
}

// ── Configuration Ports ───────────────────────────────────────────────────────

/// Abstracts scan configuration loading.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored configuration cannot be read or parsed.
    fn load(&self) -> Result<ScanConfig>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration directory can be determined.
    fn path(&self) -> Result<PathBuf>;
}

/// Abstracts loading of the signature database.
pub trait SignatureSource {
    /// Load and validate every signature.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be read, parsed or validated.
    fn load(&self) -> Result<Vec<Signature>>;
}
