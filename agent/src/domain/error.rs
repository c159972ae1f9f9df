//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator. Ports return `anyhow::Result`; callers that need to
//! branch on a failure kind downcast to these types.

use std::time::Duration;

use posture_common::Category;
use thiserror::Error;

// ── Command errors ────────────────────────────────────────────────────────────

/// Failures of a bounded external command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to spawn {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {}s", .timeout.as_secs())]
    TimedOut { program: String, timeout: Duration },
}

impl CommandError {
    /// True when the executable does not exist on this host.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }
}

// ── Collector faults ──────────────────────────────────────────────────────────

/// An unexpected fault inside a deep collector, caught at its task boundary.
///
/// The `Display` form is the string appended to the report's `errors` list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollectorFault {
    #[error("{task} detection failed: {reason}")]
    Failed { task: &'static str, reason: String },

    #[error("{task} detection panic: {message}")]
    Panicked { task: &'static str, message: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Invalid scan configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be greater than zero")]
    ZeroTimeout { key: &'static str },

    #[error("probes.launch_daemon_dirs must list at least one directory")]
    NoLaunchDaemonDirs,
}

// ── Signature database errors ─────────────────────────────────────────────────

/// Structural problems that reject a signature database.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature #{index} has an empty name")]
    MissingName { index: usize },

    #[error("signature '{name}' lists no operating systems")]
    MissingOs { name: String },

    #[error("signature '{name}' has no checks")]
    NoChecks { name: String },

    #[error("duplicate signature '{name}' in category {category}")]
    Duplicate { name: String, category: Category },
}
