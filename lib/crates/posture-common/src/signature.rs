// lib/crates/posture-common/src/signature.rs

use serde::{Deserialize, Serialize};

use crate::types::Category;

/// Kind of system probe a [`Check`] performs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    FileExists,
    ServiceRunning,
    ProcessRunning,
    RegistryValue,
    Command,
    LaunchDaemon,
    /// Any kind string this engine does not recognise (e.g. `config_value`).
    /// Always evaluates to false.
    #[serde(other)]
    Unknown,
}

impl CheckKind {
    /// Wire name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileExists => "file_exists",
            Self::ServiceRunning => "service_running",
            Self::ProcessRunning => "process_running",
            Self::RegistryValue => "registry_value",
            Self::Command => "command",
            Self::LaunchDaemon => "launch_daemon",
            Self::Unknown => "unknown",
        }
    }

    /// Whether a match on this kind proves the tool is currently running.
    #[must_use]
    pub fn reveals_active_state(self) -> bool {
        matches!(self, Self::ServiceRunning | Self::ProcessRunning)
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detection probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Check {
    #[serde(rename = "type")]
    pub kind: CheckKind,
    pub value: String,
    /// Substring that must appear in command output (command checks only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse: Option<String>,
    /// OS guard, using signature OS names (`windows`, `darwin`, `linux`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
}

impl Check {
    #[must_use]
    pub fn new(kind: CheckKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            parse: None,
            os: None,
        }
    }

    /// Require `substring` in the combined output of a command check.
    #[must_use]
    pub fn with_parse(mut self, substring: impl Into<String>) -> Self {
        self.parse = Some(substring.into());
        self
    }

    /// Restrict the check to one OS.
    #[must_use]
    pub fn on_os(mut self, os: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self
    }

    /// The OS guard, if one is set. An empty guard counts as none.
    #[must_use]
    pub fn guard(&self) -> Option<&str> {
        self.os.as_deref().filter(|guard| !guard.is_empty())
    }

    /// True when the check has no OS guard or the guard names `os`.
    #[must_use]
    pub fn applies_to(&self, os: &str) -> bool {
        self.guard().is_none_or(|guard| guard == os)
    }
}

/// How to detect one management tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub category: Category,
    pub os: Vec<String>,
    pub checks: Vec<Check>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Check>,
}

impl Signature {
    /// True if the signature applies to the given OS name.
    #[must_use]
    pub fn matches_os(&self, os: &str) -> bool {
        self.os.iter().any(|o| o == os)
    }
}

/// Top-level layout of a signature database file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignatureDatabase {
    #[serde(default)]
    pub signatures: Vec<Signature>,
}
