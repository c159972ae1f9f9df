//! Policy-enrollment parsers and detection builders.

use std::sync::LazyLock;

use posture_common::{Detection, DetectionStatus};
use regex::Regex;

use crate::domain::registry::{RegistryHive, RegistryPath};

/// Detection name for installed macOS configuration profiles.
pub const PROFILES_DETECTION: &str = "macOS Configuration Profiles";
/// Detection name for applied Group Policy objects.
pub const GROUP_POLICY_DETECTION: &str = "Group Policy";
/// Detection name for the Configuration Manager client.
pub const SCCM_DETECTION: &str = "SCCM/MECM";

/// HKLM tree holding one subkey per applied GPO extension.
pub const GROUP_POLICY_HISTORY_SUBPATH: &str =
    r"SOFTWARE\Microsoft\Windows\CurrentVersion\Group Policy\History";
/// HKLM key created by the Configuration Manager client.
pub const SCCM_CLIENT_SUBPATH: &str = r"SOFTWARE\Microsoft\CCM";

const VERIFIED_MARKER: &str = "(verified)";

// Matched against lowercased output.
static PROFILE_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s+configuration profiles?\s+installed").expect("valid regex")
});

/// Profiles found in `profiles list` output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileInventory {
    /// Count from the summary line, or the identifier count when absent.
    pub count: usize,
    /// Profile identifiers with any `(verified)` marker removed.
    pub identifiers: Vec<String>,
}

impl ProfileInventory {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.identifiers.is_empty()
    }
}

/// Extract the profile count and identifiers from `profiles list` output.
#[must_use]
pub fn profile_inventory(output: &str) -> ProfileInventory {
    let lower = output.to_lowercase();
    let stated = PROFILE_COUNT_RE
        .captures(&lower)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .unwrap_or(0);

    let identifiers: Vec<String> = output
        .lines()
        .map(str::trim)
        .filter(|line| line.contains("Profile Identifier"))
        .filter_map(|line| line.split_once(':'))
        .map(|(_, value)| strip_verified(value.trim()))
        .filter(|id| !id.is_empty())
        .collect();

    let count = if stated == 0 { identifiers.len() } else { stated };
    ProfileInventory { count, identifiers }
}

/// Policy detections for `profiles list` output; empty when nothing is installed.
#[must_use]
pub fn parse_profiles_output(output: &str) -> Vec<Detection> {
    let inventory = profile_inventory(output);
    if inventory.is_empty() {
        return Vec::new();
    }
    vec![
        Detection::new(PROFILES_DETECTION, DetectionStatus::Active)
            .with_detail("profileCount", inventory.count)
            .with_detail("profiles", inventory.identifiers),
    ]
}

/// Group Policy detection, present only when at least one GPO history subkey exists.
#[must_use]
pub fn group_policy_detection(subkey_count: usize) -> Option<Detection> {
    (subkey_count > 0).then(|| {
        Detection::new(GROUP_POLICY_DETECTION, DetectionStatus::Active)
            .with_detail("gpoCount", subkey_count)
    })
}

/// Configuration Manager detection for an existing client key.
#[must_use]
pub fn sccm_detection(subkey_count: usize) -> Detection {
    Detection::new(SCCM_DETECTION, DetectionStatus::Active).with_detail("subkeyCount", subkey_count)
}

#[must_use]
pub fn group_policy_history_key() -> RegistryPath {
    RegistryPath {
        hive: RegistryHive::LocalMachine,
        subpath: GROUP_POLICY_HISTORY_SUBPATH.to_string(),
    }
}

#[must_use]
pub fn sccm_client_key() -> RegistryPath {
    RegistryPath {
        hive: RegistryHive::LocalMachine,
        subpath: SCCM_CLIENT_SUBPATH.to_string(),
    }
}

fn strip_verified(value: &str) -> String {
    value
        .strip_suffix(VERIFIED_MARKER)
        .unwrap_or(value)
        .trim()
        .to_string()
}

// ── Unit tests ────────────────────────────────────────────────────────────────
