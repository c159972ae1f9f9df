use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity source tag for parsed `dsregcmd /status` output.
pub const SOURCE_DSREGCMD: &str = "dsregcmd";
/// Identity source tag when `dsregcmd` could not be run.
pub const SOURCE_DSREGCMD_ERROR: &str = "dsregcmd_error";
/// Identity source tag for macOS directory/enrollment queries.
pub const SOURCE_DARWIN: &str = "darwin";
/// Identity source tag for platforms without an identity collector.
pub const SOURCE_UNSUPPORTED: &str = "unsupported";
/// Identity source tag when the identity collector faulted.
pub const SOURCE_UNAVAILABLE: &str = "unavailable";

/// Management tool category. Serialized names are the report's map keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Mdm,
    Rmm,
    RemoteAccess,
    EndpointSecurity,
    PolicyEngine,
    Backup,
    IdentityMfa,
    Siem,
    DnsFiltering,
    ZeroTrustVpn,
    PatchManagement,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Mdm,
        Self::Rmm,
        Self::RemoteAccess,
        Self::EndpointSecurity,
        Self::PolicyEngine,
        Self::Backup,
        Self::IdentityMfa,
        Self::Siem,
        Self::DnsFiltering,
        Self::ZeroTrustVpn,
        Self::PatchManagement,
    ];

    /// Wire key of the category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mdm => "mdm",
            Self::Rmm => "rmm",
            Self::RemoteAccess => "remoteAccess",
            Self::EndpointSecurity => "endpointSecurity",
            Self::PolicyEngine => "policyEngine",
            Self::Backup => "backup",
            Self::IdentityMfa => "identityMfa",
            Self::Siem => "siem",
            Self::DnsFiltering => "dnsFiltering",
            Self::ZeroTrustVpn => "zeroTrustVpn",
            Self::PatchManagement => "patchManagement",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a detected tool is running or merely present.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DetectionStatus {
    Active,
    #[default]
    Installed,
    Unknown,
}

/// A detected management tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub status: DetectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl Detection {
    #[must_use]
    pub fn new(name: impl Into<String>, status: DetectionStatus) -> Self {
        Self {
            name: name.into(),
            version: None,
            status,
            service_name: None,
            details: BTreeMap::new(),
        }
    }

    /// Attach a detail entry.
    #[must_use]
    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}

/// Directory join classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum JoinType {
    HybridAzureAd,
    AzureAd,
    OnPremAd,
    Workplace,
    #[default]
    None,
}

impl JoinType {
    /// Derive the join type from the three join flags.
    ///
    /// Priority: hybrid (Azure AD and domain) > Azure AD > on-prem AD >
    /// workplace > none.
    #[must_use]
    pub fn from_flags(azure_ad_joined: bool, domain_joined: bool, workplace_joined: bool) -> Self {
        match (azure_ad_joined, domain_joined, workplace_joined) {
            (true, true, _) => Self::HybridAzureAd,
            (true, false, _) => Self::AzureAd,
            (false, true, _) => Self::OnPremAd,
            (false, false, true) => Self::Workplace,
            (false, false, false) => Self::None,
        }
    }
}

/// Directory/join posture of the device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)] // three independent join flags are the wire contract
pub struct IdentityStatus {
    pub join_type: JoinType,
    pub azure_ad_joined: bool,
    pub domain_joined: bool,
    pub workplace_joined: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mdm_url: Option<String>,
    pub source: String,
}

impl IdentityStatus {
    /// An identity with no join flags set, tagged with `source`.
    #[must_use]
    pub fn unjoined(source: &str) -> Self {
        Self {
            join_type: JoinType::None,
            azure_ad_joined: false,
            domain_joined: false,
            workplace_joined: false,
            domain_name: None,
            tenant_id: None,
            mdm_url: None,
            source: source.to_string(),
        }
    }

    /// Recompute `join_type` from the join flags.
    pub fn refresh_join_type(&mut self) {
        self.join_type =
            JoinType::from_flags(self.azure_ad_joined, self.domain_joined, self.workplace_joined);
    }
}

impl Default for IdentityStatus {
    fn default() -> Self {
        Self::unjoined(SOURCE_UNAVAILABLE)
    }
}

/// Result of one management posture scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManagementPosture {
    pub collected_at: DateTime<Utc>,
    pub scan_duration_ms: u64,
    pub categories: BTreeMap<Category, Vec<Detection>>,
    pub identity: IdentityStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ManagementPosture {
    /// Total detections across all categories.
    #[must_use]
    pub fn detection_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Detections recorded under `category`, empty if none.
    #[must_use]
    pub fn detections(&self, category: Category) -> &[Detection] {
        self.categories.get(&category).map_or(&[], Vec::as_slice)
    }
}
