//! Parsers for directory-join diagnostics.
//!
//! Pure functions: command output in, identity facts out.

use posture_common::{IdentityStatus, SOURCE_DSREGCMD};

/// Phrase `dsconfigad -show` prints when the Mac is bound to a domain.
pub const AD_DOMAIN_MARKER: &str = "Active Directory Domain";

/// `mdm_url` value recorded when macOS reports MDM enrollment without a URL.
pub const MDM_ENROLLED: &str = "enrolled";

const MDM_ENROLLMENT_PHRASES: &[&str] = &["enrolled to an mdm server", "mdm enrollment: yes"];

/// Parse `dsregcmd /status` output.
///
/// Lines are `Key : Value` pairs in any order; lines without the ` : `
/// separator are ignored.
#[must_use]
pub fn parse_dsregcmd_output(output: &str) -> IdentityStatus {
    let mut id = IdentityStatus::unjoined(SOURCE_DSREGCMD);
    for line in output.lines() {
        let Some((key, value)) = line.trim().split_once(" : ") else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "AzureAdJoined" => id.azure_ad_joined = value.eq_ignore_ascii_case("YES"),
            "DomainJoined" => id.domain_joined = value.eq_ignore_ascii_case("YES"),
            "WorkplaceJoined" => id.workplace_joined = value.eq_ignore_ascii_case("YES"),
            "DomainName" => id.domain_name = non_empty(value),
            "TenantId" => id.tenant_id = non_empty(value),
            "MdmUrl" => id.mdm_url = non_empty(value),
            _ => {}
        }
    }
    id.refresh_join_type();
    id
}

/// Domain binding reported by `dsconfigad -show`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryBinding {
    pub domain_joined: bool,
    pub domain_name: Option<String>,
}

/// Parse `dsconfigad -show` output.
#[must_use]
pub fn parse_dsconfigad_output(output: &str) -> DirectoryBinding {
    if !output.contains(AD_DOMAIN_MARKER) {
        return DirectoryBinding::default();
    }
    let domain_name = output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(AD_DOMAIN_MARKER))
        .filter_map(|line| line.split_once('='))
        .filter_map(|(_, name)| non_empty(name.trim()))
        .last();
    DirectoryBinding {
        domain_joined: true,
        domain_name,
    }
}

/// True when `profiles status -type enrollment` reports MDM enrollment.
#[must_use]
pub fn is_mdm_enrolled(output: &str) -> bool {
    let lower = output.to_lowercase();
    MDM_ENROLLMENT_PHRASES
        .iter()
        .any(|phrase| lower.contains(phrase))
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

// ── Unit tests ────────────────────────────────────────────────────────────────
