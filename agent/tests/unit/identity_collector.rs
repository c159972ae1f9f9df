//! Tests for the per-platform identity collector with a scripted runner.

#![allow(clippy::expect_used)]

use std::time::Duration;

use mgmt_posture::application::ports::{IdentityCollector, Level};
use mgmt_posture::application::services::identity_collector::SystemIdentityCollector;
use mgmt_posture::domain::platform::Platform;
use posture_common::JoinType;

use crate::helpers::{err_output, ok_output};
use crate::mocks::{RecordingDiagnostics, Reply, ScriptedRunner};

const TIMEOUT: Duration = Duration::from_secs(5);

const DSREGCMD_HYBRID: &[u8] = b"
+----------------------------------------------------------------------+
| Device State                                                         |
+----------------------------------------------------------------------+

             AzureAdJoined : YES
          EnterpriseJoined : NO
              DomainJoined : YES
                DomainName : CONTOSO
           WorkplaceJoined : NO

                  TenantId : 12345678-1234-1234-1234-123456789abc
                    MdmUrl : https://enrollment.manage.microsoft.com/
";

const DSCONFIGAD_BOUND: &[u8] = b"Active Directory Forest          = corp.example.com
Active Directory Domain          = corp.example.com
Computer Account                 = mac01$
";

#[tokio::test]
async fn windows_parses_dsregcmd() {
    let runner = ScriptedRunner::new().on("dsregcmd /status", Reply::Output(ok_output(DSREGCMD_HYBRID)));
    let diag = RecordingDiagnostics::new();
    let id = SystemIdentityCollector::new(&runner, Platform::Windows, TIMEOUT, &diag)
        .collect_identity()
        .await
        .expect("identity");
    assert_eq!(id.source, "dsregcmd");
    assert_eq!(id.join_type, JoinType::HybridAzureAd);
    assert_eq!(id.domain_name.as_deref(), Some("CONTOSO"));
    assert_eq!(
        id.tenant_id.as_deref(),
        Some("12345678-1234-1234-1234-123456789abc")
    );
    assert_eq!(runner.calls()[0].timeout, TIMEOUT);
}

#[tokio::test]
async fn windows_dsregcmd_failures_degrade_to_error_source() {
    for reply in [
        Reply::NotFound,
        Reply::TimedOut,
        Reply::Output(err_output(1, b"access denied")),
    ] {
        let runner = ScriptedRunner::new().on("dsregcmd /status", reply);
        let diag = RecordingDiagnostics::new();
        let id = SystemIdentityCollector::new(&runner, Platform::Windows, TIMEOUT, &diag)
            .collect_identity()
            .await
            .expect("failures never surface as errors");
        assert_eq!(id.source, "dsregcmd_error");
        assert_eq!(id.join_type, JoinType::None);
        assert!(!id.azure_ad_joined && !id.domain_joined && !id.workplace_joined);
        assert!(diag.logged(Level::Warn, "dsregcmd failed"));
    }
}

#[tokio::test]
async fn macos_combines_domain_binding_and_mdm_enrollment() {
    let runner = ScriptedRunner::new()
        .on("dsconfigad -show", Reply::Output(ok_output(DSCONFIGAD_BOUND)))
        .on(
            "profiles status -type enrollment",
            Reply::Output(ok_output(b"Enrolled via DEP: Yes\nMDM enrollment: Yes (User Approved)\n")),
        );
    let diag = RecordingDiagnostics::new();
    let id = SystemIdentityCollector::new(&runner, Platform::MacOs, TIMEOUT, &diag)
        .collect_identity()
        .await
        .expect("identity");
    assert_eq!(id.source, "darwin");
    assert!(id.domain_joined);
    assert_eq!(id.domain_name.as_deref(), Some("corp.example.com"));
    assert_eq!(id.mdm_url.as_deref(), Some("enrolled"));
    assert_eq!(id.join_type, JoinType::OnPremAd);
    assert_eq!(
        runner.commands(),
        vec!["dsconfigad -show", "profiles status -type enrollment"]
    );
}

#[tokio::test]
async fn macos_command_failures_keep_defaults() {
    // dsconfigad missing (silent), profiles timing out (debug).
    let runner = ScriptedRunner::new().on("profiles status -type enrollment", Reply::TimedOut);
    let diag = RecordingDiagnostics::new();
    let id = SystemIdentityCollector::new(&runner, Platform::MacOs, TIMEOUT, &diag)
        .collect_identity()
        .await
        .expect("identity");
    assert_eq!(id.source, "darwin");
    assert_eq!(id.join_type, JoinType::None);
    assert!(!id.domain_joined);
    assert!(id.mdm_url.is_none());
    assert!(!diag.logged(Level::Debug, "dsconfigad"));
    assert!(diag.logged(Level::Debug, "profiles status failed"));
    assert!(diag.at(Level::Warn).is_empty());
}

#[tokio::test]
async fn macos_unenrolled_has_no_mdm_url() {
    let runner = ScriptedRunner::new()
        .on("dsconfigad -show", Reply::Output(ok_output(b"")))
        .on(
            "profiles status -type enrollment",
            Reply::Output(ok_output(b"Enrolled via DEP: No\nMDM enrollment: No\n")),
        );
    let diag = RecordingDiagnostics::new();
    let id = SystemIdentityCollector::new(&runner, Platform::MacOs, TIMEOUT, &diag)
        .collect_identity()
        .await
        .expect("identity");
    assert!(id.mdm_url.is_none());
    assert!(!id.domain_joined);
}

#[tokio::test]
async fn other_platforms_are_unsupported() {
    for platform in [Platform::Linux, Platform::Other("freebsd")] {
        let runner = ScriptedRunner::new();
        let diag = RecordingDiagnostics::new();
        let id = SystemIdentityCollector::new(&runner, platform, TIMEOUT, &diag)
            .collect_identity()
            .await
            .expect("identity");
        assert_eq!(id.source, "unsupported");
        assert_eq!(id.join_type, JoinType::None);
        assert!(runner.calls().is_empty());
    }
}
