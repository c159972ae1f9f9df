//! Tests for single-check evaluation against a fake host.

#![allow(clippy::expect_used)]

use std::time::Duration;

use mgmt_posture::application::ports::Level;
use mgmt_posture::application::services::probe_evaluator::ProbeEvaluator;
use mgmt_posture::application::services::process_snapshot::ProcessSnapshot;
use mgmt_posture::domain::platform::Platform;
use posture_common::{Check, CheckKind};

use crate::helpers::{err_output, ok_output, ok_output_with_stderr};
use crate::mocks::{FakeHost, Reply, RecordingDiagnostics};

const TIMEOUT: Duration = Duration::from_secs(5);

async fn eval(host: &FakeHost, platform: Platform, check: &Check) -> (bool, RecordingDiagnostics) {
    let snapshot = ProcessSnapshot::from_names(["falcond", "ninjarmmagent.exe"]);
    let diag = RecordingDiagnostics::new();
    let matched = ProbeEvaluator::new(host, &snapshot, platform, TIMEOUT, &diag)
        .evaluate(check)
        .await;
    (matched, diag)
}

// ── OS guard ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn os_guard_mismatch_skips_the_probe() {
    let host = FakeHost::new().with_file("/opt/agent");
    let check = Check::new(CheckKind::FileExists, "/opt/agent").on_os("windows");
    let (matched, _) = eval(&host, Platform::Linux, &check).await;
    assert!(!matched);
    assert!(host.probes().is_empty(), "guarded check must not touch the host");
}

#[tokio::test]
async fn os_guard_match_evaluates() {
    let host = FakeHost::new().with_file("/opt/agent");
    let check = Check::new(CheckKind::FileExists, "/opt/agent").on_os("linux");
    assert!(eval(&host, Platform::Linux, &check).await.0);
}

#[tokio::test]
async fn empty_os_guard_is_no_guard() {
    let host = FakeHost::new().with_file("/opt/agent");
    let check = Check::new(CheckKind::FileExists, "/opt/agent").on_os("");
    assert!(eval(&host, Platform::Linux, &check).await.0);
    assert!(eval(&host, Platform::Windows, &check).await.0);
}

// ── Per-kind dispatch ────────────────────────────────────────────────────────

#[tokio::test]
async fn file_exists() {
    let host = FakeHost::new().with_file("/Applications/Jamf.app");
    let present = Check::new(CheckKind::FileExists, "/Applications/Jamf.app");
    let absent = Check::new(CheckKind::FileExists, "/Applications/Other.app");
    assert!(eval(&host, Platform::MacOs, &present).await.0);
    assert!(!eval(&host, Platform::MacOs, &absent).await.0);
}

#[tokio::test]
async fn service_running_and_query_failure() {
    let host = FakeHost::new()
        .with_running_service("Sense")
        .with_broken_service("WinDefend");
    assert!(
        eval(&host, Platform::Windows, &Check::new(CheckKind::ServiceRunning, "Sense"))
            .await
            .0
    );
    let (matched, diag) = eval(
        &host,
        Platform::Windows,
        &Check::new(CheckKind::ServiceRunning, "WinDefend"),
    )
    .await;
    assert!(!matched);
    assert!(diag.logged(Level::Debug, "WinDefend"));
}

#[tokio::test]
async fn process_running_uses_snapshot_only() {
    let host = FakeHost::new();
    let check = Check::new(CheckKind::ProcessRunning, "NinjaRMMAgent.exe");
    assert!(eval(&host, Platform::Windows, &check).await.0);
    assert!(host.probes().is_empty());
    assert!(
        !eval(&host, Platform::Windows, &Check::new(CheckKind::ProcessRunning, "absent.exe"))
            .await
            .0
    );
}

#[tokio::test]
async fn registry_value_on_windows() {
    let host = FakeHost::new().with_registry_key(r"HKLM\SOFTWARE\LabTech\Service", &[]);
    let long_alias = Check::new(
        CheckKind::RegistryValue,
        r"HKEY_LOCAL_MACHINE\SOFTWARE\LabTech\Service",
    );
    assert!(eval(&host, Platform::Windows, &long_alias).await.0);
    let missing = Check::new(CheckKind::RegistryValue, r"HKLM\SOFTWARE\Nothing");
    assert!(!eval(&host, Platform::Windows, &missing).await.0);
}

#[tokio::test]
async fn registry_value_rejects_bad_paths_and_other_platforms() {
    let host = FakeHost::new().with_registry_key(r"HKLM\SOFTWARE\LabTech\Service", &[]);
    let unknown_hive = Check::new(CheckKind::RegistryValue, r"HKU\SOFTWARE\LabTech\Service");
    let no_separator = Check::new(CheckKind::RegistryValue, "HKLM");
    assert!(!eval(&host, Platform::Windows, &unknown_hive).await.0);
    assert!(!eval(&host, Platform::Windows, &no_separator).await.0);

    let valid = Check::new(CheckKind::RegistryValue, r"HKLM\SOFTWARE\LabTech\Service");
    assert!(!eval(&host, Platform::MacOs, &valid).await.0);
    assert!(host.probes().is_empty());
}

#[tokio::test]
async fn registry_error_is_a_miss() {
    let host = FakeHost::new().with_broken_registry();
    let check = Check::new(CheckKind::RegistryValue, r"HKLM\SOFTWARE\CrowdStrike");
    assert!(!eval(&host, Platform::Windows, &check).await.0);
}

#[tokio::test]
async fn launch_daemon_only_on_macos() {
    let host = FakeHost::new().with_plist("com.jamf.management.daemon");
    let check = Check::new(CheckKind::LaunchDaemon, "com.jamf.management.daemon");
    assert!(eval(&host, Platform::MacOs, &check).await.0);
    assert!(!eval(&host, Platform::Linux, &check).await.0);
}

#[tokio::test]
async fn unknown_kind_is_false_and_logged() {
    let host = FakeHost::new();
    let (matched, diag) = eval(
        &host,
        Platform::Linux,
        &Check::new(CheckKind::Unknown, "legacy.setting"),
    )
    .await;
    assert!(!matched);
    assert!(diag.logged(Level::Warn, "unknown check type"));
}

// ── Command checks ───────────────────────────────────────────────────────────

#[tokio::test]
async fn command_success_without_parse() {
    let host = FakeHost::new().with_command("fdesetup status", Reply::Output(ok_output(b"")));
    let check = Check::new(CheckKind::Command, "fdesetup   status");
    assert!(eval(&host, Platform::MacOs, &check).await.0);
    let calls = host.runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].command, "fdesetup status");
    assert_eq!(calls[0].timeout, TIMEOUT);
}

#[tokio::test]
async fn command_parse_searches_combined_output() {
    let host = FakeHost::new().with_command(
        "tool --version",
        Reply::Output(ok_output_with_stderr(b"tool 1.0\n", b"Managed by Acme\n")),
    );
    let hit = Check::new(CheckKind::Command, "tool --version").with_parse("Managed by Acme");
    let miss = Check::new(CheckKind::Command, "tool --version").with_parse("Managed by Other");
    assert!(eval(&host, Platform::Linux, &hit).await.0);
    assert!(!eval(&host, Platform::Linux, &miss).await.0);
}

#[tokio::test]
async fn command_nonzero_exit_is_false() {
    let host = FakeHost::new().with_command(
        "tool --status",
        Reply::Output(err_output(1, b"Managed by Acme")),
    );
    let check = Check::new(CheckKind::Command, "tool --status").with_parse("Acme");
    assert!(!eval(&host, Platform::Linux, &check).await.0);
}

#[tokio::test]
async fn empty_command_runs_nothing() {
    let host = FakeHost::new();
    let check = Check::new(CheckKind::Command, "   ");
    assert!(!eval(&host, Platform::Linux, &check).await.0);
    assert!(host.runner.calls().is_empty());
}

#[tokio::test]
async fn command_timeout_is_logged_at_warn() {
    let host = FakeHost::new().with_command("slowtool", Reply::TimedOut);
    let (matched, diag) = eval(&host, Platform::Linux, &Check::new(CheckKind::Command, "slowtool")).await;
    assert!(!matched);
    assert!(diag.logged(Level::Warn, "slowtool timed out after 5s"));
}

#[tokio::test]
async fn missing_executable_is_silent() {
    let host = FakeHost::new();
    let (matched, diag) = eval(&host, Platform::Linux, &Check::new(CheckKind::Command, "notinstalled --x")).await;
    assert!(!matched);
    assert!(diag.is_empty());
}

#[tokio::test]
async fn other_command_failure_is_logged_at_debug() {
    let host = FakeHost::new().with_command("broken", Reply::Fail("waiting for broken"));
    let (matched, diag) = eval(&host, Platform::Linux, &Check::new(CheckKind::Command, "broken")).await;
    assert!(!matched);
    assert!(diag.logged(Level::Debug, "command broken failed"));
    assert!(diag.at(Level::Warn).is_empty());
}
