//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution,
//! filesystem access, registry and service-manager queries, and process
//! enumeration.
//!
//! Imports from `crate::domain` and `crate::application` are allowed.

pub mod command_runner;
pub mod config;
pub mod diagnostics;
pub mod fs;
pub mod host;
pub mod launch_daemon;
pub mod process;
pub mod registry;
pub mod service_manager;
pub mod signature_store;

use posture_common::{ManagementPosture, Signature};

use crate::application::ports::DiagnosticsSink;
use crate::application::services::identity_collector::SystemIdentityCollector;
use crate::application::services::policy_collector::SystemPolicyCollector;
use crate::application::services::posture_scan::PostureScanner;
use crate::domain::config::ScanConfig;
use crate::domain::platform::Platform;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::host::LocalHost;
use crate::infra::process::SysinfoProcessSource;

/// Scan this machine with the production adapters for [`Platform::current`].
pub async fn scan_local_host(
    signatures: &[Signature],
    config: &ScanConfig,
    diagnostics: &dyn DiagnosticsSink,
) -> ManagementPosture {
    let platform = Platform::current();
    let host = LocalHost::new(config, platform);
    let processes = SysinfoProcessSource;
    let collector_runner = TokioCommandRunner::new(config.collector_timeout());
    let identity = SystemIdentityCollector::new(
        &collector_runner,
        platform,
        config.collector_timeout(),
        diagnostics,
    );
    let policy = SystemPolicyCollector::new(
        &collector_runner,
        host.registry(),
        platform,
        config.collector_timeout(),
        diagnostics,
    );
    PostureScanner::new(
        &host,
        &processes,
        &identity,
        &policy,
        platform,
        config.command_timeout(),
        diagnostics,
    )
    .scan(signatures)
    .await
}
