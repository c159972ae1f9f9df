//! Application service: evaluate one check against live host state.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Every branch degrades to `false`: a failed probe is indistinguishable from
//! a negative one and never reaches the caller.

use std::path::Path;
use std::time::Duration;

use posture_common::{Check, CheckKind};

use crate::application::ports::{DiagnosticsSink, HostProbes};
use crate::application::services::combined_output;
use crate::application::services::process_snapshot::ProcessSnapshot;
use crate::domain::error::CommandError;
use crate::domain::platform::Platform;
use crate::domain::registry::RegistryPath;

const COMPONENT: &str = "probe_evaluator";

/// Evaluates checks for one scan, bound to that scan's process snapshot.
pub struct ProbeEvaluator<'a, H> {
    host: &'a H,
    snapshot: &'a ProcessSnapshot,
    platform: Platform,
    command_timeout: Duration,
    diagnostics: &'a dyn DiagnosticsSink,
}

impl<'a, H: HostProbes> ProbeEvaluator<'a, H> {
    #[must_use]
    pub fn new(
        host: &'a H,
        snapshot: &'a ProcessSnapshot,
        platform: Platform,
        command_timeout: Duration,
        diagnostics: &'a dyn DiagnosticsSink,
    ) -> Self {
        Self {
            host,
            snapshot,
            platform,
            command_timeout,
            diagnostics,
        }
    }

    /// True when the check matches on this host.
    pub async fn evaluate(&self, check: &Check) -> bool {
        if !check.applies_to(self.platform.os_name()) {
            return false;
        }
        match check.kind {
            CheckKind::FileExists => self.host.exists(Path::new(&check.value)),
            CheckKind::ServiceRunning => self.service_running(&check.value).await,
            CheckKind::ProcessRunning => self.snapshot.is_running(&check.value),
            CheckKind::RegistryValue => self.registry_key_exists(&check.value).await,
            CheckKind::LaunchDaemon => {
                self.platform == Platform::MacOs && self.host.plist_exists(&check.value)
            }
            CheckKind::Command => self.command_matches(&check.value, check.parse.as_deref()).await,
            CheckKind::Unknown => {
                self.diagnostics.warn(
                    COMPONENT,
                    &format!("unknown check type for value '{}'", check.value),
                );
                false
            }
        }
    }

    async fn service_running(&self, name: &str) -> bool {
        match self.host.is_running(name).await {
            Ok(running) => running,
            Err(e) => {
                self.diagnostics
                    .debug(COMPONENT, &format!("service check for {name} failed: {e:#}"));
                false
            }
        }
    }

    async fn registry_key_exists(&self, value: &str) -> bool {
        if self.platform != Platform::Windows {
            return false;
        }
        let Some(key) = RegistryPath::parse(value) else {
            return false;
        };
        self.host.key_exists(&key).await.unwrap_or(false)
    }

    async fn command_matches(&self, command: &str, parse: Option<&str>) -> bool {
        let mut argv = command.split_whitespace();
        let Some(program) = argv.next() else {
            return false;
        };
        let args: Vec<&str> = argv.collect();

        let output = match self
            .host
            .run_with_timeout(program, &args, self.command_timeout)
            .await
        {
            Ok(output) => output,
            Err(e) => {
                self.report_command_error(program, &e);
                return false;
            }
        };
        if !output.status.success() {
            self.diagnostics.debug(
                COMPONENT,
                &format!("command {program} exited with {}", output.status),
            );
            return false;
        }
        let Some(needle) = parse.filter(|p| !p.is_empty()) else {
            return true;
        };
        combined_output(&output).contains(needle)
    }

    fn report_command_error(&self, program: &str, error: &anyhow::Error) {
        match error.downcast_ref::<CommandError>() {
            Some(e) if e.is_timeout() => self.diagnostics.warn(COMPONENT, &e.to_string()),
            Some(e) if e.is_not_found() => {}
            _ => self
                .diagnostics
                .debug(COMPONENT, &format!("command {program} failed: {error:#}")),
        }
    }
}
