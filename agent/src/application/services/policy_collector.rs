//! Application service: policy-enrollment detections per platform.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::time::Duration;

use anyhow::Result;
use posture_common::Detection;

use crate::application::ports::{CommandRunner, DiagnosticsSink, PolicyCollector, RegistryProbe};
use crate::application::services::identity_collector::run_bounded;
use crate::domain::platform::Platform;
use crate::domain::policy::{
    group_policy_detection, group_policy_history_key, parse_profiles_output, sccm_client_key,
    sccm_detection,
};

const COMPONENT: &str = "policy";

/// Policy collector backed by the registry on Windows and `profiles list`
/// on macOS. Other platforms have no policy signals.
pub struct SystemPolicyCollector<'a, R, G> {
    runner: &'a R,
    registry: &'a G,
    platform: Platform,
    timeout: Duration,
    diagnostics: &'a dyn DiagnosticsSink,
}

impl<'a, R: CommandRunner, G: RegistryProbe> SystemPolicyCollector<'a, R, G> {
    #[must_use]
    pub fn new(
        runner: &'a R,
        registry: &'a G,
        platform: Platform,
        timeout: Duration,
        diagnostics: &'a dyn DiagnosticsSink,
    ) -> Self {
        Self {
            runner,
            registry,
            platform,
            timeout,
            diagnostics,
        }
    }

    async fn windows(&self) -> Vec<Detection> {
        let mut detections = Vec::new();

        match self.registry.subkey_names(&group_policy_history_key()).await {
            Ok(Some(subkeys)) => detections.extend(group_policy_detection(subkeys.len())),
            Ok(None) => {}
            Err(e) => self.diagnostics.warn(
                COMPONENT,
                &format!("failed to read Group Policy subkeys: {e:#}"),
            ),
        }

        match self.registry.subkey_names(&sccm_client_key()).await {
            Ok(Some(subkeys)) => detections.push(sccm_detection(subkeys.len())),
            Ok(None) => {}
            Err(e) => self.diagnostics.warn(
                COMPONENT,
                &format!("failed to read Configuration Manager key: {e:#}"),
            ),
        }

        detections
    }

    async fn darwin(&self) -> Vec<Detection> {
        match run_bounded(self.runner, "profiles", &["list"], self.timeout).await {
            Ok(output) => parse_profiles_output(&output),
            Err(e) => {
                self.diagnostics
                    .warn(COMPONENT, &format!("profiles list failed: {e:#}"));
                Vec::new()
            }
        }
    }
}

impl<R: CommandRunner, G: RegistryProbe> PolicyCollector for SystemPolicyCollector<'_, R, G> {
    async fn collect_policies(&self) -> Result<Vec<Detection>> {
        Ok(match self.platform {
            Platform::Windows => self.windows().await,
            Platform::MacOs => self.darwin().await,
            Platform::Linux | Platform::Other(_) => Vec::new(),
        })
    }
}
