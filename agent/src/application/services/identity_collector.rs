//! Application service: directory-join identity per platform.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Command failures resolve to a defaulted status and a log line; they never
//! surface as errors.

use std::time::Duration;

use anyhow::{Result, bail};
use posture_common::{IdentityStatus, SOURCE_DARWIN, SOURCE_DSREGCMD_ERROR, SOURCE_UNSUPPORTED};

use crate::application::ports::{CommandRunner, DiagnosticsSink, IdentityCollector};
use crate::application::services::combined_output;
use crate::domain::error::CommandError;
use crate::domain::identity::{
    MDM_ENROLLED, is_mdm_enrolled, parse_dsconfigad_output, parse_dsregcmd_output,
};
use crate::domain::platform::Platform;

const COMPONENT: &str = "identity";

/// Identity collector backed by the platform's join diagnostics.
///
/// Windows reads `dsregcmd /status`; macOS combines `dsconfigad -show` with
/// `profiles status -type enrollment`; other platforms report `unsupported`.
pub struct SystemIdentityCollector<'a, R> {
    runner: &'a R,
    platform: Platform,
    timeout: Duration,
    diagnostics: &'a dyn DiagnosticsSink,
}

impl<'a, R: CommandRunner> SystemIdentityCollector<'a, R> {
    #[must_use]
    pub fn new(
        runner: &'a R,
        platform: Platform,
        timeout: Duration,
        diagnostics: &'a dyn DiagnosticsSink,
    ) -> Self {
        Self {
            runner,
            platform,
            timeout,
            diagnostics,
        }
    }

    async fn windows(&self) -> IdentityStatus {
        match run_bounded(self.runner, "dsregcmd", &["/status"], self.timeout).await {
            Ok(output) => parse_dsregcmd_output(&output),
            Err(e) => {
                self.diagnostics
                    .warn(COMPONENT, &format!("dsregcmd failed: {e:#}"));
                IdentityStatus::unjoined(SOURCE_DSREGCMD_ERROR)
            }
        }
    }

    async fn darwin(&self) -> IdentityStatus {
        let mut id = IdentityStatus::unjoined(SOURCE_DARWIN);

        match run_bounded(self.runner, "dsconfigad", &["-show"], self.timeout).await {
            Ok(output) => {
                let binding = parse_dsconfigad_output(&output);
                id.domain_joined = binding.domain_joined;
                id.domain_name = binding.domain_name;
            }
            Err(e) if is_missing_executable(&e) => {}
            Err(e) => self
                .diagnostics
                .debug(COMPONENT, &format!("dsconfigad failed: {e:#}")),
        }

        match run_bounded(
            self.runner,
            "profiles",
            &["status", "-type", "enrollment"],
            self.timeout,
        )
        .await
        {
            Ok(output) if is_mdm_enrolled(&output) => id.mdm_url = Some(MDM_ENROLLED.to_string()),
            Ok(_) => {}
            Err(e) => self
                .diagnostics
                .debug(COMPONENT, &format!("profiles status failed: {e:#}")),
        }

        id.refresh_join_type();
        id
    }
}

impl<R: CommandRunner> IdentityCollector for SystemIdentityCollector<'_, R> {
    async fn collect_identity(&self) -> Result<IdentityStatus> {
        Ok(match self.platform {
            Platform::Windows => self.windows().await,
            Platform::MacOs => self.darwin().await,
            Platform::Linux | Platform::Other(_) => IdentityStatus::unjoined(SOURCE_UNSUPPORTED),
        })
    }
}

/// Run a collector command and return its combined output.
///
/// A non-zero exit is an error, like a spawn failure or timeout.
pub(crate) async fn run_bounded(
    runner: &impl CommandRunner,
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<String> {
    let output = runner.run_with_timeout(program, args, timeout).await?;
    if !output.status.success() {
        bail!("{program} exited with {}", output.status);
    }
    Ok(combined_output(&output))
}

fn is_missing_executable(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<CommandError>()
        .is_some_and(CommandError::is_not_found)
}
