//! Service-manager queries through each platform's CLI.

use std::time::Duration;

use anyhow::{Result, bail};

use crate::application::ports::{CommandRunner, LaunchDaemonProbe, ServiceManager};
use crate::domain::platform::Platform;
use crate::domain::service::{
    launchctl_service_state, sc_query_reports_running, systemctl_reports_active,
};
use crate::infra::launch_daemon::PlistLaunchDaemonProbe;

/// `ServiceManager` for the current platform.
///
/// Windows asks `sc query`, macOS reads `launchctl list`, Linux asks
/// `systemctl is-active`. Every query is bounded by `timeout`.
pub struct SystemServiceManager<R> {
    runner: R,
    platform: Platform,
    timeout: Duration,
    launch_daemons: PlistLaunchDaemonProbe,
}

impl<R: CommandRunner> SystemServiceManager<R> {
    #[must_use]
    pub fn new(
        runner: R,
        platform: Platform,
        timeout: Duration,
        launch_daemons: PlistLaunchDaemonProbe,
    ) -> Self {
        Self {
            runner,
            platform,
            timeout,
            launch_daemons,
        }
    }

    async fn stdout_of(&self, program: &str, args: &[&str]) -> Result<String> {
        let output = self
            .runner
            .run_with_timeout(program, args, self.timeout)
            .await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn sc_query(&self, name: &str) -> Result<bool> {
        let output = self
            .runner
            .run_with_timeout("sc", &["query", name], self.timeout)
            .await?;
        if !output.status.success() {
            bail!("sc query {name} exited with {}", output.status);
        }
        Ok(sc_query_reports_running(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    async fn launchctl(&self, name: &str) -> Result<bool> {
        let output = self
            .runner
            .run_with_timeout("launchctl", &["list"], self.timeout)
            .await?;
        if !output.status.success() {
            bail!("launchctl list exited with {}", output.status);
        }
        let listing = String::from_utf8_lossy(&output.stdout);
        match launchctl_service_state(&listing, name) {
            Some(running) => Ok(running),
            // Installed but not loaded.
            None if self.launch_daemons.plist_exists(name) => Ok(false),
            None => bail!("service {name} not found"),
        }
    }

    async fn systemctl(&self, name: &str) -> Result<bool> {
        // `is-active` exits non-zero for inactive units; only stdout matters.
        let state = self.stdout_of("systemctl", &["is-active", name]).await?;
        Ok(systemctl_reports_active(&state))
    }
}

impl<R: CommandRunner> ServiceManager for SystemServiceManager<R> {
    async fn is_running(&self, name: &str) -> Result<bool> {
        match self.platform {
            Platform::Windows => self.sc_query(name).await,
            Platform::MacOs => self.launchctl(name).await,
            Platform::Linux => self.systemctl(name).await,
            Platform::Other(os) => bail!("service queries are not supported on {os}"),
        }
    }
}
