//! Production host adapters composed into one `HostProbes` implementation.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{
    CommandRunner, FileProbe, LaunchDaemonProbe, RegistryProbe, ServiceManager,
};
use crate::domain::config::ScanConfig;
use crate::domain::platform::Platform;
use crate::domain::registry::RegistryPath;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::LocalFs;
use crate::infra::launch_daemon::PlistLaunchDaemonProbe;
use crate::infra::registry::RegCommandProbe;
use crate::infra::service_manager::SystemServiceManager;

/// Every probe the evaluator needs, bound to the local machine.
pub struct LocalHost {
    runner: TokioCommandRunner,
    services: SystemServiceManager<TokioCommandRunner>,
    registry: RegCommandProbe<TokioCommandRunner>,
    launch_daemons: PlistLaunchDaemonProbe,
    fs: LocalFs,
}

impl LocalHost {
    #[must_use]
    pub fn new(config: &ScanConfig, platform: Platform) -> Self {
        let launch_daemons = PlistLaunchDaemonProbe::from_config(config, platform);
        Self {
            runner: TokioCommandRunner::new(config.command_timeout()),
            services: SystemServiceManager::new(
                TokioCommandRunner::new(config.service_query_timeout()),
                platform,
                config.service_query_timeout(),
                launch_daemons.clone(),
            ),
            registry: RegCommandProbe::new(
                TokioCommandRunner::new(config.registry_query_timeout()),
                platform,
                config.registry_query_timeout(),
            ),
            launch_daemons,
            fs: LocalFs,
        }
    }

    /// Registry probe shared with the policy collector.
    #[must_use]
    pub fn registry(&self) -> &RegCommandProbe<TokioCommandRunner> {
        &self.registry
    }
}

impl CommandRunner for LocalHost {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.runner.run(program, args).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        self.runner.run_with_timeout(program, args, timeout).await
    }
}

impl ServiceManager for LocalHost {
    async fn is_running(&self, name: &str) -> Result<bool> {
        self.services.is_running(name).await
    }
}

impl RegistryProbe for LocalHost {
    async fn key_exists(&self, key: &RegistryPath) -> Result<bool> {
        self.registry.key_exists(key).await
    }

    async fn subkey_names(&self, key: &RegistryPath) -> Result<Option<Vec<String>>> {
        self.registry.subkey_names(key).await
    }
}

impl LaunchDaemonProbe for LocalHost {
    fn plist_exists(&self, label: &str) -> bool {
        self.launch_daemons.plist_exists(label)
    }
}

impl FileProbe for LocalHost {
    fn exists(&self, path: &Path) -> bool {
        self.fs.exists(path)
    }
}
