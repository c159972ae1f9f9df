//! Registry reads through `reg query`.
//!
//! The exit status answers existence; subkeys come from the `HKEY_…` lines
//! the tool prints beneath the queried key.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, RegistryProbe};
use crate::domain::platform::Platform;
use crate::domain::registry::{RegistryPath, parse_reg_query_subkeys};

/// `RegistryProbe` backed by `reg.exe`. Off Windows every key is absent.
pub struct RegCommandProbe<R> {
    runner: R,
    platform: Platform,
    timeout: Duration,
}

impl<R: CommandRunner> RegCommandProbe<R> {
    #[must_use]
    pub fn new(runner: R, platform: Platform, timeout: Duration) -> Self {
        Self {
            runner,
            platform,
            timeout,
        }
    }

    /// `reg query` stdout, or `None` when the key cannot be opened.
    async fn query(&self, key: &RegistryPath) -> Result<Option<String>> {
        if self.platform != Platform::Windows {
            return Ok(None);
        }
        let arg = key.query_arg();
        let output = self
            .runner
            .run_with_timeout("reg", &["query", &arg], self.timeout)
            .await?;
        Ok(output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}

impl<R: CommandRunner> RegistryProbe for RegCommandProbe<R> {
    async fn key_exists(&self, key: &RegistryPath) -> Result<bool> {
        Ok(self.query(key).await?.is_some())
    }

    async fn subkey_names(&self, key: &RegistryPath) -> Result<Option<Vec<String>>> {
        Ok(self
            .query(key)
            .await?
            .map(|listing| parse_reg_query_subkeys(&listing, key)))
    }
}
