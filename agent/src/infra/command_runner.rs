//! Bounded external command execution.
//!
//! Every probe and collector command runs through [`TokioCommandRunner`]: the
//! child gets a null stdin, both pipes are drained concurrently, and a child
//! still alive at the deadline is killed before the call returns.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::application::ports::CommandRunner;
use crate::domain::config::DEFAULT_TIMEOUT_SECS;
use crate::domain::error::CommandError;

/// Production `CommandRunner` backed by `tokio::process`.
///
/// Dropping a `tokio::time::timeout` future does not terminate the child on
/// Windows, so the deadline arm kills it explicitly.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, self.timeout).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let finished = async {
            let (status, stdout, stderr) =
                tokio::join!(child.wait(), drain(stdout_pipe), drain(stderr_pipe));
            status
                .with_context(|| format!("waiting for {program}"))
                .map(|status| Output {
                    status,
                    stdout,
                    stderr,
                })
        };

        tokio::select! {
            output = finished => output,
            () = tokio::time::sleep(timeout) => {
                let _ = child.kill().await;
                Err(anyhow::Error::from(CommandError::TimedOut {
                    program: program.to_string(),
                    timeout,
                }))
            }
        }
    }
}

/// Read a pipe to EOF. Read errors truncate the capture.
async fn drain(pipe: Option<impl AsyncRead + Unpin>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf).await;
    }
    buf
}
