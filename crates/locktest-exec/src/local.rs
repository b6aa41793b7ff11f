//! Remote endpoint backed by the local machine.
//!
//! Runs command lines with `sh -c`. Handy for single-box runs where both roles
//! live on the same machine and for exercising the orchestrator without ssh.

use async_trait::async_trait;
use locktest_core::{Remote, RemoteCommand, RemoteError, RemoteProcess, RunOutput};
use tokio::process::Command;

use crate::{drive, util::transport_command};

#[derive(Debug, Clone)]
pub struct LocalRemote {
    identity: String,
    shell: String,
}

impl LocalRemote {
    pub fn new() -> Self {
        Self {
            identity: "localhost".to_string(),
            shell: "sh".to_string(),
        }
    }

    /// Identity reported by [`Remote::name`]; also the rendezvous name.
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }
}

impl Default for LocalRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl drive::Launcher for LocalRemote {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn command(&self, line: &str) -> Command {
        transport_command(&self.shell, ["-c", line])
    }
}

#[async_trait]
impl Remote for LocalRemote {
    fn name(&self) -> &str {
        &self.identity
    }

    async fn run(&self, cmd: &RemoteCommand) -> Result<RunOutput, RemoteError> {
        drive::run(self, cmd).await
    }

    async fn spawn(&self, cmd: &RemoteCommand) -> Result<RemoteProcess, RemoteError> {
        drive::spawn(self, cmd)
    }
}
