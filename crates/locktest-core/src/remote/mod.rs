//! Remote execution seam.
//!
//! A [`Remote`] is one addressable endpoint. Commands run either to completion
//! ([`Remote::run`]) or in the background ([`Remote::spawn`]), in which case the
//! returned [`RemoteProcess`] is reaped later.

mod command;
pub use command::{Arg, RemoteCommand};

mod process;
pub use process::RemoteProcess;

use std::time::Duration;

use async_trait::async_trait;
use locktest_model::{ExitCode, rendezvous_address};

use crate::error::RemoteError;

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutput {
    pub code: ExitCode,
    pub duration: Duration,
}

impl RunOutput {
    #[inline]
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

#[async_trait]
pub trait Remote: Send + Sync + 'static {
    /// Identity of the endpoint, e.g. `ubuntu@10.0.0.5`.
    fn name(&self) -> &str;

    /// Address peers use to reach this endpoint.
    fn address(&self) -> &str {
        rendezvous_address(self.name())
    }

    /// Run `cmd` to completion.
    ///
    /// A non-zero exit is [`RemoteError::NonZeroExit`] unless the command was
    /// built with `with_check(false)`.
    async fn run(&self, cmd: &RemoteCommand) -> Result<RunOutput, RemoteError>;

    /// Start `cmd` without waiting for it.
    async fn spawn(&self, cmd: &RemoteCommand) -> Result<RemoteProcess, RemoteError>;
}
