use std::future::Future;
use std::time::Duration;

use locktest_model::ExitCode;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::error::RemoteError;

type Driver = JoinHandle<Result<ExitCode, RemoteError>>;

/// Handle to a command started with [`crate::Remote::spawn`].
///
/// The command is driven by a background tokio task. [`RemoteProcess::wait`]
/// joins it. Dropping a handle that was never reaped aborts the driver, which
/// kills the local transport child.
pub struct RemoteProcess {
    remote: String,
    pid: Option<u32>,
    driver: Option<Driver>,
}

impl RemoteProcess {
    /// Drive `fut` on the current runtime.
    ///
    /// `pid` is the local transport child (if any); it receives `SIGTERM` on
    /// [`RemoteProcess::terminate`].
    pub fn spawn<F>(remote: impl Into<String>, pid: Option<u32>, fut: F) -> Self
    where
        F: Future<Output = Result<ExitCode, RemoteError>> + Send + 'static,
    {
        Self {
            remote: remote.into(),
            pid,
            driver: Some(tokio::spawn(fut)),
        }
    }

    /// A process that has already exited with `code`.
    pub fn exited(remote: impl Into<String>, code: ExitCode) -> Self {
        Self::spawn(remote, None, async move { Ok(code) })
    }

    #[inline]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    #[inline]
    pub fn is_reaped(&self) -> bool {
        self.driver.is_none()
    }

    /// Block until the process exits and return its exit code.
    ///
    /// Cancel-safe: if this future is dropped, the process keeps running and
    /// can be waited on again.
    pub async fn wait(&mut self) -> Result<ExitCode, RemoteError> {
        let driver = self
            .driver
            .as_mut()
            .ok_or_else(|| RemoteError::AlreadyReaped {
                remote: self.remote.clone(),
            })?;

        let joined = driver.await;
        self.driver = None;

        match joined {
            Ok(result) => {
                trace!(remote = %self.remote, ?result, "process reaped");
                result
            }
            Err(e) if e.is_cancelled() => Err(RemoteError::Aborted {
                remote: self.remote.clone(),
            }),
            Err(e) => Err(RemoteError::Driver {
                remote: self.remote.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// Ask the process to stop, then abort the driver after `grace`.
    pub async fn terminate(&mut self, grace: Duration) {
        let Some(driver) = self.driver.as_mut() else {
            return;
        };

        #[cfg(unix)]
        if let Some(pid) = self.pid {
            debug!(remote = %self.remote, pid, "sending SIGTERM to transport");
            // SAFETY: plain signal delivery to a child we spawned.
            unsafe {
                libc::kill(pid as libc::pid_t, libc::SIGTERM);
            }
        }

        if tokio::time::timeout(grace, &mut *driver).await.is_err() {
            debug!(remote = %self.remote, "grace exceeded; aborting driver");
            driver.abort();
        }
        self.driver = None;
    }
}

impl Drop for RemoteProcess {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}

impl std::fmt::Debug for RemoteProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteProcess")
            .field("remote", &self.remote)
            .field("pid", &self.pid)
            .field("reaped", &self.is_reaped())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_returns_exit_code_once() {
        let mut proc = RemoteProcess::exited("host", 3);
        assert_eq!(proc.wait().await, Ok(3));
        assert!(proc.is_reaped());
        assert_eq!(
            proc.wait().await,
            Err(RemoteError::AlreadyReaped {
                remote: "host".into()
            })
        );
    }

    #[tokio::test]
    async fn driver_error_is_returned() {
        let mut proc = RemoteProcess::spawn("host", None, async {
            Err(RemoteError::Io {
                remote: "host".into(),
                reason: "broken pipe".into(),
            })
        });
        assert!(matches!(proc.wait().await, Err(RemoteError::Io { .. })));
    }

    #[tokio::test]
    async fn terminate_aborts_a_hung_driver() {
        let mut proc = RemoteProcess::spawn("host", None, async {
            std::future::pending::<()>().await;
            Ok(0)
        });
        proc.terminate(Duration::from_millis(10)).await;
        assert!(proc.is_reaped());
    }

    #[tokio::test]
    async fn wait_can_be_retried_after_timeout() {
        let mut proc = RemoteProcess::spawn("host", None, async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(0)
        });
        let early = tokio::time::timeout(Duration::from_millis(1), proc.wait()).await;
        assert!(early.is_err());
        assert!(!proc.is_reaped());
        assert_eq!(proc.wait().await, Ok(0));
    }
}
