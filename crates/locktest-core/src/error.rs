use locktest_model::ExitCode;
use thiserror::Error;

/// Failure of a single remote command or process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("spawn failed on {remote}: {reason}")]
    Spawn { remote: String, reason: String },
    #[error("io error on {remote}: {reason}")]
    Io { remote: String, reason: String },
    #[error("command on {remote} exited with code {code}: {command}")]
    NonZeroExit {
        remote: String,
        command: String,
        code: ExitCode,
    },
    #[error("process on {remote} was aborted before exiting")]
    Aborted { remote: String },
    #[error("process driver on {remote} failed: {reason}")]
    Driver { remote: String, reason: String },
    #[error("process on {remote} was already reaped")]
    AlreadyReaped { remote: String },
}

/// Failure reported by a task plugin to the dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("invalid task config: {0}")]
    InvalidConfig(String),
    #[error("{0}")]
    Failed(String),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("no remote registered for {0}")]
    NoRemote(String),
    #[error("no task registered under {0:?}")]
    NoTask(String),
    #[error("task error: {0}")]
    Task(#[from] TaskError),
}
