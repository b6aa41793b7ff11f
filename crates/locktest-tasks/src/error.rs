use std::fmt;
use std::time::Duration;

use locktest_core::{CoreError, RemoteError, TaskError};
use locktest_model::{ClientSpec, ExitCode, ModelError};
use thiserror::Error;

/// Which side of the lock test a process belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Host,
    Client,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Host => "host",
            Role::Client => "client",
        })
    }
}

/// Cleanup that did not go through on one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupFailure {
    pub client: ClientSpec,
    pub source: RemoteError,
}

impl fmt::Display for CleanupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.client, self.source)
    }
}

#[derive(Error, Debug)]
pub enum LocktestError {
    #[error("invalid locktest config: {0}")]
    Config(#[from] ModelError),

    #[error("cannot resolve remotes: {0}")]
    Resolve(#[source] CoreError),

    #[error("building locktest on {client} failed: {source}")]
    Build {
        client: ClientSpec,
        #[source]
        source: RemoteError,
    },

    #[error("preparing lock file on host failed: {0}")]
    Fixture(#[source] RemoteError),

    #[error("starting locktest on {role} failed: {source}")]
    Launch {
        role: Role,
        #[source]
        source: RemoteError,
    },

    #[error("waiting for locktest on {role} failed: {source}")]
    Wait {
        role: Role,
        #[source]
        source: RemoteError,
    },

    #[error("locktest on {role} did not exit within {after:?}")]
    WaitTimeout { role: Role, after: Duration },

    #[error("did not pass locking test (host exit {host}, client exit {client})")]
    Failed { host: ExitCode, client: ExitCode },

    #[error("cleanup failed: {}", join(.failures))]
    Cleanup { failures: Vec<CleanupFailure> },
}

fn join(failures: &[CleanupFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<LocktestError> for TaskError {
    fn from(e: LocktestError) -> Self {
        match e {
            LocktestError::Config(e) => TaskError::InvalidConfig(e.to_string()),
            other => TaskError::Failed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_names_both_codes() {
        let msg = LocktestError::Failed { host: 0, client: 1 }.to_string();
        assert_eq!(msg, "did not pass locking test (host exit 0, client exit 1)");
    }

    #[test]
    fn cleanup_message_lists_every_client() {
        let err = LocktestError::Cleanup {
            failures: vec![
                CleanupFailure {
                    client: "client.0".parse().unwrap(),
                    source: RemoteError::Aborted {
                        remote: "a".into(),
                    },
                },
                CleanupFailure {
                    client: "client.1".parse().unwrap(),
                    source: RemoteError::Aborted {
                        remote: "b".into(),
                    },
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("cleanup failed: client.0: "));
        assert!(msg.contains("; client.1: "));
    }

    #[test]
    fn config_errors_map_to_invalid_config() {
        let err: TaskError = LocktestError::Config(ModelError::WrongClientCount(3)).into();
        assert!(matches!(err, TaskError::InvalidConfig(_)));

        let err: TaskError = LocktestError::Failed { host: 1, client: 0 }.into();
        assert!(matches!(err, TaskError::Failed(msg) if msg.contains("host exit 1")));
    }
}
