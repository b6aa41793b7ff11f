//! Remote endpoints reached through the system `ssh` client.

use std::time::Duration;

use async_trait::async_trait;
use locktest_core::{Remote, RemoteCommand, RemoteError, RemoteProcess, RunOutput};
use tokio::process::Command;

use crate::{drive, util::transport_command};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Known hosts policy for SSH connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KnownHostsPolicy {
    /// Strictly verify known hosts.
    Strict,
    /// Add unknown hosts automatically, reject changed keys.
    #[default]
    Add,
    /// Accept all hosts without verification (testing only).
    AcceptAll,
}

/// `ssh` invocation options.
#[derive(Debug, Clone)]
pub struct SshOptions {
    /// Client binary, `ssh` by default.
    pub program: String,
    pub connect_timeout: Duration,
    pub known_hosts: KnownHostsPolicy,
    /// Never prompt for passwords or passphrases.
    pub batch_mode: bool,
    /// Extra arguments placed before the destination (e.g. `-i key`).
    pub extra_args: Vec<String>,
}

impl Default for SshOptions {
    fn default() -> Self {
        Self {
            program: "ssh".to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            known_hosts: KnownHostsPolicy::default(),
            batch_mode: true,
            extra_args: Vec::new(),
        }
    }
}

/// A remote reached as `ssh <identity> -- <command line>`.
///
/// The identity doubles as the rendezvous name: `ubuntu@10.0.0.5` is reached
/// by peers at `10.0.0.5`.
#[derive(Debug, Clone)]
pub struct SshRemote {
    identity: String,
    options: SshOptions,
}

impl SshRemote {
    pub fn new(identity: impl Into<String>) -> Self {
        Self::with_options(identity, SshOptions::default())
    }

    pub fn with_options(identity: impl Into<String>, options: SshOptions) -> Self {
        Self {
            identity: identity.into(),
            options,
        }
    }

    pub fn options(&self) -> &SshOptions {
        &self.options
    }

    /// Arguments passed to the ssh client for `line`.
    pub fn argv(&self, line: &str) -> Vec<String> {
        let opts = &self.options;
        let mut args = Vec::with_capacity(opts.extra_args.len() + 10);

        if opts.batch_mode {
            args.extend(["-o".to_string(), "BatchMode=yes".to_string()]);
        }
        args.push("-o".to_string());
        args.push(format!(
            "ConnectTimeout={}",
            opts.connect_timeout.as_secs().max(1)
        ));

        match opts.known_hosts {
            KnownHostsPolicy::Strict => {
                args.extend(["-o".to_string(), "StrictHostKeyChecking=yes".to_string()]);
            }
            KnownHostsPolicy::Add => {
                args.extend([
                    "-o".to_string(),
                    "StrictHostKeyChecking=accept-new".to_string(),
                ]);
            }
            KnownHostsPolicy::AcceptAll => {
                args.extend([
                    "-o".to_string(),
                    "StrictHostKeyChecking=no".to_string(),
                    "-o".to_string(),
                    "UserKnownHostsFile=/dev/null".to_string(),
                ]);
            }
        }

        args.extend(opts.extra_args.iter().cloned());
        args.push(self.identity.clone());
        args.push("--".to_string());
        args.push(line.to_string());
        args
    }
}

impl drive::Launcher for SshRemote {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn command(&self, line: &str) -> Command {
        transport_command(&self.options.program, self.argv(line))
    }
}

#[async_trait]
impl Remote for SshRemote {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_argv_ends_with_destination_and_line() {
        let remote = SshRemote::new("ubuntu@10.0.0.5");
        let argv = remote.argv("mkdir -p /tmp/x");
        assert_eq!(
            argv,
            vec![
                "-o",
                "BatchMode=yes",
                "-o",
                "ConnectTimeout=10",
                "-o",
                "StrictHostKeyChecking=accept-new",
                "ubuntu@10.0.0.5",
                "--",
                "mkdir -p /tmp/x",
            ]
        );
    }

    #[test]
    fn options_shape_argv() {
        let remote = SshRemote::with_options(
            "node",
            SshOptions {
                program: "/usr/bin/ssh".into(),
                connect_timeout: Duration::from_millis(200),
                known_hosts: KnownHostsPolicy::AcceptAll,
                batch_mode: false,
                extra_args: vec!["-i".into(), "/keys/id".into()],
            },
        );
        let argv = remote.argv("true");
        assert_eq!(argv[..2], ["-o", "ConnectTimeout=1"]);
        assert!(argv.contains(&"UserKnownHostsFile=/dev/null".to_string()));
        assert!(!argv.contains(&"BatchMode=yes".to_string()));
        assert_eq!(argv[argv.len() - 5..], ["-i", "/keys/id", "node", "--", "true"]);
        assert_eq!(remote.options().program, "/usr/bin/ssh");
    }

    #[test]
    fn address_strips_user() {
        assert_eq!(SshRemote::new("ubuntu@10.0.0.5").address(), "10.0.0.5");
        assert_eq!(SshRemote::new("10.0.0.5").address(), "10.0.0.5");
    }

    #[tokio::test]
    async fn missing_client_binary_is_a_spawn_error() {
        let remote = SshRemote::with_options(
            "node",
            SshOptions {
                program: "/nonexistent/locktest-ssh".into(),
                ..SshOptions::default()
            },
        );
        let err = remote
            .run(&RemoteCommand::program("true"))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Spawn { remote, .. } if remote == "node"));
    }
}
