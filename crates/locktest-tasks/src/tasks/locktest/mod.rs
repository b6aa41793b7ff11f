//! Two-client file locking interoperability test.
//!
//! Builds the xfstests `locktest` utility on two clients, runs it as a listener
//! on the first (the host) and as a connecting peer on the second, and passes
//! only if both exit with `0`. The two clients may share a mount or use
//! different ones.
//!
//! Task configuration is the list of the two clients, host first:
//!
//! ```json
//! ["client.0", "client.1"]
//! ```
//!
//! Scratch artifacts are removed from both clients on every exit path once
//! the remotes have been resolved.

mod commands;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use locktest_core::{Cluster, Remote, RemoteError, RemoteProcess, Task, TaskContext, TaskError};
use locktest_model::{ClientSpec, ExitCode, Layout, LocktestConfig, Outcome};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::{CleanupFailure, LocktestError, Role};

/// Name the task is dispatched under.
pub const TASK_NAME: &str = "locktest";

const DEFAULT_TERMINATE_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct LocktestOptions {
    /// Upper bound on each wait for a test process. `None` waits forever.
    pub wait_timeout: Option<Duration>,
    /// Time a timed-out process gets between `SIGTERM` and being aborted.
    pub terminate_grace: Duration,
}

impl Default for LocktestOptions {
    fn default() -> Self {
        Self {
            wait_timeout: None,
            terminate_grace: DEFAULT_TERMINATE_GRACE,
        }
    }
}

/// Locktest orchestrator.
#[derive(Debug, Clone, Default)]
pub struct Locktest {
    layout: Layout,
    options: LocktestOptions,
}

impl Locktest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_options(mut self, options: LocktestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Parse a raw task config and run.
    pub async fn run_value(
        &self,
        cluster: &dyn Cluster,
        config: &Value,
    ) -> Result<Outcome, LocktestError> {
        let config = LocktestConfig::from_value(config)?;
        self.run(cluster, &config).await
    }

    /// Build, run and clean up.
    ///
    /// Cleanup runs once per client whether or not the test got that far. An
    /// error from the test itself takes precedence over cleanup failures.
    #[instrument(level = "info", skip_all, fields(host = %config.host, client = %config.client))]
    pub async fn run(
        &self,
        cluster: &dyn Cluster,
        config: &LocktestConfig,
    ) -> Result<Outcome, LocktestError> {
        let host = cluster.only(&config.host).map_err(LocktestError::Resolve)?;
        let client = cluster.only(&config.client).map_err(LocktestError::Resolve)?;

        let result = self.exercise(config, &host, &client).await;

        let mut failures = Vec::new();
        for (spec, remote, role) in [
            (&config.host, &host, Role::Host),
            (&config.client, &client, Role::Client),
        ] {
            info!("cleaning up {role} dir");
            if let Err(source) = self.cleanup(remote.as_ref(), spec).await {
                warn!(client = %spec, error = %source, "cleanup failed");
                failures.push(CleanupFailure {
                    client: spec.clone(),
                    source,
                });
            }
        }

        settle(result, failures)
    }

    /// Remove the scratch artifacts from one remote. Idempotent.
    pub async fn cleanup(&self, remote: &dyn Remote, spec: &ClientSpec) -> Result<(), RemoteError> {
        remote
            .run(&commands::cleanup(&self.layout, spec))
            .await
            .map(|_| ())
    }

    async fn exercise(
        &self,
        config: &LocktestConfig,
        host: &Arc<dyn Remote>,
        client: &Arc<dyn Remote>,
    ) -> Result<Outcome, LocktestError> {
        info!("fetching and building locktests...");
        for (spec, remote) in [(&config.host, host), (&config.client, client)] {
            info!("building on {spec}");
            remote
                .run(&commands::build(&self.layout, spec))
                .await
                .map_err(|source| LocktestError::Build {
                    client: spec.clone(),
                    source,
                })?;
        }
        info!("built locktest on each client");

        host.run(&commands::prepare_marker(&self.layout, &config.host))
            .await
            .map_err(LocktestError::Fixture)?;

        info!("starting on host");
        let mut host_proc = host
            .spawn(&commands::listen(&self.layout, &config.host))
            .await
            .map_err(|source| LocktestError::Launch {
                role: Role::Host,
                source,
            })?;

        info!("starting on client");
        let host_addr = host.address();
        debug!(%host_addr, "client rendezvous address");
        let mut client_proc = client
            .spawn(&commands::connect(&self.layout, &config.client, host_addr))
            .await
            .map_err(|source| LocktestError::Launch {
                role: Role::Client,
                source,
            })?;

        let host_code = self.reap(Role::Host, &mut host_proc).await;
        let client_code = self.reap(Role::Client, &mut client_proc).await;
        let outcome = Outcome::new(host_code?, client_code?);

        if !outcome.passed() {
            return Err(LocktestError::Failed {
                host: outcome.host,
                client: outcome.client,
            });
        }
        info!(
            "finished locktest executable with results {} and {}",
            outcome.host, outcome.client
        );
        Ok(outcome)
    }

    async fn reap(&self, role: Role, proc: &mut RemoteProcess) -> Result<ExitCode, LocktestError> {
        let Some(limit) = self.options.wait_timeout else {
            return proc
                .wait()
                .await
                .map_err(|source| LocktestError::Wait { role, source });
        };

        let waited = tokio::time::timeout(limit, proc.wait()).await;
        match waited {
            Ok(result) => result.map_err(|source| LocktestError::Wait { role, source }),
            Err(_) => {
                warn!(%role, ?limit, "locktest did not exit in time; terminating");
                proc.terminate(self.options.terminate_grace).await;
                Err(LocktestError::WaitTimeout { role, after: limit })
            }
        }
    }
}

fn settle(
    result: Result<Outcome, LocktestError>,
    failures: Vec<CleanupFailure>,
) -> Result<Outcome, LocktestError> {
    match result {
        Ok(outcome) if failures.is_empty() => Ok(outcome),
        Ok(_) => Err(LocktestError::Cleanup { failures }),
        Err(e) => {
            if !failures.is_empty() {
                warn!(
                    error = %e,
                    cleanup_failures = failures.len(),
                    "cleanup also failed; reporting the original error"
                );
            }
            Err(e)
        }
    }
}

/// [`Task`] adapter dispatched as `locktest`.
#[derive(Debug, Clone, Default)]
pub struct LocktestTask {
    locktest: Locktest,
}

impl LocktestTask {
    pub fn new(locktest: Locktest) -> Self {
        Self { locktest }
    }
}

#[async_trait]
impl Task for LocktestTask {
    fn name(&self) -> &'static str {
        TASK_NAME
    }

    async fn run(&self, ctx: &TaskContext, config: &Value) -> Result<(), TaskError> {
        let config = LocktestConfig::from_value(config).map_err(LocktestError::from)?;
        self.locktest.run(ctx.cluster(), &config).await?;
        Ok(())
    }
}
