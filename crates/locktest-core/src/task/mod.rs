use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{cluster::Cluster, error::TaskError};

/// Everything a task may use during one invocation.
#[derive(Clone)]
pub struct TaskContext {
    cluster: Arc<dyn Cluster>,
    run_id: String,
}

impl TaskContext {
    pub fn new(cluster: Arc<dyn Cluster>) -> Self {
        Self {
            cluster,
            run_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = run_id.into();
        self
    }

    #[inline]
    pub fn cluster(&self) -> &dyn Cluster {
        self.cluster.as_ref()
    }

    #[inline]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}

/// A pluggable unit of test work, selected by name.
///
/// `config` is the task's raw configuration value; each task validates its own
/// shape and reports problems as [`TaskError::InvalidConfig`].
#[async_trait]
pub trait Task: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &TaskContext, config: &Value) -> Result<(), TaskError>;
}
