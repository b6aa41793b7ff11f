use std::sync::Arc;

use serde_json::Value;
use tracing::{Instrument, info_span, trace};

use crate::{
    error::CoreError,
    task::{Task, TaskContext},
};

#[derive(Default)]
pub struct TaskRouter {
    tasks: Vec<Arc<dyn Task>>,
}

impl TaskRouter {
    #[inline]
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Register a task. On a name clash the first registration wins.
    #[inline]
    pub fn register(&mut self, task: Arc<dyn Task>) {
        self.tasks.push(task);
    }

    pub fn with(mut self, task: Arc<dyn Task>) -> Self {
        self.register(task);
        self
    }

    pub fn pick(&self, name: &str) -> Option<&Arc<dyn Task>> {
        self.tasks.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tasks.iter().map(|t| t.name())
    }

    pub async fn run(
        &self,
        name: &str,
        ctx: &TaskContext,
        config: &Value,
    ) -> Result<(), CoreError> {
        let task = self
            .pick(name)
            .ok_or_else(|| CoreError::NoTask(name.to_string()))?;

        let span = info_span!("task", task = task.name(), run_id = ctx.run_id());
        task.run(ctx, config).instrument(span).await?;
        trace!(task = task.name(), "task finished");
        Ok(())
    }
}
