mod cli;
mod inventory;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use locktest_core::{TaskContext, TaskRouter};
use locktest_observe::{LoggerConfig, logger_init};
use locktest_tasks::{Locktest, LocktestTask};
use tracing::info;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log = LoggerConfig::default()
        .with_format(cli.log_format)
        .with_level(&cli.log_level)
        .with_remote_output(!cli.hide_remote_output);
    logger_init(&log).context("failed to initialize logger")?;

    let inventory = inventory::load(&cli.inventory)?.into_cluster(&cli.ssh_options());
    info!(roles = inventory.len(), path = %cli.inventory.display(), "inventory loaded");

    let locktest = Locktest::new().with_options(cli.locktest_options());
    let router = TaskRouter::new().with(Arc::new(LocktestTask::new(locktest)));

    let ctx = TaskContext::new(Arc::new(inventory));
    info!(task = %cli.task, run_id = ctx.run_id(), config = %cli.config, "dispatching task");

    router
        .run(&cli.task, &ctx, &cli.config)
        .await
        .with_context(|| format!("task {:?} failed", cli.task))?;

    info!(task = %cli.task, "task passed");
    Ok(())
}
