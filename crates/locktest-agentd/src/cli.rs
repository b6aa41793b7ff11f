use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use locktest_exec::SshOptions;
use locktest_observe::LoggerFormat;
use locktest_tasks::LocktestOptions;
use serde_json::Value;

const DEFAULT_CONFIG: &str = r#"["client.0","client.1"]"#;

/// Run one test task against the clients of an inventory.
#[derive(Parser, Debug)]
#[command(name = "locktest-agentd", version)]
pub struct Cli {
    /// JSON file mapping client roles to endpoints.
    #[arg(long, short = 'i', env = "LOCKTEST_INVENTORY")]
    pub inventory: PathBuf,

    /// Task to dispatch.
    #[arg(long, default_value = "locktest")]
    pub task: String,

    /// Task configuration as JSON.
    #[arg(long, default_value = DEFAULT_CONFIG, value_parser = parse_json)]
    pub config: Value,

    /// Give up on a test process after this many seconds.
    #[arg(long)]
    pub wait_timeout_secs: Option<u64>,

    #[arg(long, default_value_t = 10)]
    pub ssh_connect_timeout_secs: u64,

    /// Log filter directive.
    #[arg(long, env = "LOCKTEST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// text | json | journald
    #[arg(long, env = "LOCKTEST_LOG_FORMAT", default_value = "text")]
    pub log_format: LoggerFormat,

    /// Do not log what the remote commands print.
    #[arg(long)]
    pub hide_remote_output: bool,
}

fn parse_json(s: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(s)
}

impl Cli {
    pub fn ssh_options(&self) -> SshOptions {
        SshOptions {
            connect_timeout: Duration::from_secs(self.ssh_connect_timeout_secs),
            ..SshOptions::default()
        }
    }

    pub fn locktest_options(&self) -> LocktestOptions {
        LocktestOptions {
            wait_timeout: self.wait_timeout_secs.map(Duration::from_secs),
            ..LocktestOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["locktest-agentd", "-i", "inv.json"]).unwrap();
        assert_eq!(cli.inventory, PathBuf::from("inv.json"));
        assert_eq!(cli.task, "locktest");
        assert_eq!(cli.config, json!(["client.0", "client.1"]));
        assert_eq!(cli.locktest_options().wait_timeout, None);
        assert_eq!(cli.ssh_options().connect_timeout, Duration::from_secs(10));
        assert!(!cli.hide_remote_output);
    }

    #[test]
    fn explicit_flags() {
        let cli = Cli::try_parse_from([
            "locktest-agentd",
            "--inventory",
            "/etc/locktest/inv.json",
            "--config",
            r#"["client.2", "client.5"]"#,
            "--wait-timeout-secs",
            "600",
            "--ssh-connect-timeout-secs",
            "3",
            "--log-format",
            "JSON",
            "--hide-remote-output",
        ])
        .unwrap();
        assert_eq!(cli.config, json!(["client.2", "client.5"]));
        assert_eq!(
            cli.locktest_options().wait_timeout,
            Some(Duration::from_secs(600))
        );
        assert_eq!(cli.ssh_options().connect_timeout, Duration::from_secs(3));
        assert_eq!(cli.log_format, LoggerFormat::Json);
        assert!(cli.hide_remote_output);
    }

    #[test]
    fn rejects_malformed_config() {
        let err = Cli::try_parse_from(["locktest-agentd", "-i", "x", "--config", "[client.0"]);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_unknown_log_format() {
        let err = Cli::try_parse_from(["locktest-agentd", "-i", "x", "--log-format", "xml"]);
        assert!(err.is_err());
    }
}
