use std::ffi::OsStr;

use tokio::process::Command;

/// Local command for a transport program (`ssh`, `sh`) and its argv.
pub fn transport_command<I, S>(program: &str, args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd
}
