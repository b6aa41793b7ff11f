//! Spawning and reaping of the local transport child (`ssh` or `sh`).

use std::process::{ExitStatus, Stdio};
use std::time::Instant;

use locktest_core::{RemoteCommand, RemoteError, RemoteProcess, RunOutput};
use locktest_model::ExitCode;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info, trace};

/// Builds the local command that executes a remote command line.
pub(crate) trait Launcher {
    fn identity(&self) -> &str;
    fn command(&self, line: &str) -> Command;
}

pub(crate) async fn run<L: Launcher>(
    launcher: &L,
    cmd: &RemoteCommand,
) -> Result<RunOutput, RemoteError> {
    let started = Instant::now();
    let line = cmd.to_shell();
    let child = start(launcher, cmd, &line)?;
    let code = reap(child, launcher.identity().to_string(), stream_of(launcher, cmd)).await?;
    let duration = started.elapsed();

    debug!(
        target: "locktest.exec",
        remote = launcher.identity(),
        code,
        duration_ms = duration.as_millis() as u64,
        "command finished"
    );

    if code != 0 && cmd.check() {
        return Err(RemoteError::NonZeroExit {
            remote: launcher.identity().to_string(),
            command: line,
            code,
        });
    }
    Ok(RunOutput { code, duration })
}

pub(crate) fn spawn<L: Launcher>(
    launcher: &L,
    cmd: &RemoteCommand,
) -> Result<RemoteProcess, RemoteError> {
    let line = cmd.to_shell();
    let child = start(launcher, cmd, &line)?;
    let pid = child.id();
    let remote = launcher.identity().to_string();

    Ok(RemoteProcess::spawn(
        remote.clone(),
        pid,
        reap(child, remote, stream_of(launcher, cmd)),
    ))
}

fn stream_of<L: Launcher>(launcher: &L, cmd: &RemoteCommand) -> String {
    cmd.stream().unwrap_or(launcher.identity()).to_string()
}

fn start<L: Launcher>(launcher: &L, cmd: &RemoteCommand, line: &str) -> Result<Child, RemoteError> {
    if cmd.is_empty() {
        return Err(RemoteError::Spawn {
            remote: launcher.identity().to_string(),
            reason: "empty command".into(),
        });
    }

    let mut local = launcher.command(line);
    local
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    trace!(target: "locktest.exec", remote = launcher.identity(), %line, "spawn");
    local.spawn().map_err(|e| RemoteError::Spawn {
        remote: launcher.identity().to_string(),
        reason: e.to_string(),
    })
}

async fn reap(mut child: Child, remote: String, stream: String) -> Result<ExitCode, RemoteError> {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (status, _, _) = tokio::join!(
        child.wait(),
        pump(stdout, &stream, "stdout"),
        pump(stderr, &stream, "stderr"),
    );

    let status = status.map_err(|e| RemoteError::Io {
        remote: remote.clone(),
        reason: format!("wait: {e}"),
    })?;
    Ok(exit_code(&remote, status))
}

/// Log each output line until EOF. Bytes are decoded lossily and reading
/// continues past errors so the child never sees a closed pipe.
async fn pump<R>(reader: Option<R>, stream: &str, fd: &'static str)
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return;
    };
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']);
                info!(target: "locktest.exec.output", stream, fd, "{line}");
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!(target: "locktest.exec", stream, fd, error = %e, "output read failed");
                drain(reader.get_mut()).await;
                break;
            }
        }
    }
}

async fn drain<R>(reader: &mut R)
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0u8; 8192];
    while let Ok(n) = reader.read(&mut chunk).await {
        if n == 0 {
            break;
        }
    }
}

fn exit_code(remote: &str, status: ExitStatus) -> ExitCode {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        debug!(target: "locktest.exec", remote, signal = ?status.signal(), "terminated by signal");
    }
    #[cfg(not(unix))]
    debug!(target: "locktest.exec", remote, "terminated without exit code");

    -1
}
