//! Command lines issued on the remotes during a locktest run.

use locktest_core::RemoteCommand;
use locktest_model::{ClientSpec, LISTEN_PORT, Layout, MARKER_OWNER, SOURCE_URL};

/// Fetch and compile the test binary into the scratch directory.
///
/// Fails if the archive or scratch directory already exists: one locktest per
/// job.
pub(crate) fn build(layout: &Layout, spec: &ClientSpec) -> RemoteCommand {
    RemoteCommand::program("mkdir")
        .arg(layout.archive_dir())
        .and()
        .arg("mkdir")
        .arg(layout.scratch_dir())
        .and()
        .args(["wget", "-nv", SOURCE_URL, "-O"])
        .arg(layout.source_path())
        .and()
        .arg("g++")
        .arg(layout.source_path())
        .arg("-o")
        .arg(layout.binary_path())
        .with_stream(format!("locktest_client.{spec}"))
}

/// Create the lock file in the host mount and hand it to the test user.
pub(crate) fn prepare_marker(layout: &Layout, host: &ClientSpec) -> RemoteCommand {
    let marker = layout.marker_path(host);
    RemoteCommand::program("sudo")
        .arg("touch")
        .arg(&marker)
        .and()
        .args(["sudo", "chown", MARKER_OWNER])
        .arg(marker)
        .with_stream("locktest.host")
}

/// Listening side.
pub(crate) fn listen(layout: &Layout, host: &ClientSpec) -> RemoteCommand {
    RemoteCommand::program(layout.binary_path())
        .arg("-p")
        .arg(LISTEN_PORT.to_string())
        .arg("-d")
        .arg(layout.marker_path(host))
        .with_stream("locktest.host")
}

/// Connecting side. The marker path is under the client's own mount.
pub(crate) fn connect(layout: &Layout, client: &ClientSpec, host_addr: &str) -> RemoteCommand {
    RemoteCommand::program(layout.binary_path())
        .arg("-p")
        .arg(LISTEN_PORT.to_string())
        .arg("-d")
        .arg("-h")
        .arg(host_addr)
        .arg(layout.marker_path(client))
        .with_stream("locktest.client")
}

/// Remove source and binary, then the scratch directory itself.
///
/// Safe to repeat: the directory is recreated first and `rm -f` ignores
/// missing files.
pub(crate) fn cleanup(layout: &Layout, spec: &ClientSpec) -> RemoteCommand {
    let scratch = layout.scratch_dir();
    RemoteCommand::program("mkdir")
        .arg("-p")
        .arg(&scratch)
        .and()
        .args(["rm", "-f"])
        .arg(layout.source_path())
        .and()
        .args(["rm", "-f"])
        .arg(layout.binary_path())
        .and()
        .arg("rmdir")
        .arg(scratch)
        .with_stream(format!("locktest.cleanup.{spec}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(s: &str) -> ClientSpec {
        s.parse().unwrap()
    }

    #[test]
    fn build_line() {
        let cmd = build(&Layout::default(), &spec("client.1"));
        assert_eq!(
            cmd.to_shell(),
            "mkdir /tmp/cephtest/archive/locktest && mkdir /tmp/cephtest/locktest && \
             wget -nv https://raw.github.com/gregsfortytwo/xfstests-ceph/master/src/locktest.c \
             -O /tmp/cephtest/locktest/locktest.c && \
             g++ /tmp/cephtest/locktest/locktest.c -o /tmp/cephtest/locktest/locktest"
        );
        assert_eq!(cmd.stream(), Some("locktest_client.client.1"));
        assert!(cmd.check());
    }

    #[test]
    fn marker_line() {
        let cmd = prepare_marker(&Layout::default(), &spec("client.0"));
        assert_eq!(
            cmd.to_shell(),
            "sudo touch /tmp/cephtest/mnt.0/locktestfile && \
             sudo chown ubuntu.ubuntu /tmp/cephtest/mnt.0/locktestfile"
        );
    }

    #[test]
    fn launch_lines() {
        let layout = Layout::default();
        assert_eq!(
            listen(&layout, &spec("client.0")).to_shell(),
            "/tmp/cephtest/locktest/locktest -p 6788 -d /tmp/cephtest/mnt.0/locktestfile"
        );
        assert_eq!(
            connect(&layout, &spec("client.1"), "10.0.0.5").to_shell(),
            "/tmp/cephtest/locktest/locktest -p 6788 -d -h 10.0.0.5 /tmp/cephtest/mnt.1/locktestfile"
        );
    }

    #[test]
    fn cleanup_line() {
        let cmd = cleanup(&Layout::default(), &spec("client.0"));
        assert_eq!(
            cmd.to_shell(),
            "mkdir -p /tmp/cephtest/locktest && rm -f /tmp/cephtest/locktest/locktest.c && \
             rm -f /tmp/cephtest/locktest/locktest && rmdir /tmp/cephtest/locktest"
        );
        assert_eq!(cmd.stream(), Some("locktest.cleanup.client.0"));
    }
}
