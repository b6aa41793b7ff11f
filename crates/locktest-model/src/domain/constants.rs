//! Remote filesystem and invocation conventions shared by every locktest run.

/// Root of the per-run test tree on every remote.
pub const TEST_DIR: &str = "/tmp/cephtest";

/// Name of the scratch directory (under [`TEST_DIR`]) holding source and binary.
pub const SCRATCH_DIR_NAME: &str = "locktest";

/// Archive subtree (under [`TEST_DIR`]) collected by the external archiver.
pub const ARCHIVE_DIR_NAME: &str = "archive";

/// Prefix of per-client mount directories: `<TEST_DIR>/mnt.<id>`.
pub const MOUNT_DIR_PREFIX: &str = "mnt.";

/// Where the test source is fetched from.
pub const SOURCE_URL: &str =
    "https://raw.github.com/gregsfortytwo/xfstests-ceph/master/src/locktest.c";

pub const SOURCE_FILE: &str = "locktest.c";
pub const BINARY_FILE: &str = "locktest";

/// Marker file both processes lock, created inside the host mount.
pub const MARKER_FILE: &str = "locktestfile";

/// `user.group` the marker file is handed to after creation.
pub const MARKER_OWNER: &str = "ubuntu.ubuntu";

/// Rendezvous port the host listens on and the client dials.
pub const LISTEN_PORT: u16 = 6788;

/// Role type accepted in client specs (`client.<id>`).
pub const CLIENT_ROLE: &str = "client";
