use crate::{
    ARCHIVE_DIR_NAME, BINARY_FILE, ClientSpec, MARKER_FILE, MOUNT_DIR_PREFIX, SCRATCH_DIR_NAME,
    SOURCE_FILE, TEST_DIR,
};

/// Remote path convention for a locktest run.
///
/// All paths live under one test directory, [`TEST_DIR`] unless relocated with
/// [`Layout::with_test_dir`]. Paths are remote (POSIX) paths and are kept as
/// plain strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    test_dir: String,
}

impl Layout {
    pub fn new() -> Self {
        Self {
            test_dir: TEST_DIR.to_string(),
        }
    }

    pub fn with_test_dir(test_dir: impl Into<String>) -> Self {
        let test_dir = test_dir.into();
        let trimmed = test_dir.trim_end_matches('/');
        Self {
            test_dir: if trimmed.is_empty() {
                "/".to_string()
            } else {
                trimmed.to_string()
            },
        }
    }

    #[inline]
    pub fn test_dir(&self) -> &str {
        &self.test_dir
    }

    pub fn scratch_dir(&self) -> String {
        self.join(SCRATCH_DIR_NAME)
    }

    pub fn archive_dir(&self) -> String {
        self.join(&format!("{ARCHIVE_DIR_NAME}/{SCRATCH_DIR_NAME}"))
    }

    pub fn source_path(&self) -> String {
        format!("{}/{SOURCE_FILE}", self.scratch_dir())
    }

    pub fn binary_path(&self) -> String {
        format!("{}/{BINARY_FILE}", self.scratch_dir())
    }

    /// Mount directory of a client: `<test_dir>/mnt.<id>`.
    pub fn mount_path(&self, spec: &ClientSpec) -> String {
        self.join(&format!("{MOUNT_DIR_PREFIX}{}", spec.id()))
    }

    /// Marker file under the given client's mount.
    pub fn marker_path(&self, spec: &ClientSpec) -> String {
        format!("{}/{MARKER_FILE}", self.mount_path(spec))
    }

    fn join(&self, rel: &str) -> String {
        if self.test_dir == "/" {
            format!("/{rel}")
        } else {
            format!("{}/{rel}", self.test_dir)
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(s: &str) -> ClientSpec {
        s.parse().unwrap()
    }

    #[test]
    fn mount_path_uses_client_id() {
        let layout = Layout::default();
        assert_eq!(layout.mount_path(&spec("client.3")), "/tmp/cephtest/mnt.3");
        assert_eq!(
            layout.marker_path(&spec("client.0")),
            "/tmp/cephtest/mnt.0/locktestfile"
        );
    }

    #[test]
    fn scratch_and_archive_paths() {
        let layout = Layout::default();
        assert_eq!(layout.scratch_dir(), "/tmp/cephtest/locktest");
        assert_eq!(layout.archive_dir(), "/tmp/cephtest/archive/locktest");
        assert_eq!(layout.source_path(), "/tmp/cephtest/locktest/locktest.c");
        assert_eq!(layout.binary_path(), "/tmp/cephtest/locktest/locktest");
    }

    #[test]
    fn relocated_test_dir_drops_trailing_slash() {
        let layout = Layout::with_test_dir("/var/tmp/run/");
        assert_eq!(layout.test_dir(), "/var/tmp/run");
        assert_eq!(layout.scratch_dir(), "/var/tmp/run/locktest");
        assert_eq!(layout.mount_path(&spec("client.9")), "/var/tmp/run/mnt.9");
    }

    #[test]
    fn root_test_dir_has_no_double_slash() {
        let layout = Layout::with_test_dir("/");
        assert_eq!(layout.scratch_dir(), "/locktest");
    }
}
