use serde::{Deserialize, Serialize};

use crate::ExitCode;

/// Exit codes of the host and client test processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub host: ExitCode,
    pub client: ExitCode,
}

impl Outcome {
    pub fn new(host: ExitCode, client: ExitCode) -> Self {
        Self { host, client }
    }

    /// `true` only if both processes exited with `0`.
    pub fn passed(&self) -> bool {
        self.host == 0 && self.client == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_only_when_both_zero() {
        assert!(Outcome::new(0, 0).passed());
        assert!(!Outcome::new(0, 1).passed());
        assert!(!Outcome::new(1, 0).passed());
        assert!(!Outcome::new(-1, 0).passed());
    }
}
