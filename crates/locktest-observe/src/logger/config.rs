use std::io::IsTerminal;

use crate::logger::format::LoggerFormat;
use crate::logger::output::REMOTE_OUTPUT_TARGET;

const DEFAULT_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `info` or `debug,locktest.exec=trace`.
    pub level: String,
    /// Log every line the remote commands print.
    pub remote_output: bool,
    pub use_color: bool,
}

impl LoggerConfig {
    pub fn with_format(mut self, format: LoggerFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_remote_output(mut self, on: bool) -> Self {
        self.remote_output = on;
        self
    }

    /// Filter directive actually installed.
    ///
    /// Hiding remote output silences its target unless `level` already
    /// mentions it.
    pub fn directives(&self) -> String {
        let level = match self.level.trim() {
            "" => DEFAULT_LEVEL,
            level => level,
        };
        if self.remote_output || level.contains(REMOTE_OUTPUT_TARGET) {
            level.to_string()
        } else {
            format!("{level},{REMOTE_OUTPUT_TARGET}=off")
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: DEFAULT_LEVEL.to_string(),
            remote_output: true,
            use_color,
        }
    }
}
