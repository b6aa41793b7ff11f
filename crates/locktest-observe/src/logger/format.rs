use std::fmt;
use std::str::FromStr;

use crate::logger::error::LoggerError;

/// Where and how log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerFormat {
    /// Human readable lines on stdout; remote command output is rendered
    /// as `<stream>[<fd>] <line>`.
    Text,
    /// One JSON object per record, with the current span.
    Json,
    /// Native journald fields.
    Journald,
}

impl LoggerFormat {
    pub const ALL: [LoggerFormat; 3] = [Self::Text, Self::Json, Self::Journald];

    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Journald => "journald",
        }
    }

    /// Whether this build can install the format.
    pub fn is_available(self) -> bool {
        match self {
            Self::Journald => cfg!(all(target_os = "linux", feature = "journald")),
            Self::Text | Self::Json => true,
        }
    }
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let format = Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LoggerError::UnknownFormat {
                given: s.to_string(),
            })?;

        if !format.is_available() {
            return Err(LoggerError::JournaldUnavailable);
        }
        Ok(format)
    }
}

impl fmt::Display for LoggerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" Text ".parse::<LoggerFormat>().unwrap(), LoggerFormat::Text);
        assert_eq!("JSON".parse::<LoggerFormat>().unwrap(), LoggerFormat::Json);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(matches!(
            "yaml".parse::<LoggerFormat>(),
            Err(LoggerError::UnknownFormat { given }) if given == "yaml"
        ));
    }

    #[cfg(not(all(target_os = "linux", feature = "journald")))]
    #[test]
    fn journald_requires_feature() {
        assert!(!LoggerFormat::Journald.is_available());
        assert!(matches!(
            "journald".parse::<LoggerFormat>(),
            Err(LoggerError::JournaldUnavailable)
        ));
    }

    #[test]
    fn every_available_format_round_trips_its_name() {
        for f in LoggerFormat::ALL.into_iter().filter(|f| f.is_available()) {
            assert_eq!(f.to_string().parse::<LoggerFormat>().unwrap(), f);
        }
    }
}
