use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format {given:?}, expected one of text|json|journald")]
    UnknownFormat { given: String },
    #[error("journald logging needs Linux and the `journald` feature")]
    JournaldUnavailable,
    #[error("a global logger is already installed")]
    AlreadyInitialized,
    #[error("cannot install logger: {0}")]
    Install(String),
    #[error("bad log filter {directive:?}: {reason}")]
    BadFilter { directive: String, reason: String },
}
