mod config;
mod error;
mod format;
mod log;
mod output;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;
pub use output::REMOTE_OUTPUT_TARGET;

/// Install the global subscriber described by `cfg`.
///
/// Fails with [`LoggerError::AlreadyInitialized`] on a second call.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    match cfg.format {
        LoggerFormat::Text => log::text(cfg),
        LoggerFormat::Json => log::json(cfg),
        LoggerFormat::Journald => log::journald(cfg),
    }
}
