use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::logger::{config::LoggerConfig, error::LoggerError, output::RemoteLines};

pub(crate) fn text(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = mk_filter(&cfg.directives())?;
    let events = RemoteLines::new(fmt::format().with_timer(mk_timer()), mk_timer());
    let fmt_layer = fmt::layer().with_ansi(cfg.use_color).event_format(events);

    install(tracing_subscriber::registry().with(filter).with(fmt_layer))
}

pub(crate) fn json(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = mk_filter(&cfg.directives())?;
    let fmt_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_timer(mk_timer());

    install(tracing_subscriber::registry().with(filter).with(fmt_layer))
}

#[cfg(all(target_os = "linux", feature = "journald"))]
pub(crate) fn journald(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = mk_filter(&cfg.directives())?;
    let journald = tracing_journald::layer()
        .map_err(|e| LoggerError::Install(format!("journald: {e}")))?
        .with_syslog_identifier("locktest-agentd".to_string());

    install(tracing_subscriber::registry().with(filter).with(journald))
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
pub(crate) fn journald(_cfg: &LoggerConfig) -> Result<(), LoggerError> {
    Err(LoggerError::JournaldUnavailable)
}

fn mk_filter(directive: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(directive).map_err(|e| LoggerError::BadFilter {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}

fn mk_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn install<S>(subscriber: S) -> Result<(), LoggerError>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber.try_init().map_err(|e| classify(&e.to_string()))
}

fn classify(message: &str) -> LoggerError {
    if message.contains("SetGlobalDefaultError") || message.contains("global default") {
        LoggerError::AlreadyInitialized
    } else {
        LoggerError::Install(message.to_string())
    }
}
