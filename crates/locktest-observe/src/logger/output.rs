//! Text rendering of remote command output.
//!
//! The exec layer logs every line a remote command prints as an event on
//! [`REMOTE_OUTPUT_TARGET`] with `stream` and `fd` fields. In text mode those
//! events are printed as `<time> <stream>[<fd>] <line>` so the output of the
//! host and the client can be told apart at a glance. All other events use
//! the wrapped formatter.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Target of remote command output events.
pub const REMOTE_OUTPUT_TARGET: &str = "locktest.exec.output";

const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

pub(crate) struct RemoteLines<F, T> {
    inner: F,
    timer: T,
}

impl<F, T> RemoteLines<F, T> {
    pub(crate) fn new(inner: F, timer: T) -> Self {
        Self { inner, timer }
    }
}

impl<S, N, F, T> FormatEvent<S, N> for RemoteLines<F, T>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    F: FormatEvent<S, N>,
    T: FormatTime,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        if event.metadata().target() != REMOTE_OUTPUT_TARGET {
            return self.inner.format_event(ctx, writer, event);
        }

        let mut line = OutputLine::default();
        event.record(&mut line);

        let ansi = writer.has_ansi_escapes();
        if ansi {
            writer.write_str(DIM)?;
        }
        self.timer.format_time(&mut writer)?;
        write!(writer, " {}[{}]", line.stream, line.fd)?;
        if ansi {
            writer.write_str(RESET)?;
        }
        writeln!(writer, " {}", line.message)
    }
}

#[derive(Default)]
struct OutputLine {
    stream: String,
    fd: String,
    message: String,
}

impl Visit for OutputLine {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "stream" => self.stream = value.to_string(),
            "fd" => self.fd = value.to_string(),
            "message" => self.message = value.to_string(),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}
