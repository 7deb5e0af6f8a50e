//! Tracing layer that forwards events to the host sink

use crate::reload::ReloadHandle;
use crate::sink::LogSink;
use mndx_core::LogLevel;
use std::fmt::Write;
use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that renders events and hands them to a [`LogSink`]
///
/// The rendered message is the event's `message` followed by its structured
/// fields as `key=value` pairs, e.g. `session opened declared=3`.
pub struct HostLogLayer {
    sink: &'static LogSink,
}

impl HostLogLayer {
    /// Create a layer feeding the global sink
    pub fn new() -> Self {
        Self {
            sink: LogSink::global(),
        }
    }

    /// Create a layer feeding a specific sink
    pub fn with_sink(sink: &'static LogSink) -> Self {
        Self { sink }
    }

    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for HostLogLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for HostLogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());
        if !self.sink.is_enabled(level) {
            return;
        }

        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        self.sink.emit(level, metadata.target(), &visitor.finish());
    }

    // The sink's callback and level change at runtime, so never let tracing
    // cache a per-callsite verdict
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.sink.is_enabled(Self::convert_level(metadata.level()))
    }
}

/// Collects the message and trailing `key=value` fields of an event
#[derive(Default)]
struct RecordVisitor {
    message: String,
    fields: String,
}

impl RecordVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for RecordVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }
}

/// Install the host logging subscriber as the global default
///
/// The subscriber is a reloadable level filter in front of
/// [`HostLogLayer`]; its handle is stored in [`ReloadHandle::global`].
/// Calling this again is harmless: only the first call installs anything.
pub fn init_logging() {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::reload;

    let (filter, handle) = reload::Layer::new(LevelFilter::TRACE);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(HostLogLayer::new());

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        ReloadHandle::global().set_handle(handle);
        let _ = ReloadHandle::global().reload_level(LogSink::global().level());
    }
}
