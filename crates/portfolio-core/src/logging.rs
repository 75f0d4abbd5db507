//! Structured logging into the browser console.
//!
//! A custom tracing [`Layer`] turns every event into a [`LogLine`] and hands
//! it to a [`LogSink`]. The browser binding supplies a sink that calls the
//! matching `console.*` method; tests capture lines in memory.
//!
//! ## Usage
//!
//! ```ignore
//! use portfolio_core::logging;
//! use tracing::level_filters::LevelFilter;
//!
//! logging::install(BrowserConsole, LevelFilter::INFO)?;
//! tracing::info!(sections = 4, "portfolio ready");
//! ```

use std::fmt::Write as FmtWrite;

use serde::Serialize;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::error::PortfolioResult;

/// Destination for formatted log lines.
pub trait LogSink {
    fn write(&self, line: &LogLine);
}

/// A single formatted log event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogLine {
    /// trace, debug, info, warn or error
    pub level: String,
    /// Module path (e.g. "portfolio_core::nav")
    pub target: String,
    pub msg: String,
    /// Structured fields recorded with the event
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub fields: serde_json::Map<String, serde_json::Value>,
    /// Enclosing spans, root first, joined with " > "
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<String>,
}

impl LogLine {
    /// `LEVEL target: message key=value ...`
    pub fn render(&self) -> String {
        let mut out = format!("{} {}: {}", self.level.to_uppercase(), self.target, self.msg);
        for (key, value) in &self.fields {
            match value {
                serde_json::Value::String(s) => {
                    let _ = write!(out, " {}={}", key, s);
                }
                other => {
                    let _ = write!(out, " {}={}", key, other);
                }
            }
        }
        if let Some(ref span) = self.span {
            let _ = write!(out, " [{}]", span);
        }
        out
    }
}

/// A tracing Layer that forwards events to a [`LogSink`].
pub struct ConsoleLayer<K> {
    sink: K,
}

impl<K: LogSink> ConsoleLayer<K> {
    pub fn new(sink: K) -> Self {
        Self { sink }
    }
}

impl<S, K> Layer<S> for ConsoleLayer<K>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    K: LogSink + 'static,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let span = ctx.event_scope(event).and_then(|scope| {
            let names: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            (!names.is_empty()).then(|| names.join(" > "))
        });

        let line = LogLine {
            level: level_name(metadata.level()).to_string(),
            target: metadata.target().to_string(),
            msg: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
            span,
        };
        self.sink.write(&line);
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Collects the message and structured fields of an event.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl FieldVisitor {
    /// The `message` field becomes the line text; anything else is kept as
    /// a structured field.
    fn put(&mut self, field: &Field, value: serde_json::Value) {
        match (field.name(), value) {
            ("message", serde_json::Value::String(text)) => self.message = Some(text),
            ("message", other) => self.message = Some(other.to_string()),
            (name, value) => {
                self.fields.insert(name.to_string(), value);
            }
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value).into());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.into());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        // NaN and infinities have no JSON form
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.put(field, n.into());
        }
    }
}

/// Install a global subscriber writing to `sink` at `level` and above.
pub fn install<K>(sink: K, level: LevelFilter) -> PortfolioResult<()>
where
    K: LogSink + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry().with(ConsoleLayer::new(sink).with_filter(level));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
