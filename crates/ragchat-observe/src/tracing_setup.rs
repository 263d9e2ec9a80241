//! Tracing subscriber initialization with structured logging and optional
//! OpenTelemetry trace export.
//!
//! # Usage
//!
//! ```no_run
//! use ragchat_observe::tracing_setup::{init_tracing, TracingOptions};
//!
//! init_tracing(TracingOptions::new("warn")).unwrap();
//! ```

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use std::io::Write;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::fmt::MakeWriter;

/// Stores the OTel tracer provider so it can be shut down cleanly on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// Where log lines go instead of stderr, while set.
static LOG_REDIRECT: Mutex<Option<Box<dyn Write + Send>>> = Mutex::new(None);

/// Send log lines to `writer` until [`restore_log_output`] is called.
///
/// Used while a line editor owns the terminal, so log output is printed
/// above the prompt instead of through it.
pub fn redirect_logs(writer: impl Write + Send + 'static) {
    *LOG_REDIRECT.lock().unwrap_or_else(|p| p.into_inner()) = Some(Box::new(writer));
}

/// Send log lines back to stderr.
pub fn restore_log_output() {
    *LOG_REDIRECT.lock().unwrap_or_else(|p| p.into_inner()) = None;
}

/// `MakeWriter` for the fmt layers: stderr, or the redirect target if set.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = LogSinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogSinkWriter
    }
}

/// Writer handed out by [`LogSink`] for a single event.
pub struct LogSinkWriter;

impl Write for LogSinkWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut redirect = LOG_REDIRECT.lock().unwrap_or_else(|p| p.into_inner());
        match redirect.as_mut() {
            Some(writer) => writer.write(buf),
            None => std::io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let mut redirect = LOG_REDIRECT.lock().unwrap_or_else(|p| p.into_inner());
        match redirect.as_mut() {
            Some(writer) => writer.flush(),
            None => std::io::stderr().flush(),
        }
    }
}

/// How the global subscriber should be assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingOptions {
    /// Filter directive used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Bridge spans to OpenTelemetry via the stdout exporter.
    pub otel: bool,
}

impl TracingOptions {
    pub fn new(default_filter: impl Into<String>) -> Self {
        Self {
            default_filter: default_filter.into(),
            json: false,
            otel: false,
        }
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn otel(mut self, otel: bool) -> Self {
        self.otel = otel;
        self
    }

    /// The filter actually applied: `RUST_LOG` if set and valid, else the default.
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// Initialize the global tracing subscriber.
///
/// Log lines go to stderr so they never interleave with command output on
/// stdout (`--json` results, rendered replies). See [`redirect_logs`] for
/// the interactive chat.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(options: TracingOptions) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = options.env_filter();

    let pretty_layer = (!options.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(LogSink)
    });
    let json_layer = options.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(LogSink)
    });

    let otel_layer = options.otel.then(|| {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("ragchat");

        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);

        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty_layer)
        .with(json_layer)
        .with(otel_layer)
        .try_init()?;

    Ok(())
}

/// Flush pending traces and shut down the OpenTelemetry tracer provider.
///
/// Safe to call even when OTel was not enabled (no-op in that case).
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = TracingOptions::new("info").json(true).otel(false);
        assert_eq!(options.default_filter, "info");
        assert!(options.json);
        assert!(!options.otel);
    }

    #[test]
    fn test_second_init_fails() {
        // The global subscriber can only be set once per process.
        let _ = init_tracing(TracingOptions::new("warn"));
        assert!(init_tracing(TracingOptions::new("warn")).is_err());
    }

    /// Cloneable in-memory sink.
    #[derive(Clone, Default)]
    struct Capture(std::sync::Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_log_sink_follows_redirect() {
        let capture = Capture::default();
        redirect_logs(capture.clone());
        LogSink.make_writer().write_all(b"redirected line\n").unwrap();
        restore_log_output();
        LogSink.make_writer().write_all(b"back on stderr\n").unwrap();

        let written = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "redirected line\n");
    }

    #[test]
    fn test_shutdown_without_otel_is_noop() {
        shutdown_tracing();
    }
}
