//! Observability setup for ragchat: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
