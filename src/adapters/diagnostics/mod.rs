//! Diagnostic adapters - Implementations of `DiagnosticSink`.

mod collecting;
mod tracing_sink;

pub use collecting::CollectingDiagnosticSink;
pub use tracing_sink::TracingDiagnosticSink;
