//! Tracing Diagnostic Sink - Forwards diagnostics to `tracing`.

use crate::domain::foundation::{Diagnostic, Severity};
use crate::ports::DiagnosticSink;

/// Emits each diagnostic as a `tracing` event at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnosticSink;

impl TracingDiagnosticSink {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingDiagnosticSink {
    fn record(&self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Info => tracing::info!(
                code = %diagnostic.code,
                "{}",
                diagnostic.message
            ),
            Severity::Warning => tracing::warn!(
                code = %diagnostic.code,
                "{}",
                diagnostic.message
            ),
        }
    }
}
