//! Diagnostic Sink Port - Where non-fatal findings go.
//!
//! Replaces a process-wide logger: the application passes a sink in, and
//! tests can swap it for one that collects.

use crate::domain::foundation::Diagnostic;

pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: &Diagnostic);

    fn record_all(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.record(diagnostic);
        }
    }
}
