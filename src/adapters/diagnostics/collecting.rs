//! Collecting Diagnostic Sink
//!
//! Stores diagnostics in memory so tests can assert on them.

use std::sync::{Arc, Mutex};

use crate::domain::foundation::{Diagnostic, ErrorCode};
use crate::ports::DiagnosticSink;

#[derive(Debug, Clone, Default)]
pub struct CollectingDiagnosticSink {
    recorded: Arc<Mutex<Vec<Diagnostic>>>,
}

impl CollectingDiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, in order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.recorded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.diagnostics().into_iter().filter(Diagnostic::is_warning).collect()
    }

    pub fn contains(&self, code: ErrorCode) -> bool {
        self.diagnostics().iter().any(|d| d.code == code)
    }
}

impl DiagnosticSink for CollectingDiagnosticSink {
    fn record(&self, diagnostic: &Diagnostic) {
        self.recorded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_in_order_and_filters_warnings() {
        let sink = CollectingDiagnosticSink::new();
        sink.record_all(&[
            Diagnostic::info(ErrorCode::HeaderRowsDiscarded, "skipped 1"),
            Diagnostic::warning(ErrorCode::MissingColumn, "index 9"),
        ]);

        assert_eq!(sink.diagnostics().len(), 2);
        assert_eq!(sink.warnings().len(), 1);
        assert!(sink.contains(ErrorCode::MissingColumn));
        assert!(!sink.contains(ErrorCode::ZeroVariance));
    }
}
