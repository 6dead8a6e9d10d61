//! In-Memory Report Writer
//!
//! Keeps written reports instead of touching the filesystem.
//! Useful for testing.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::report::Report;
use crate::ports::{ReportWriteError, ReportWriter, WrittenReport};

/// Records every report it is asked to write.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportWriter {
    written: Arc<Mutex<Vec<(PathBuf, Report)>>>,
}

impl InMemoryReportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently written report and its destination.
    pub fn last(&self) -> Option<(PathBuf, Report)> {
        self.lock().last().cloned()
    }

    pub fn write_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(PathBuf, Report)>> {
        self.written.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ReportWriter for InMemoryReportWriter {
    fn write(&self, report: &Report, destination: &Path) -> Result<WrittenReport, ReportWriteError> {
        self.lock().push((destination.to_path_buf(), report.clone()));
        Ok(WrittenReport {
            path: destination.to_path_buf(),
            sheet_names: report.sections.iter().map(|s| s.sheet_name.clone()).collect(),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().iter().any(|(written, _)| written == path)
    }
}
