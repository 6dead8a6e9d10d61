//! Column resolution - maps 0-based column indices onto header names.

use serde::{Deserialize, Serialize};

use super::ColumnSpec;
use crate::domain::foundation::{Diagnostic, ErrorCode};

/// A spreadsheet column that exists in the loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedColumn {
    pub name: String,
    pub index: usize,
}

impl ResolvedColumn {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// Resolves column indices against a header row.
///
/// Header names become item identifiers, so they are made unique first:
/// blank headers become `Column N` (1-based, as a spreadsheet user counts)
/// and repeated names get a `#2`, `#3`... suffix.
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    names: Vec<String>,
}

impl ColumnResolver {
    /// Creates a resolver over the given header row.
    pub fn new(headers: &[String]) -> Self {
        let mut names: Vec<String> = Vec::with_capacity(headers.len());

        for (index, header) in headers.iter().enumerate() {
            let base = match header.trim() {
                "" => format!("Column {}", index + 1),
                trimmed => trimmed.to_string(),
            };

            let mut candidate = base.clone();
            let mut occurrence = 1;
            while names.contains(&candidate) {
                occurrence += 1;
                candidate = format!("{}#{}", base, occurrence);
            }
            names.push(candidate);
        }

        Self { names }
    }

    /// Unique column names, in sheet order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Resolves a spec, skipping indices past the last column.
    ///
    /// Each skipped index yields a `MissingColumn` warning naming `context`
    /// (e.g. "items" or "dimension 2") so the user can see which selection
    /// was trimmed.
    pub fn resolve(&self, spec: &ColumnSpec, context: &str) -> (Vec<ResolvedColumn>, Vec<Diagnostic>) {
        let mut resolved = Vec::with_capacity(spec.len());
        let mut diagnostics = Vec::new();

        for &index in spec.indices() {
            match self.names.get(index) {
                Some(name) => resolved.push(ResolvedColumn::new(name.clone(), index)),
                None => diagnostics.push(Diagnostic::warning(
                    ErrorCode::MissingColumn,
                    format!(
                        "{}: column index {} is out of range (sheet has {} columns); skipped",
                        context,
                        index,
                        self.names.len()
                    ),
                )),
            }
        }

        (resolved, diagnostics)
    }
}
