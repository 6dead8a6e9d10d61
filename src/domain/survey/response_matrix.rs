//! Response Matrix - Participants x items numeric scores.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ValidationError};

/// Participants (rows) by items (columns); each cell a score or missing.
///
/// Participants keep the 0-based position they had in the cleaned table,
/// so results computed on a complete-case subset still point at the
/// right respondent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMatrix {
    items: Vec<String>,
    participants: Vec<usize>,
    values: Vec<Vec<Option<f64>>>,
}

impl ResponseMatrix {
    /// Creates a matrix with explicit participant identifiers.
    ///
    /// # Errors
    /// Fails if row count and participant count differ, or a row's width
    /// differs from the item count.
    pub fn new(
        items: Vec<String>,
        participants: Vec<usize>,
        values: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, ValidationError> {
        if participants.len() != values.len() {
            return Err(ValidationError::invalid_format(
                "participants",
                format!("{} ids for {} rows", participants.len(), values.len()),
            ));
        }
        if let Some((row, width)) = values
            .iter()
            .enumerate()
            .map(|(i, r)| (i, r.len()))
            .find(|(_, width)| *width != items.len())
        {
            return Err(ValidationError::invalid_format(
                "values",
                format!("row {} has {} cells, expected {}", row, width, items.len()),
            ));
        }

        Ok(Self {
            items,
            participants,
            values,
        })
    }

    /// Builds a matrix whose shape the caller already guarantees.
    pub(super) fn assemble(
        items: Vec<String>,
        participants: Vec<usize>,
        values: Vec<Vec<Option<f64>>>,
    ) -> Self {
        Self {
            items,
            participants,
            values,
        }
    }

    /// Creates a matrix numbering participants `0..n`.
    pub fn from_rows(
        items: Vec<impl Into<String>>,
        values: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, ValidationError> {
        let participants = (0..values.len()).collect();
        Self::new(items.into_iter().map(Into::into).collect(), participants, values)
    }

    /// Creates a fully observed matrix, convenient for tests and fixtures.
    pub fn from_complete_rows(
        items: Vec<impl Into<String>>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, ValidationError> {
        let values = rows
            .into_iter()
            .map(|r| r.into_iter().map(Some).collect())
            .collect();
        Self::from_rows(items, values)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn participants(&self) -> &[usize] {
        &self.participants
    }

    pub fn participant_count(&self) -> usize {
        self.values.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Index of an item column, if present.
    pub fn item_index(&self, item: &str) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }

    /// Score for one participant row and item.
    pub fn value(&self, row: usize, item: &str) -> Option<f64> {
        let column = self.item_index(item)?;
        self.values.get(row).and_then(|r| r[column])
    }

    /// Restricts to `items` and keeps only rows where every one is observed.
    ///
    /// Non-finite values count as missing.
    ///
    /// # Errors
    /// Returns a `MissingColumn` error if any requested item is absent.
    pub fn complete_cases(&self, items: &[String]) -> Result<CompleteCases, DomainError> {
        let columns = items
            .iter()
            .map(|item| {
                self.item_index(item)
                    .ok_or_else(|| DomainError::missing_column(item.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut participants = Vec::new();
        let mut rows = Vec::new();

        for (participant, row) in self.participants.iter().zip(&self.values) {
            let selected: Option<Vec<f64>> = columns
                .iter()
                .map(|&c| row[c].filter(|v| v.is_finite()))
                .collect();

            if let Some(selected) = selected {
                participants.push(*participant);
                rows.push(selected);
            }
        }

        Ok(CompleteCases {
            items: items.to_vec(),
            participants,
            rows,
        })
    }
}

/// A fully observed slice of a response matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteCases {
    items: Vec<String>,
    participants: Vec<usize>,
    rows: Vec<Vec<f64>>,
}

impl CompleteCases {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn participants(&self) -> &[usize] {
        &self.participants
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn participant_count(&self) -> usize {
        self.rows.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item_index(&self, item: &str) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }

    /// All scores for one item column.
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[index]).collect()
    }

    /// Per-participant sum over the given columns.
    pub fn row_sums(&self, columns: &[usize]) -> Vec<f64> {
        self.rows
            .iter()
            .map(|r| columns.iter().map(|&c| r[c]).sum())
            .collect()
    }

    /// Per-participant sum over the named items.
    ///
    /// # Errors
    /// Returns a `MissingColumn` error if an item is not part of this slice.
    pub fn sums_of(&self, items: &[String]) -> Result<Vec<f64>, DomainError> {
        let columns = items
            .iter()
            .map(|item| {
                self.item_index(item)
                    .ok_or_else(|| DomainError::missing_column(item.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.row_sums(&columns))
    }

    /// Per-participant sum over every item (the total score).
    pub fn totals(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.iter().sum()).collect()
    }
}
