//! Item Set and Dimension Map - Instrument scope and its sub-constructs.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Diagnostic, ErrorCode, ValidationError};

/// An ordered sequence of unique item identifiers (column names).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSet(Vec<String>);

impl ItemSet {
    /// Creates an item set, rejecting blank or repeated identifiers.
    pub fn new(items: Vec<impl Into<String>>) -> Result<Self, ValidationError> {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();

        for (position, item) in items.iter().enumerate() {
            if item.trim().is_empty() {
                return Err(ValidationError::empty_field("item"));
            }
            if items[..position].contains(item) {
                return Err(ValidationError::invalid_format(
                    "items",
                    format!("item '{}' appears more than once", item),
                ));
            }
        }

        Ok(Self(items))
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.0.iter().any(|i| i == item)
    }

    /// Returns a copy with one item removed, keeping the others in order.
    pub fn without(&self, item: &str) -> Self {
        Self(self.0.iter().filter(|i| *i != item).cloned().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

/// A named, ordered subset of items representing one sub-construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub items: ItemSet,
}

impl Dimension {
    pub fn new(name: impl Into<String>, items: ItemSet) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}

/// Ordered dimensions partitioning (ideally) the instrument's items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionMap(Vec<Dimension>);

impl DimensionMap {
    /// Creates a map, rejecting blank or repeated dimension names.
    pub fn new(dimensions: Vec<Dimension>) -> Result<Self, ValidationError> {
        for (position, dimension) in dimensions.iter().enumerate() {
            if dimension.name.trim().is_empty() {
                return Err(ValidationError::empty_field("dimension name"));
            }
            if dimensions[..position].iter().any(|d| d.name == dimension.name) {
                return Err(ValidationError::invalid_format(
                    "dimensions",
                    format!("dimension '{}' is defined more than once", dimension.name),
                ));
            }
        }
        Ok(Self(dimensions))
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Dimension> {
        self.0.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dimension> {
        self.0.iter()
    }

    /// Sum of per-dimension item counts.
    pub fn assigned_item_count(&self) -> usize {
        self.0.iter().map(|d| d.items.len()).sum()
    }

    /// Checks the partition against the instrument's items.
    ///
    /// Returns a warning when per-dimension counts do not add up to the
    /// item count. The analysis still runs.
    pub fn coverage_diagnostic(&self, items: &ItemSet) -> Option<Diagnostic> {
        let assigned = self.assigned_item_count();
        if assigned == items.len() {
            return None;
        }
        Some(Diagnostic::warning(
            ErrorCode::DimensionCoverageMismatch,
            format!(
                "Dimensions cover {} items but {} items were selected",
                assigned,
                items.len()
            ),
        ))
    }
}
