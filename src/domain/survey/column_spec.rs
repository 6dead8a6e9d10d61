//! Column Spec - 0-based column index selections such as `"0-5,7,9-11"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// An ordered, duplicate-free list of 0-based spreadsheet column indices.
///
/// Accepts either a list of integers or a compact string of indices and
/// inclusive ranges. Order is preserved because split-half parity depends
/// on item position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColumnSpecRepr", into = "Vec<usize>")]
pub struct ColumnSpec(Vec<usize>);

#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnSpecRepr {
    Single(usize),
    List(Vec<usize>),
    Text(String),
}

impl ColumnSpec {
    /// Creates a spec from explicit indices, dropping repeats.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut out = Vec::new();
        for index in indices {
            if !out.contains(&index) {
                out.push(index);
            }
        }
        Self(out)
    }

    /// Creates a spec covering `start..=end`.
    pub fn range(start: usize, end: usize) -> Self {
        Self::from_indices(start..=end)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for ColumnSpec {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut indices = Vec::new();

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('-') {
                Some((start, end)) => {
                    let start = parse_index(start)?;
                    let end = parse_index(end)?;
                    if start > end {
                        return Err(ValidationError::invalid_format(
                            "columns",
                            format!("reversed range {}", part),
                        ));
                    }
                    indices.extend(start..=end);
                }
                None => indices.push(parse_index(part)?),
            }
        }

        Ok(Self::from_indices(indices))
    }
}

fn parse_index(raw: &str) -> Result<usize, ValidationError> {
    raw.trim().parse::<usize>().map_err(|_| {
        ValidationError::invalid_format("columns", format!("'{}' is not a column index", raw.trim()))
    })
}

impl TryFrom<ColumnSpecRepr> for ColumnSpec {
    type Error = ValidationError;

    fn try_from(repr: ColumnSpecRepr) -> Result<Self, Self::Error> {
        match repr {
            ColumnSpecRepr::Single(index) => Ok(Self::from_indices([index])),
            ColumnSpecRepr::List(indices) => Ok(Self::from_indices(indices)),
            ColumnSpecRepr::Text(text) => text.parse(),
        }
    }
}

impl From<ColumnSpec> for Vec<usize> {
    fn from(spec: ColumnSpec) -> Self {
        spec.0
    }
}

impl fmt::Display for ColumnSpec {
    /// Writes the compact form, collapsing consecutive runs into ranges.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        let mut i = 0;
        while i < self.0.len() {
            let start = self.0[i];
            let mut j = i;
            while j + 1 < self.0.len() && self.0[j + 1] == self.0[j] + 1 {
                j += 1;
            }
            if j > i {
                parts.push(format!("{}-{}", start, self.0[j]));
            } else {
                parts.push(start.to_string());
            }
            i = j + 1;
        }
        write!(f, "{}", parts.join(","))
    }
}
