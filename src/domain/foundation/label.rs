//! Bilingual (English / Arabic) display labels.

use serde::Serialize;
use std::fmt;

/// A label carried in both report languages.
///
/// Rendered as `"English / Arabic"`, which is how every header and
/// interpretation cell in the exported workbook reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BilingualLabel {
    pub english: &'static str,
    pub arabic: &'static str,
}

impl BilingualLabel {
    pub const fn new(english: &'static str, arabic: &'static str) -> Self {
        Self { english, arabic }
    }
}

impl fmt::Display for BilingualLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.english, self.arabic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilingual_label_displays_both_languages() {
        let label = BilingualLabel::new("Good", "جيد");
        assert_eq!(label.to_string(), "Good / جيد");
    }
}
