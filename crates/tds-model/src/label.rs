//! Three-level column labels and the measurement vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShapeError};

/// Number of header rows every column label carries.
pub const HEADER_DEPTH: usize = 3;

/// Composite column header: (category description, category code, measurement kind).
///
/// Metadata columns carry their key in `level0` and usually blank lower levels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnLabel {
    pub level0: String,
    pub level1: String,
    pub level2: String,
}

impl ColumnLabel {
    pub fn new(
        level0: impl Into<String>,
        level1: impl Into<String>,
        level2: impl Into<String>,
    ) -> Self {
        Self {
            level0: level0.into(),
            level1: level1.into(),
            level2: level2.into(),
        }
    }

    /// Builds a label from the header cells of one column.
    ///
    /// Fails with [`ShapeError::HeaderDepth`] unless exactly [`HEADER_DEPTH`] levels are given.
    pub fn from_levels<S: AsRef<str>>(column: usize, levels: &[S]) -> Result<Self> {
        match levels {
            [level0, level1, level2] => Ok(Self::new(
                level0.as_ref(),
                level1.as_ref(),
                level2.as_ref(),
            )),
            _ => Err(ShapeError::HeaderDepth {
                column,
                depth: levels.len(),
                expected: HEADER_DEPTH,
            }),
        }
    }

    /// Category this column belongs to (level0 + level1).
    pub fn category(&self) -> CategoryKey {
        CategoryKey::new(self.level0.trim(), self.level1.trim())
    }

    /// True if both labels describe the same category.
    pub fn same_category(&self, other: &ColumnLabel) -> bool {
        self.category() == other.category()
    }

    /// Measurement kind named by `level2`, if any.
    pub fn measurement_kind(&self) -> Option<MeasurementKind> {
        MeasurementKind::classify(&self.level2)
    }
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.level0, self.level1, self.level2)
    }
}

/// Identifies one measurement category within a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryKey {
    pub description: String,
    pub code: String,
}

impl CategoryKey {
    pub fn new(description: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            code: code.into(),
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description, self.code)
    }
}

/// Closed set of measurement kinds found in the third header level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    Time,
    Distance,
}

impl MeasurementKind {
    /// All kinds, in output field order.
    pub const ALL: [MeasurementKind; 2] = [MeasurementKind::Time, MeasurementKind::Distance];

    /// Classifies a level2 header string.
    ///
    /// Matching is exact after trimming and ignores ASCII case; free-text
    /// markers such as `"Total"` or an empty string are not measurements.
    pub fn classify(level2: &str) -> Option<Self> {
        let trimmed = level2.trim();
        Self::ALL
            .into_iter()
            .find(|kind| trimmed.eq_ignore_ascii_case(kind.label()))
    }

    /// Header label as published in source sheets.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Time => "Time",
            Self::Distance => "Distance",
        }
    }

    /// Output field carrying this kind's value.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Distance => "distance",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
