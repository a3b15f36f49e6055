//! Header classification: metadata columns vs. measurement columns.

use tds_model::{CategoryKey, ColumnLabel, MeasurementKind, RawTable};
use tracing::{debug, warn};

/// Geography keys published in the provider time & distance sheets.
pub const DEFAULT_METADATA_KEYS: [&str; 5] = [
    "COUNTY",
    "ST",
    "COUNTY_STATE",
    "SSACD",
    "COUNTY DESIGNA-TION",
];

/// One metadata key and the column that supplies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataColumn {
    pub key: String,
    pub label: ColumnLabel,
}

/// Canonical metadata key → concrete column label, in table column order.
///
/// Keys absent from the table are simply not present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMetadataMap {
    entries: Vec<MetadataColumn>,
}

impl EntityMetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `key` to `label`. An existing mapping for `key` is kept.
    ///
    /// Returns false if `key` was already mapped.
    pub fn insert(&mut self, key: impl Into<String>, label: ColumnLabel) -> bool {
        let key = key.into();
        if self.get(&key).is_some() {
            return false;
        }
        self.entries.push(MetadataColumn { key, label });
        true
    }

    pub fn get(&self, key: &str) -> Option<&ColumnLabel> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.label)
    }

    /// True if `label` is a mapped column or repeats a mapped key in its level0.
    pub fn claims(&self, label: &ColumnLabel) -> bool {
        let level0 = label.level0.trim();
        self.entries
            .iter()
            .any(|entry| &entry.label == label || entry.key.trim() == level0)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetadataColumn> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A column whose third header level names a measurement kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementColumn {
    pub position: usize,
    pub label: ColumnLabel,
    pub kind: MeasurementKind,
}

impl MeasurementColumn {
    pub fn category(&self) -> CategoryKey {
        self.label.category()
    }
}

/// Full classification of a table header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderLayout {
    pub metadata: EntityMetadataMap,
    pub measurements: Vec<MeasurementColumn>,
    /// Positions of columns that are neither metadata nor measurements.
    pub ignored: Vec<usize>,
}

impl HeaderLayout {
    /// Distinct categories in first-appearance column order.
    pub fn categories(&self) -> Vec<CategoryKey> {
        let mut categories: Vec<CategoryKey> = Vec::new();
        for column in &self.measurements {
            let category = column.category();
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }
}

/// Maps every recognized metadata key present in `table` to its column.
///
/// Keys missing from the table are omitted without error.
pub fn classify<S: AsRef<str>>(table: &RawTable, metadata_keys: &[S]) -> EntityMetadataMap {
    classify_header(table, metadata_keys).metadata
}

/// Classifies every column of `table`.
///
/// A column is metadata when its trimmed level0 equals one of `metadata_keys`;
/// if a key labels several columns the first one wins. Remaining columns are
/// measurements when level2 names a [`MeasurementKind`], otherwise ignored.
pub fn classify_header<S: AsRef<str>>(table: &RawTable, metadata_keys: &[S]) -> HeaderLayout {
    let mut layout = HeaderLayout::default();

    for (position, label) in table.labels().iter().enumerate() {
        let level0 = label.level0.trim();
        if let Some(key) = metadata_keys
            .iter()
            .map(|key| key.as_ref().trim())
            .find(|key| *key == level0)
        {
            if !layout.metadata.insert(key, label.clone()) {
                warn!(
                    key,
                    column = position,
                    label = %label,
                    "metadata key labels more than one column; keeping the first"
                );
                layout.ignored.push(position);
            }
            continue;
        }

        match label.measurement_kind() {
            Some(kind) => layout.measurements.push(MeasurementColumn {
                position,
                label: label.clone(),
                kind,
            }),
            None => layout.ignored.push(position),
        }
    }

    debug!(
        metadata = layout.metadata.len(),
        measurements = layout.measurements.len(),
        ignored = layout.ignored.len(),
        "classified header"
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use tds_model::CellValue;

    fn table(labels: Vec<ColumnLabel>) -> RawTable {
        let width = labels.len();
        RawTable::new(labels, vec![vec![CellValue::Empty; width]]).unwrap()
    }

    #[test]
    fn test_classify_maps_present_keys() {
        let table = table(vec![
            ColumnLabel::new("COUNTY", "", ""),
            ColumnLabel::new("ST", "", ""),
            ColumnLabel::new("Cardiology", "123", "Time"),
        ]);

        let map = classify(&table, &DEFAULT_METADATA_KEYS);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("COUNTY"), Some(&ColumnLabel::new("COUNTY", "", "")));
        assert_eq!(map.get("ST"), Some(&ColumnLabel::new("ST", "", "")));
        assert_eq!(map.get("SSACD"), None);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["COUNTY", "ST"]);
    }

    #[test]
    fn test_classify_matches_trimmed_level0() {
        let table = table(vec![ColumnLabel::new(" COUNTY DESIGNA-TION ", "", "")]);

        let map = classify(&table, &DEFAULT_METADATA_KEYS);

        assert_eq!(
            map.get("COUNTY DESIGNA-TION"),
            Some(&ColumnLabel::new(" COUNTY DESIGNA-TION ", "", ""))
        );
    }

    #[test]
    fn test_duplicate_key_keeps_first_column() {
        let table = table(vec![
            ColumnLabel::new("COUNTY", "a", ""),
            ColumnLabel::new("COUNTY", "b", ""),
        ]);

        let layout = classify_header(&table, &["COUNTY"]);

        assert_eq!(layout.metadata.get("COUNTY"), Some(&ColumnLabel::new("COUNTY", "a", "")));
        assert_eq!(layout.ignored, vec![1]);
    }

    #[test]
    fn test_classify_header_splits_columns() {
        let table = table(vec![
            ColumnLabel::new("COUNTY", "", ""),
            ColumnLabel::new("Cardiology", "123", "Time"),
            ColumnLabel::new("Cardiology", "123", "Distance"),
            ColumnLabel::new("Notes", "", "Free text"),
            ColumnLabel::new("Oncology", "200", "Time"),
        ]);

        let layout = classify_header(&table, &DEFAULT_METADATA_KEYS);

        assert_eq!(layout.metadata.len(), 1);
        assert_eq!(
            layout
                .measurements
                .iter()
                .map(|column| (column.position, column.kind))
                .collect::<Vec<_>>(),
            vec![
                (1, MeasurementKind::Time),
                (2, MeasurementKind::Distance),
                (4, MeasurementKind::Time),
            ]
        );
        assert_eq!(layout.ignored, vec![3]);
        assert_eq!(
            layout.categories(),
            vec![
                CategoryKey::new("Cardiology", "123"),
                CategoryKey::new("Oncology", "200"),
            ]
        );
    }

    #[test]
    fn test_insert_keeps_existing_mapping() {
        let mut map = EntityMetadataMap::new();
        assert!(map.insert("ST", ColumnLabel::new("ST", "", "")));
        assert!(!map.insert("ST", ColumnLabel::new("ST", "x", "")));
        assert_eq!(map.get("ST"), Some(&ColumnLabel::new("ST", "", "")));
        assert!(map.claims(&ColumnLabel::new("ST", "", "")));
        assert!(map.claims(&ColumnLabel::new(" ST ", "y", "Time")));
        assert!(!map.claims(&ColumnLabel::new("Cardiology", "123", "Time")));
    }
}
