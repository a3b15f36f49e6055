//! Flat output records.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Result, ShapeError};
use crate::value::RecordValue;

/// Output field holding the category description (level0 of measurement columns).
pub const SPECIALTY_DESCRIPTION_FIELD: &str = "specialty_description";

/// Output field holding the category code (level1 of measurement columns).
pub const SPECIALTY_CODE_FIELD: &str = "specialty_code";

/// Normalizes a header key into an output field name.
///
/// Lowercases, replaces spaces with underscores, and removes hyphens.
///
/// # Examples
///
/// ```
/// use tds_model::normalize_field_name;
///
/// assert_eq!(normalize_field_name("COUNTY DESIGNA-TION"), "county_designation");
/// assert_eq!(normalize_field_name("COUNTY_STATE"), "county_state");
/// ```
pub fn normalize_field_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .replace('-', "")
}

/// One database-loadable row: ordered field name → value.
///
/// Field names are unique; insertion order is the output column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRecord {
    fields: Vec<(String, RecordValue)>,
}

impl NormalizedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, rejecting a name that is already present.
    pub fn push(&mut self, name: impl Into<String>, value: RecordValue) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(ShapeError::DuplicateField { field: name });
        }
        self.fields.push((name, value));
        Ok(())
    }

    /// Ensures `name` exists, appending the `Missing` sentinel when it does not.
    ///
    /// Returns true if the field was added.
    pub fn fill_missing(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.fields.push((name.to_string(), RecordValue::Missing));
        true
    }

    pub fn get(&self, name: &str) -> Option<&RecordValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(field, _)| field.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordValue)> {
        self.fields.iter().map(|(field, value)| (field.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for NormalizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_field_name() {
        assert_eq!(normalize_field_name("COUNTY DESIGNA-TION"), "county_designation");
        assert_eq!(normalize_field_name("Specialty Description"), "specialty_description");
        assert_eq!(normalize_field_name("ST"), "st");
        assert_eq!(normalize_field_name(" SSACD "), "ssacd");
    }

    #[test]
    fn test_push_rejects_duplicates() {
        let mut record = NormalizedRecord::new();
        record.push("county", RecordValue::from("Wake")).unwrap();
        let err = record.push("county", RecordValue::from("Durham")).unwrap_err();

        assert_eq!(
            err,
            ShapeError::DuplicateField {
                field: "county".to_string()
            }
        );
        assert_eq!(record.get("county"), Some(&RecordValue::from("Wake")));
    }

    #[test]
    fn test_fill_missing_only_adds_absent_fields() {
        let mut record = NormalizedRecord::new();
        record.push("time", RecordValue::Number(3.0)).unwrap();

        assert!(!record.fill_missing("time"));
        assert!(record.fill_missing("distance"));
        assert_eq!(record.get("time"), Some(&RecordValue::Number(3.0)));
        assert_eq!(record.get("distance"), Some(&RecordValue::Missing));
        assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["time", "distance"]);
    }

    #[test]
    fn test_serialize_preserves_order() {
        let mut record = NormalizedRecord::new();
        record.push("st", RecordValue::from("NC")).unwrap();
        record.push("county", RecordValue::Null).unwrap();
        record.push("time", RecordValue::Missing).unwrap();

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"st":"NC","county":null,"time":"Missing"}"#);
    }
}
