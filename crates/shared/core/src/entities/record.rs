use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::TrackedField;

/// Raw history arrays for one product, keyed by feed field index.
///
/// Untracked indices and null arrays are ignored on deserialization;
/// missing fields read back as empty arrays, never as errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawHistoryMap {
    fields: HashMap<TrackedField, Vec<i64>>,
}

impl RawHistoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw flat array for a field; missing fields are empty
    pub fn get(&self, field: TrackedField) -> &[i64] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the raw array for a field
    pub fn insert(&mut self, field: TrackedField, raw: Vec<i64>) {
        self.fields.insert(field, raw);
    }

    /// True when no field carries any raw entries
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|raw| raw.is_empty())
    }
}

impl From<HashMap<TrackedField, Vec<i64>>> for RawHistoryMap {
    fn from(fields: HashMap<TrackedField, Vec<i64>>) -> Self {
        Self { fields }
    }
}

impl<'de> Deserialize<'de> for RawHistoryMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HistoryVisitor;

        impl<'de> Visitor<'de> for HistoryVisitor {
            type Value = RawHistoryMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of field index to flat [offset, value] array")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut fields = HashMap::new();
                while let Some(key) = access.next_key::<String>()? {
                    match key.parse::<u8>().ok().and_then(TrackedField::from_index) {
                        Some(field) => {
                            // Feeds encode "no history" as null rather than []
                            if let Some(raw) = access.next_value::<Option<Vec<i64>>>()? {
                                fields.insert(field, raw);
                            }
                        }
                        None => {
                            let _ = access.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(RawHistoryMap { fields })
            }
        }

        deserializer.deserialize_map(HistoryVisitor)
    }
}

/// Per-product input record supplied by the data-acquisition layer.
///
/// Everything is optional at the wire level; the analyzer decides what is
/// structurally required (identifier and history container) and what simply
/// degrades to absent signals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProductRecord {
    /// Marketplace identifier (ASIN)
    #[serde(default)]
    pub asin: Option<String>,
    /// Product title, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Brand, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Raw history arrays keyed by field index
    #[serde(default)]
    pub history: Option<RawHistoryMap>,
}

impl RawProductRecord {
    /// Create a record with an identifier and an empty history container
    pub fn new(asin: impl Into<String>) -> Self {
        Self {
            asin: Some(asin.into()),
            title: None,
            brand: None,
            history: Some(RawHistoryMap::new()),
        }
    }

    /// Builder: set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder: set brand
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Builder: set the raw array for one field
    pub fn with_field(mut self, field: TrackedField, raw: Vec<i64>) -> Self {
        self.history
            .get_or_insert_with(RawHistoryMap::new)
            .insert(field, raw);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_reads_as_empty() {
        let history = RawHistoryMap::new();
        assert_eq!(history.get(TrackedField::SalesRank), &[] as &[i64]);
        assert!(history.is_empty());
    }

    #[test]
    fn test_deserialize_ignores_untracked_indices() {
        let json = r#"{
            "3": [0, 1000, 1440, 950],
            "5": [0, 42],
            "meta": {"ignored": true},
            "18": null
        }"#;
        let history: RawHistoryMap = serde_json::from_str(json).unwrap();

        assert_eq!(history.get(TrackedField::SalesRank), &[0, 1000, 1440, 950]);
        // Index 5 is untracked, 18 was null
        assert_eq!(history.get(TrackedField::BuyBoxPrice), &[] as &[i64]);
    }

    #[test]
    fn test_history_serializes_with_index_keys() {
        let mut history = RawHistoryMap::new();
        history.insert(TrackedField::NewOfferCount, vec![0, 3]);

        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"{"11":[0,3]}"#);
    }

    #[test]
    fn test_record_wire_shape() {
        let json = r#"{"asin": "B00EXAMPLE", "title": "Widget", "history": {"3": [0, 100]}}"#;
        let record: RawProductRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.asin.as_deref(), Some("B00EXAMPLE"));
        assert_eq!(record.title.as_deref(), Some("Widget"));
        let history = record.history.unwrap();
        assert_eq!(history.get(TrackedField::SalesRank), &[0, 100]);
    }

    #[test]
    fn test_record_tolerates_bare_object() {
        // Structurally invalid for analysis, but parsing never fails
        let record: RawProductRecord = serde_json::from_str("{}").unwrap();
        assert!(record.asin.is_none());
        assert!(record.history.is_none());
    }

    #[test]
    fn test_builder() {
        let record = RawProductRecord::new("B00TEST")
            .with_title("Test")
            .with_field(TrackedField::SalesRank, vec![0, 1000]);

        let history = record.history.as_ref().unwrap();
        assert_eq!(history.get(TrackedField::SalesRank), &[0, 1000]);
    }
}
