//! Dataset record model with lenient decoding of the loosely-typed import file.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Category assigned to missing, empty, or `"N/A"` values.
pub const UNKNOWN: &str = "Unknown";

/// Sentinel the source data uses for "not applicable".
pub const NOT_AVAILABLE: &str = "N/A";

/// Data fields of a record, as they appear in the import file.
///
/// Every field is optional: the source file omits keys freely, writes empty
/// strings for missing numbers, and stores `end_year` as either a number or
/// a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecordFields {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub source: Option<String>,
    #[serde(default, alias = "pestle", deserialize_with = "lenient_text")]
    pub pest: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub swot: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_year: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub intensity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub likelihood: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub relevance: Option<f64>,

    // Carried through untouched; never filtered or grouped on.
    #[serde(default, deserialize_with = "lenient_text")]
    pub insight: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_year: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub impact: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub added: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub published: Option<String>,
}

/// A stored record as returned by `GET /api/data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Record {
    pub id: Uuid,
    /// Zero-based index of the record in the file it was imported from.
    pub position: i32,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: RecordFields,
    pub imported_at: DateTime<Utc>,
}

impl Record {
    /// Assign identity to freshly imported fields.
    pub fn new(position: i32, fields: RecordFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            fields,
            imported_at: Utc::now(),
        }
    }
}

/// Normalize a categorical value for filtering, grouping, and option lists.
///
/// Missing, empty, and `"N/A"` values all collapse to [`UNKNOWN`].
pub fn category_label(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() && v != NOT_AVAILABLE => v,
        _ => UNKNOWN,
    }
}

/// Accept a string, number, or null. Empty strings decode to `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected text, found {other}"
        ))),
    }
}

/// Accept a number or a numeric string. Empty or non-numeric strings decode to `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => Ok(s.trim().parse::<f64>().ok()),
        Some(other) => Err(de::Error::custom(format!(
            "expected number, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_label_normalizes_missing_values() {
        assert_eq!(category_label(Some("Asia")), "Asia");
        assert_eq!(category_label(Some("N/A")), UNKNOWN);
        assert_eq!(category_label(Some("")), UNKNOWN);
        assert_eq!(category_label(None), UNKNOWN);
    }

    #[test]
    fn decodes_pestle_alias() {
        let fields: RecordFields =
            serde_json::from_value(json!({ "pestle": "Economic" })).unwrap();
        assert_eq!(fields.pest.as_deref(), Some("Economic"));
    }

    #[test]
    fn decodes_loose_numbers() {
        let fields: RecordFields = serde_json::from_value(json!({
            "intensity": "",
            "likelihood": "3",
            "relevance": 2,
        }))
        .unwrap();
        assert_eq!(fields.intensity, None);
        assert_eq!(fields.likelihood, Some(3.0));
        assert_eq!(fields.relevance, Some(2.0));
    }

    #[test]
    fn decodes_numeric_end_year_as_text() {
        let fields: RecordFields =
            serde_json::from_value(json!({ "end_year": 2027, "start_year": "" })).unwrap();
        assert_eq!(fields.end_year.as_deref(), Some("2027"));
        assert_eq!(fields.start_year, None);
    }

    #[test]
    fn rejects_structured_text_fields() {
        let result = serde_json::from_value::<RecordFields>(json!({ "topic": ["oil"] }));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_boolean_text_fields() {
        let result = serde_json::from_value::<RecordFields>(json!({ "swot": true }));
        assert!(result.is_err());
    }

    #[test]
    fn record_serializes_flat() {
        let record = Record::new(
            0,
            RecordFields {
                region: Some("Asia".to_string()),
                intensity: Some(5.0),
                ..Default::default()
            },
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["region"], "Asia");
        assert_eq!(value["intensity"], 5.0);
        assert_eq!(value["position"], 0);
        assert!(value.get("fields").is_none());

        let back: Record = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
