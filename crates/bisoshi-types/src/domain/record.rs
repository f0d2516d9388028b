use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Opaque row identifier, unique within one collection.
///
/// Backends hand out strings or numbers; both are normalised to text, with
/// integral numbers printed without a fraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            UInt(u64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => RecordId(s),
            RawId::Int(n) => RecordId(n.to_string()),
            RawId::UInt(n) => RecordId(n.to_string()),
            RawId::Float(n) => RecordId(format_number(n)),
        })
    }
}

/// Primitive value stored in a generic [`Record`].
///
/// Booleans keep their JSON shape but compare and display as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl FieldValue {
    pub fn as_field(&self) -> Option<FieldRef<'_>> {
        match self {
            FieldValue::Number(n) => Some(FieldRef::Number(*n)),
            FieldValue::Bool(b) => Some(FieldRef::Text(if *b { "true" } else { "false" })),
            FieldValue::Text(s) => Some(FieldRef::Text(s)),
            FieldValue::Null => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

/// Borrowed view of one cell, used for comparisons without cloning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRef<'a> {
    Number(f64),
    Text(&'a str),
}

impl FieldRef<'_> {
    /// Ascending order of two cells.
    ///
    /// Numbers compare numerically, text lexicographically. When a column
    /// mixes both, numbers sort before text.
    pub fn compare(&self, other: &FieldRef<'_>) -> Ordering {
        match (self, other) {
            (FieldRef::Number(a), FieldRef::Number(b)) => a.total_cmp(b),
            (FieldRef::Text(a), FieldRef::Text(b)) => a.cmp(b),
            (FieldRef::Number(_), FieldRef::Text(_)) => Ordering::Less,
            (FieldRef::Text(_), FieldRef::Number(_)) => Ordering::Greater,
        }
    }

    pub fn display(&self) -> String {
        match self {
            FieldRef::Number(n) => format_number(*n),
            FieldRef::Text(s) => s.to_string(),
        }
    }
}

/// Integral numbers print without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A row that can flow through the table pipeline.
pub trait Row {
    fn row_id(&self) -> RecordId;

    /// Cell for a column id; `None` when the row has no value there.
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;

    /// Text matched by the free-text filter.
    fn filter_text(&self) -> Cow<'_, str>;
}

/// Schema-less row: a flat mapping of field name to primitive value.
///
/// The `id` field identifies the row and `name` is the filter field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, FieldValue>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Row for Record {
    fn row_id(&self) -> RecordId {
        match self.0.get("id").and_then(FieldValue::as_field) {
            Some(value) => RecordId(value.display()),
            None => RecordId::default(),
        }
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        self.0.get(name).and_then(FieldValue::as_field)
    }

    fn filter_text(&self) -> Cow<'_, str> {
        match self.0.get("name").and_then(FieldValue::as_field) {
            Some(FieldRef::Text(s)) => Cow::Borrowed(s),
            Some(FieldRef::Number(n)) => Cow::Owned(format_number(n)),
            None => Cow::Borrowed(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_accepts_strings_and_integers() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"["abc", 42]"#).unwrap();
        assert_eq!(ids[0].as_str(), "abc");
        assert_eq!(ids[1].as_str(), "42");
    }

    #[test]
    fn test_record_id_accepts_large_and_fractional_numbers() {
        let ids: Vec<RecordId> =
            serde_json::from_str(r#"[18446744073709551615, 7.0, 2.5, -3]"#).unwrap();
        let ids: Vec<&str> = ids.iter().map(RecordId::as_str).collect();
        assert_eq!(ids, vec!["18446744073709551615", "7", "2.5", "-3"]);
    }

    #[test]
    fn test_record_with_boolean_fields_still_decodes() {
        let records: Vec<Record> = serde_json::from_str(
            r#"[{"id": 1, "name": "Urea", "active": true}, {"id": 2, "name": "NPK", "active": false}]"#,
        )
        .unwrap();
        assert_eq!(records[0].field("active"), Some(FieldRef::Text("true")));
        assert_eq!(records[1].field("active"), Some(FieldRef::Text("false")));
        assert_eq!(records[1].row_id(), RecordId::from("2"));

        let round = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(round["active"], serde_json::json!(true));
    }

    #[test]
    fn test_record_numeric_id_has_no_fraction() {
        let record = Record::new().with("id", 1_i64).with("name", "A");
        assert_eq!(record.row_id(), RecordId::from("1"));
        assert_eq!(record.filter_text(), "A");
    }

    #[test]
    fn test_record_deserializes_nulls_as_missing() {
        let record: Record = serde_json::from_str(r#"{"id": "x", "qty": null}"#).unwrap();
        assert!(record.field("qty").is_none());
        assert_eq!(record.field("id"), Some(FieldRef::Text("x")));
    }

    #[test]
    fn test_field_compare_numbers_before_text() {
        assert_eq!(
            FieldRef::Number(2.0).compare(&FieldRef::Number(10.0)),
            Ordering::Less
        );
        assert_eq!(
            FieldRef::Text("b").compare(&FieldRef::Text("a")),
            Ordering::Greater
        );
        assert_eq!(
            FieldRef::Number(99.0).compare(&FieldRef::Text("a")),
            Ordering::Less
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(2.5), "2.5");
    }
}
