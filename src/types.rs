//! Core types for record-selection coordination.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque identifier for a record.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId(s)
    }
}

/// Payload broadcast when a user picks a related record.
///
/// Constructed once per publish, never mutated afterwards. Both fields
/// travel together: a record id is only meaningful alongside its object
/// type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEvent {
    pub record_id: RecordId,
    pub object_api_name: String,
}

impl SelectionEvent {
    pub fn new(record_id: impl Into<RecordId>, object_api_name: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            object_api_name: object_api_name.into(),
        }
    }
}

/// One field of a formatted row, ready for the view to iterate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowField {
    pub name: String,
    /// Three-way fallback already applied: formatted display value, else
    /// raw value, else absent.
    pub display_value: Option<String>,
}

/// View state for one row of a related list.
///
/// Rebuilt wholesale whenever records arrive; never patched in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowViewState {
    pub id: RecordId,
    pub fields: Vec<RowField>,
}

/// A column the related list displays, as described by metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayColumn {
    pub field_api_name: String,
    pub label: String,
}

/// Metadata for a single related list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelatedListInfo {
    /// Object type of the records the list contains.
    pub target_object_api_name: String,
    pub display_columns: Vec<DisplayColumn>,
}

/// One field value as returned by the records service.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FieldValue {
    pub value: Option<serde_json::Value>,
    pub display_value: Option<String>,
}

impl FieldValue {
    /// Formatted display value if present, else the raw value rendered as
    /// text, else absent. A field with neither is not an error.
    pub fn display(&self) -> Option<String> {
        if let Some(display) = &self.display_value {
            return Some(display.clone());
        }
        match &self.value {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }
    }
}

/// One record as returned by the records service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelatedRecord {
    pub id: RecordId,
    pub fields: HashMap<String, FieldValue>,
}

/// Records page for a related list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelatedListRecords {
    pub records: Vec<RelatedRecord>,
}

/// Object metadata, reduced to what the panels consume.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Themed icon URL, e.g. `/assets/icons/standard/account_60.png`.
    pub theme_icon_url: Option<String>,
}

/// Summary of an available related list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedListDescriptor {
    pub id: String,
    pub label: String,
}
