//! Typed records over the loosely-typed store
//!
//! The store holds flat JSON field maps; each entity type pins down the
//! wire field names, the spreadsheet column layout, and which columns a
//! bulk-import sheet must carry.

pub mod department;
pub mod payroll;

pub use department::Department;
pub use payroll::Payroll;

use serde_json::{Map, Value};

/// One store-backed entity type (a screen's record shape).
pub trait Entity: Sized + Send + Sync + 'static {
    /// Store collection name.
    const COLLECTION: &'static str;
    /// Worksheet name used by bulk export.
    const SHEET_NAME: &'static str;
    /// Singular noun for prompts and messages.
    const NOUN: &'static str;
    /// Plural noun for prompts and messages.
    const NOUN_PLURAL: &'static str;
    /// Wire field name and human-readable header, in export column order.
    const COLUMNS: &'static [(&'static str, &'static str)];
    /// Wire fields exposed by the add/edit form, with labels.
    const FORM_FIELDS: &'static [(&'static str, &'static str)];
    /// Columns a bulk-import sheet must carry, by wire name.
    const REQUIRED_COLUMNS: &'static [&'static str];

    /// Build from a store field map. Missing or non-string values coerce to
    /// strings; nothing is rejected (the store schema is not enforced here).
    fn from_fields(fields: &Map<String, Value>) -> Self;

    /// Flatten back to a store field map.
    fn to_fields(&self) -> Map<String, Value>;

    /// Short label naming the record in delete confirmations.
    fn label(&self) -> &str;

    /// Stamp the creation date on a record about to be created. Entities
    /// without a creation field ignore this.
    fn stamp_created(&mut self, _date: &str) {}
}

/// Fetch a field as a display string, coercing scalars and defaulting to
/// empty for anything else.
pub(crate) fn field_str(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_str_coerces_scalars() {
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!("Engineering"));
        fields.insert("headcount".to_string(), json!(42));
        fields.insert("active".to_string(), json!(true));
        fields.insert("tags".to_string(), json!(["a"]));

        assert_eq!(field_str(&fields, "name"), "Engineering");
        assert_eq!(field_str(&fields, "headcount"), "42");
        assert_eq!(field_str(&fields, "active"), "true");
        assert_eq!(field_str(&fields, "tags"), "");
        assert_eq!(field_str(&fields, "missing"), "");
    }
}
