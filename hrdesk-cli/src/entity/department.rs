//! Department records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Entity, field_str};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    #[serde(rename = "managerId")]
    pub manager_id: String,
    /// Run date of the creating operation, as stored (`%Y-%m-%d`).
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

impl Entity for Department {
    const COLLECTION: &'static str = "Departments";
    const SHEET_NAME: &'static str = "Departments";
    const NOUN: &'static str = "department";
    const NOUN_PLURAL: &'static str = "departments";
    const COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("name", "Name"),
        ("managerId", "Manager ID"),
        ("createdAt", "Created At"),
    ];
    const FORM_FIELDS: &'static [(&'static str, &'static str)] =
        &[("name", "Department Name"), ("managerId", "Manager ID")];
    const REQUIRED_COLUMNS: &'static [&'static str] = &["name", "managerId"];

    fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            name: field_str(fields, "name"),
            manager_id: field_str(fields, "managerId"),
            created_at: field_str(fields, "createdAt"),
        }
    }

    fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(self.name.clone()));
        fields.insert("managerId".to_string(), Value::String(self.manager_id.clone()));
        fields.insert("createdAt".to_string(), Value::String(self.created_at.clone()));
        fields
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn stamp_created(&mut self, date: &str) {
        self.created_at = date.to_string();
    }
}
