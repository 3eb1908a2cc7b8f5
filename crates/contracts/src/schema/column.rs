use std::fmt;

use serde::{Deserialize, Serialize};

use super::relation::RelationKind;

/// Closed set of column types offered by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[serde(alias = "VARCHAR")]
    Varchar,
    #[serde(alias = "INT")]
    Int,
    #[serde(alias = "BOOLEAN", alias = "BOOL", alias = "bool")]
    Boolean,
    #[serde(alias = "DATE")]
    Date,
}

impl ColumnType {
    pub const ALL: [ColumnType; 4] = [
        ColumnType::Varchar,
        ColumnType::Int,
        ColumnType::Boolean,
        ColumnType::Date,
    ];

    /// Wire tag, lowercase.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Varchar => "varchar",
            ColumnType::Int => "int",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
        }
    }

    /// Short label shown in the type selector.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Varchar => "VARCHAR",
            ColumnType::Int => "INT",
            ColumnType::Boolean => "BOOL",
            ColumnType::Date => "DATE",
        }
    }

    pub fn parse(tag: &str) -> Option<ColumnType> {
        match tag.to_ascii_lowercase().as_str() {
            "varchar" => Some(ColumnType::Varchar),
            "int" => Some(ColumnType::Int),
            "boolean" | "bool" => Some(ColumnType::Boolean),
            "date" => Some(ColumnType::Date),
            _ => None,
        }
    }

    /// Whether `value` is an acceptable default for this type.
    pub fn accepts_default(&self, value: &str) -> bool {
        match self {
            ColumnType::Varchar => true,
            ColumnType::Int => value.parse::<i64>().is_ok(),
            ColumnType::Boolean => {
                matches!(value, "true" | "false" | "0" | "1")
            }
            ColumnType::Date => chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Denormalized mirror of the relation a column participates in as the
/// source endpoint. Kept in sync by the graph's relation operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReference {
    pub table_id: String,
    pub column_id: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub is_primary_key: bool,
    pub is_not_null: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ColumnReference>,
}

/// Partial update merged into a column; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub column_type: Option<ColumnType>,
    pub is_primary_key: Option<bool>,
    pub is_not_null: Option<bool>,
    pub default_value: Option<String>,
    /// Drops the default value; wins over `default_value` when both are set.
    pub clear_default: bool,
}

impl ColumnPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn column_type(column_type: ColumnType) -> Self {
        Self {
            column_type: Some(column_type),
            ..Self::default()
        }
    }
}

impl Column {
    /// Merge `patch` into this column. Validation of the default value
    /// against the (possibly updated) type is the graph's job.
    pub(crate) fn apply(&mut self, patch: ColumnPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(column_type) = patch.column_type {
            self.column_type = column_type;
        }
        if let Some(is_primary_key) = patch.is_primary_key {
            self.is_primary_key = is_primary_key;
        }
        if let Some(is_not_null) = patch.is_not_null {
            self.is_not_null = is_not_null;
        }
        if let Some(default_value) = patch.default_value {
            self.default_value = Some(default_value);
        }
        if patch.clear_default {
            self.default_value = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tags_accept_legacy_uppercase_spelling() {
        let t: ColumnType = serde_json::from_str("\"INT\"").unwrap();
        assert_eq!(t, ColumnType::Int);
        let t: ColumnType = serde_json::from_str("\"varchar\"").unwrap();
        assert_eq!(t, ColumnType::Varchar);
        assert_eq!(serde_json::to_string(&ColumnType::Int).unwrap(), "\"int\"");
    }

    #[test]
    fn default_value_validation_per_type() {
        assert!(ColumnType::Int.accepts_default("42"));
        assert!(!ColumnType::Int.accepts_default("forty-two"));
        assert!(ColumnType::Boolean.accepts_default("true"));
        assert!(!ColumnType::Boolean.accepts_default("yes"));
        assert!(ColumnType::Date.accepts_default("2024-01-31"));
        assert!(!ColumnType::Date.accepts_default("31/01/2024"));
        assert!(ColumnType::Varchar.accepts_default("anything at all"));
    }

    #[test]
    fn column_serializes_with_camel_case_wire_names() {
        let column = Column {
            id: "column-1".into(),
            name: "id".into(),
            column_type: ColumnType::Int,
            is_primary_key: true,
            is_not_null: true,
            default_value: None,
            references: None,
        };
        let value = serde_json::to_value(&column).unwrap();
        assert_eq!(value["isPrimaryKey"], true);
        assert_eq!(value["isNotNull"], true);
        assert_eq!(value["type"], "int");
        assert!(value.get("defaultValue").is_none());
        assert!(value.get("references").is_none());
    }
}
