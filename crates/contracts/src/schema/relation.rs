use std::fmt;

use serde::{Deserialize, Serialize};

/// Cardinality tag carried by a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    OneToOne,
    /// Default kind committed by the drag-to-connect gesture.
    #[default]
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::OneToOne => "one-to-one",
            RelationKind::OneToMany => "one-to-many",
            RelationKind::ManyToOne => "many-to-one",
            RelationKind::ManyToMany => "many-to-many",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite address of a column within a table, `"<tableId>-<columnId>"`.
///
/// Ids themselves may contain the separator, so the key is never split
/// blindly; membership checks go through [`EndpointKey::references_table`]
/// and [`EndpointKey::is`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointKey(String);

impl EndpointKey {
    pub fn new(table_id: &str, column_id: &str) -> Self {
        Self(format!("{}-{}", table_id, column_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when this key addresses a column inside `table_id`.
    pub fn references_table(&self, table_id: &str) -> bool {
        self.0.len() > table_id.len()
            && self.0.starts_with(table_id)
            && self.0.as_bytes()[table_id.len()] == b'-'
    }

    /// True when this key addresses exactly (`table_id`, `column_id`).
    pub fn is(&self, table_id: &str, column_id: &str) -> bool {
        self.0.len() == table_id.len() + column_id.len() + 1
            && self.references_table(table_id)
            && self.0.ends_with(column_id)
    }
}

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directed edge between two column endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub source_id: EndpointKey,
    pub target_id: EndpointKey,
    #[serde(rename = "type")]
    pub kind: RelationKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_wire_tags() {
        let json = serde_json::to_string(&RelationKind::OneToMany).unwrap();
        assert_eq!(json, "\"one-to-many\"");
        let back: RelationKind = serde_json::from_str("\"many-to-one\"").unwrap();
        assert_eq!(back, RelationKind::ManyToOne);
    }

    #[test]
    fn endpoint_key_membership_checks() {
        let key = EndpointKey::new("table-aa", "column-bb");
        assert_eq!(key.as_str(), "table-aa-column-bb");
        assert!(key.references_table("table-aa"));
        assert!(!key.references_table("table-a"));
        assert!(!key.references_table("table-aa-column-bb"));
        assert!(key.is("table-aa", "column-bb"));
        assert!(!key.is("table-aa", "column-b"));
    }

    #[test]
    fn relation_serializes_with_camel_case_field_names() {
        let relation = Relation {
            source_id: EndpointKey::new("t1", "c1"),
            target_id: EndpointKey::new("t2", "c2"),
            kind: RelationKind::OneToMany,
        };
        let value = serde_json::to_value(&relation).unwrap();
        assert_eq!(value["sourceId"], "t1-c1");
        assert_eq!(value["targetId"], "t2-c2");
        assert_eq!(value["type"], "one-to-many");
    }
}
