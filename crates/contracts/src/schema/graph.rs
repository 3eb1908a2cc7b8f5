use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::column::{Column, ColumnPatch, ColumnReference, ColumnType};
use super::ident::new_id;
use super::relation::{EndpointKey, Relation, RelationKind};
use super::table::{Position, Table};

/// Rejected mutation. Operations never corrupt the graph silently; callers
/// surface these to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("unknown table {0}")]
    UnknownTable(String),
    #[error("unknown column {column} in table {table}")]
    UnknownColumn { table: String, column: String },
    #[error("the seed column of a table cannot be deleted")]
    SeedColumnImmutable,
    #[error("a relation cannot point a column at itself")]
    SelfReference,
    #[error("a relation between these endpoints already exists")]
    DuplicateRelation,
    #[error("default value {value:?} is not valid for a {column_type} column")]
    InvalidDefault {
        value: String,
        column_type: ColumnType,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Wire snapshot of the designer state. `relations` is optional on input so
/// the legacy `{name, tables}` shape still hydrates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub name: String,
    pub tables: Vec<Table>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Relation>,
}

/// The aggregate the builder edits: tables plus the relations between their
/// columns. All mutations go through this type so its invariants hold:
/// ids are unique, every table keeps its seed column, and no relation ever
/// dangles (deletions cascade).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaGraph {
    name: String,
    tables: Vec<Table>,
    relations: Vec<Relation>,
}

impl SchemaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn table(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    /// Create a table with a generated name, a scattered canvas position and
    /// the seed `id` column (INT, primary key, not null).
    pub fn add_table(&mut self) -> Table {
        let id = new_id("table");
        let position = scatter_position(&id);
        let seed = Column {
            id: new_id("column"),
            name: "id".to_string(),
            column_type: ColumnType::Int,
            is_primary_key: true,
            is_not_null: true,
            default_value: None,
            references: None,
        };
        let table = Table {
            id,
            name: format!("Table {}", self.tables.len() + 1),
            columns: vec![seed],
            position,
        };
        self.tables.push(table.clone());
        table
    }

    /// Remove a table and cascade: every relation touching one of its
    /// columns goes with it, and surviving columns that mirrored a reference
    /// into this table are cleared.
    pub fn delete_table(&mut self, table_id: &str) -> Result<(), SchemaError> {
        let index = self
            .tables
            .iter()
            .position(|t| t.id == table_id)
            .ok_or_else(|| SchemaError::UnknownTable(table_id.to_string()))?;
        self.tables.remove(index);
        self.relations.retain(|r| {
            !r.source_id.references_table(table_id) && !r.target_id.references_table(table_id)
        });
        for table in &mut self.tables {
            for column in &mut table.columns {
                if column
                    .references
                    .as_ref()
                    .map_or(false, |r| r.table_id == table_id)
                {
                    column.references = None;
                }
            }
        }
        Ok(())
    }

    pub fn rename_table(&mut self, table_id: &str, name: impl Into<String>) -> Result<(), SchemaError> {
        self.table_mut(table_id)?.name = name.into();
        Ok(())
    }

    pub fn update_table_position(
        &mut self,
        table_id: &str,
        position: Position,
    ) -> Result<(), SchemaError> {
        self.table_mut(table_id)?.position = position;
        Ok(())
    }

    /// Append a `varchar` column with a generated name.
    pub fn add_column(&mut self, table_id: &str) -> Result<Column, SchemaError> {
        let table = self.table_mut(table_id)?;
        let column = Column {
            id: new_id("column"),
            name: format!("Column {}", table.columns.len() + 1),
            column_type: ColumnType::Varchar,
            is_primary_key: false,
            is_not_null: false,
            default_value: None,
            references: None,
        };
        table.columns.push(column.clone());
        Ok(column)
    }

    /// Remove a column. The seed column is permanent; deleting any other
    /// column cascades into the relation set and reference mirrors.
    pub fn delete_column(&mut self, table_id: &str, column_id: &str) -> Result<(), SchemaError> {
        let table = self.table_mut(table_id)?;
        let index = table
            .columns
            .iter()
            .position(|c| c.id == column_id)
            .ok_or_else(|| SchemaError::UnknownColumn {
                table: table_id.to_string(),
                column: column_id.to_string(),
            })?;
        if index == 0 {
            return Err(SchemaError::SeedColumnImmutable);
        }
        table.columns.remove(index);
        self.relations.retain(|r| {
            !r.source_id.is(table_id, column_id) && !r.target_id.is(table_id, column_id)
        });
        for table in &mut self.tables {
            for column in &mut table.columns {
                if column
                    .references
                    .as_ref()
                    .map_or(false, |r| r.table_id == table_id && r.column_id == column_id)
                {
                    column.references = None;
                }
            }
        }
        Ok(())
    }

    /// Merge `patch` into a column. The resulting default value must be
    /// acceptable for the resulting type.
    pub fn update_column(
        &mut self,
        table_id: &str,
        column_id: &str,
        patch: ColumnPatch,
    ) -> Result<Column, SchemaError> {
        let table = self.table_mut(table_id)?;
        let column = table
            .column_mut(column_id)
            .ok_or_else(|| SchemaError::UnknownColumn {
                table: table_id.to_string(),
                column: column_id.to_string(),
            })?;
        let mut updated = column.clone();
        updated.apply(patch);
        if let Some(value) = &updated.default_value {
            if !updated.column_type.accepts_default(value) {
                return Err(SchemaError::InvalidDefault {
                    value: value.clone(),
                    column_type: updated.column_type,
                });
            }
        }
        *column = updated.clone();
        Ok(updated)
    }

    /// Commit a relation between two existing column endpoints and mirror it
    /// on the source column's `references` field.
    pub fn add_relation(
        &mut self,
        source: (&str, &str),
        target: (&str, &str),
        kind: RelationKind,
    ) -> Result<Relation, SchemaError> {
        let (source_table, source_column) = source;
        let (target_table, target_column) = target;
        self.require_column(source_table, source_column)?;
        self.require_column(target_table, target_column)?;
        if source_table == target_table && source_column == target_column {
            return Err(SchemaError::SelfReference);
        }
        let source_id = EndpointKey::new(source_table, source_column);
        let target_id = EndpointKey::new(target_table, target_column);
        if self
            .relations
            .iter()
            .any(|r| r.source_id == source_id && r.target_id == target_id)
        {
            return Err(SchemaError::DuplicateRelation);
        }
        let relation = Relation {
            source_id,
            target_id,
            kind,
        };
        self.relations.push(relation.clone());
        if let Some(column) = self.table_mut(source_table)?.column_mut(source_column) {
            column.references = Some(ColumnReference {
                table_id: target_table.to_string(),
                column_id: target_column.to_string(),
                kind,
            });
        }
        Ok(relation)
    }

    /// Resolve an endpoint key against the current tables.
    pub fn resolve_endpoint(&self, key: &EndpointKey) -> Option<(&Table, &Column)> {
        self.tables.iter().find_map(|table| {
            table
                .columns
                .iter()
                .find(|column| key.is(&table.id, &column.id))
                .map(|column| (table, column))
        })
    }

    pub fn to_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            name: self.name.clone(),
            tables: self.tables.clone(),
            relations: self.relations.clone(),
        }
    }

    /// Hydrate a graph from a wire snapshot, re-checking the invariants the
    /// builder relies on.
    pub fn from_config(config: DatabaseConfig) -> Result<Self, SchemaError> {
        let mut table_ids = HashSet::new();
        for table in &config.tables {
            if !table_ids.insert(table.id.as_str()) {
                return Err(SchemaError::InvalidConfig(format!(
                    "duplicate table id {}",
                    table.id
                )));
            }
            if table.columns.is_empty() {
                return Err(SchemaError::InvalidConfig(format!(
                    "table {:?} has no columns",
                    table.name
                )));
            }
            let mut column_ids = HashSet::new();
            for column in &table.columns {
                if !column_ids.insert(column.id.as_str()) {
                    return Err(SchemaError::InvalidConfig(format!(
                        "duplicate column id {} in table {:?}",
                        column.id, table.name
                    )));
                }
            }
        }
        for relation in &config.relations {
            for key in [&relation.source_id, &relation.target_id] {
                let resolves = config.tables.iter().any(|table| {
                    table.columns.iter().any(|column| key.is(&table.id, &column.id))
                });
                if !resolves {
                    return Err(SchemaError::InvalidConfig(format!(
                        "relation endpoint {} does not resolve",
                        key
                    )));
                }
            }
        }
        Ok(Self {
            name: config.name,
            tables: config.tables,
            relations: config.relations,
        })
    }

    fn table_mut(&mut self, table_id: &str) -> Result<&mut Table, SchemaError> {
        self.tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or_else(|| SchemaError::UnknownTable(table_id.to_string()))
    }

    fn require_column(&self, table_id: &str, column_id: &str) -> Result<(), SchemaError> {
        let table = self
            .table(table_id)
            .ok_or_else(|| SchemaError::UnknownTable(table_id.to_string()))?;
        table
            .column(column_id)
            .map(|_| ())
            .ok_or_else(|| SchemaError::UnknownColumn {
                table: table_id.to_string(),
                column: column_id.to_string(),
            })
    }
}

/// Deterministic scatter inside a 500x500 region, fed by the id's entropy.
/// Keeps new tables from stacking on one spot without a RNG dependency.
fn scatter_position(id: &str) -> Position {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in id.bytes() {
        h ^= u64::from(byte);
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
    }
    Position::new((h % 500) as f64, ((h >> 32) % 500) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with_two_tables() -> (SchemaGraph, Table, Table) {
        let mut graph = SchemaGraph::new();
        let t1 = graph.add_table();
        let t2 = graph.add_table();
        (graph, t1, t2)
    }

    #[test]
    fn new_table_has_one_seed_column() {
        let mut graph = SchemaGraph::new();
        let table = graph.add_table();
        assert_eq!(table.name, "Table 1");
        assert_eq!(table.columns.len(), 1);
        let seed = &table.columns[0];
        assert_eq!(seed.name, "id");
        assert_eq!(seed.column_type, ColumnType::Int);
        assert!(seed.is_primary_key);
        assert!(seed.is_not_null);

        let second = graph.add_table();
        assert_eq!(second.name, "Table 2");
    }

    #[test]
    fn identifiers_are_unique_across_tables_and_columns() {
        let mut graph = SchemaGraph::new();
        let mut ids = HashSet::new();
        for _ in 0..20 {
            let table = graph.add_table();
            assert!(ids.insert(table.id.clone()));
            for _ in 0..5 {
                let column = graph.add_column(&table.id).unwrap();
                assert!(ids.insert(column.id));
            }
            assert!(ids.insert(table.columns[0].id.clone()));
        }
    }

    #[test]
    fn added_columns_follow_the_naming_sequence() {
        let mut graph = SchemaGraph::new();
        let table = graph.add_table();
        let c2 = graph.add_column(&table.id).unwrap();
        let c3 = graph.add_column(&table.id).unwrap();
        assert_eq!(c2.name, "Column 2");
        assert_eq!(c3.name, "Column 3");
        assert_eq!(c2.column_type, ColumnType::Varchar);
        assert!(!c2.is_primary_key);
        assert!(!c2.is_not_null);
    }

    #[test]
    fn seed_column_cannot_be_deleted() {
        let mut graph = SchemaGraph::new();
        let table = graph.add_table();
        graph.add_column(&table.id).unwrap();
        graph.add_column(&table.id).unwrap();
        let seed_id = table.columns[0].id.clone();

        let result = graph.delete_column(&table.id, &seed_id);
        assert_eq!(result, Err(SchemaError::SeedColumnImmutable));
        assert_eq!(graph.table(&table.id).unwrap().columns.len(), 3);
    }

    #[test]
    fn non_seed_columns_can_be_deleted() {
        let mut graph = SchemaGraph::new();
        let table = graph.add_table();
        let column = graph.add_column(&table.id).unwrap();
        graph.delete_column(&table.id, &column.id).unwrap();
        assert_eq!(graph.table(&table.id).unwrap().columns.len(), 1);
    }

    #[test]
    fn operations_on_missing_ids_are_rejected() {
        let mut graph = SchemaGraph::new();
        let table = graph.add_table();

        assert!(matches!(
            graph.add_column("table-missing"),
            Err(SchemaError::UnknownTable(_))
        ));
        assert!(matches!(
            graph.delete_table("table-missing"),
            Err(SchemaError::UnknownTable(_))
        ));
        assert!(matches!(
            graph.delete_column(&table.id, "column-missing"),
            Err(SchemaError::UnknownColumn { .. })
        ));
        assert!(matches!(
            graph.rename_table("table-missing", "x"),
            Err(SchemaError::UnknownTable(_))
        ));
    }

    #[test]
    fn update_column_merges_only_given_fields() {
        let mut graph = SchemaGraph::new();
        let table = graph.add_table();
        let column = graph.add_column(&table.id).unwrap();

        let updated = graph
            .update_column(&table.id, &column.id, ColumnPatch::name("email"))
            .unwrap();
        assert_eq!(updated.name, "email");
        assert_eq!(updated.column_type, ColumnType::Varchar);

        let updated = graph
            .update_column(
                &table.id,
                &column.id,
                ColumnPatch {
                    is_not_null: Some(true),
                    ..ColumnPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "email");
        assert!(updated.is_not_null);
    }

    #[test]
    fn default_values_are_validated_against_the_column_type() {
        let mut graph = SchemaGraph::new();
        let table = graph.add_table();
        let column = graph.add_column(&table.id).unwrap();

        graph
            .update_column(&table.id, &column.id, ColumnPatch::column_type(ColumnType::Int))
            .unwrap();

        let rejected = graph.update_column(
            &table.id,
            &column.id,
            ColumnPatch {
                default_value: Some("not a number".into()),
                ..ColumnPatch::default()
            },
        );
        assert!(matches!(rejected, Err(SchemaError::InvalidDefault { .. })));

        graph
            .update_column(
                &table.id,
                &column.id,
                ColumnPatch {
                    default_value: Some("0".into()),
                    ..ColumnPatch::default()
                },
            )
            .unwrap();
    }

    #[test]
    fn relation_commit_mirrors_the_source_column() {
        let (mut graph, t1, t2) = graph_with_two_tables();
        let c1 = t1.columns[0].id.clone();
        let c2 = t2.columns[0].id.clone();

        let relation = graph
            .add_relation((&t1.id, &c1), (&t2.id, &c2), RelationKind::OneToMany)
            .unwrap();
        assert_eq!(graph.relations().len(), 1);
        assert!(relation.source_id.is(&t1.id, &c1));
        assert!(relation.target_id.is(&t2.id, &c2));
        assert_eq!(relation.kind, RelationKind::OneToMany);

        let mirror = graph
            .table(&t1.id)
            .unwrap()
            .column(&c1)
            .unwrap()
            .references
            .clone()
            .unwrap();
        assert_eq!(mirror.table_id, t2.id);
        assert_eq!(mirror.column_id, c2);
        assert_eq!(mirror.kind, RelationKind::OneToMany);
    }

    #[test]
    fn self_loops_and_duplicates_are_rejected() {
        let (mut graph, t1, t2) = graph_with_two_tables();
        let c1 = t1.columns[0].id.clone();
        let c2 = t2.columns[0].id.clone();

        assert_eq!(
            graph.add_relation((&t1.id, &c1), (&t1.id, &c1), RelationKind::OneToMany),
            Err(SchemaError::SelfReference)
        );

        graph
            .add_relation((&t1.id, &c1), (&t2.id, &c2), RelationKind::OneToMany)
            .unwrap();
        assert_eq!(
            graph.add_relation((&t1.id, &c1), (&t2.id, &c2), RelationKind::ManyToMany),
            Err(SchemaError::DuplicateRelation)
        );
    }

    #[test]
    fn deleting_a_table_cascades_into_relations_and_mirrors() {
        let (mut graph, t1, t2) = graph_with_two_tables();
        let c1 = t1.columns[0].id.clone();
        let c2 = t2.columns[0].id.clone();
        graph
            .add_relation((&t1.id, &c1), (&t2.id, &c2), RelationKind::OneToMany)
            .unwrap();

        graph.delete_table(&t2.id).unwrap();
        assert!(graph.relations().is_empty());
        assert!(graph
            .table(&t1.id)
            .unwrap()
            .column(&c1)
            .unwrap()
            .references
            .is_none());
    }

    #[test]
    fn deleting_a_target_column_cascades_into_relations_and_mirrors() {
        let (mut graph, t1, t2) = graph_with_two_tables();
        let c1 = t1.columns[0].id.clone();
        let target = graph.add_column(&t2.id).unwrap();
        graph
            .add_relation((&t1.id, &c1), (&t2.id, &target.id), RelationKind::OneToMany)
            .unwrap();

        graph.delete_column(&t2.id, &target.id).unwrap();
        assert!(graph.relations().is_empty());
        assert!(graph
            .table(&t1.id)
            .unwrap()
            .column(&c1)
            .unwrap()
            .references
            .is_none());
    }

    #[test]
    fn config_round_trip_preserves_tables_and_order() {
        let (mut graph, t1, t2) = graph_with_two_tables();
        graph.set_name("shop");
        graph.add_column(&t1.id).unwrap();
        graph.add_column(&t1.id).unwrap();
        let c1 = t1.columns[0].id.clone();
        let c2 = t2.columns[0].id.clone();
        graph
            .add_relation((&t1.id, &c1), (&t2.id, &c2), RelationKind::OneToMany)
            .unwrap();

        let json = serde_json::to_string(&graph.to_config()).unwrap();
        let config: DatabaseConfig = serde_json::from_str(&json).unwrap();
        let rehydrated = SchemaGraph::from_config(config).unwrap();
        assert_eq!(rehydrated, graph);
    }

    #[test]
    fn legacy_config_without_relations_still_hydrates() {
        let json = r#"{
            "name": "legacy",
            "tables": [{
                "id": "table-a",
                "name": "Table 1",
                "position": {"x": 10.0, "y": 20.0},
                "columns": [{
                    "id": "column-a",
                    "name": "id",
                    "type": "INT",
                    "isPrimaryKey": true,
                    "isNotNull": true
                }]
            }]
        }"#;
        let config: DatabaseConfig = serde_json::from_str(json).unwrap();
        let graph = SchemaGraph::from_config(config).unwrap();
        assert_eq!(graph.name(), "legacy");
        assert_eq!(graph.tables().len(), 1);
        assert!(graph.relations().is_empty());
    }

    #[test]
    fn hydration_rejects_tables_without_columns() {
        let config = DatabaseConfig {
            name: "bad".into(),
            tables: vec![Table {
                id: "table-a".into(),
                name: "Empty".into(),
                columns: vec![],
                position: Position::default(),
            }],
            relations: vec![],
        };
        assert!(matches!(
            SchemaGraph::from_config(config),
            Err(SchemaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn hydration_rejects_dangling_relation_endpoints() {
        let (graph, t1, t2) = graph_with_two_tables();
        let mut config = graph.to_config();
        config.relations.push(Relation {
            source_id: EndpointKey::new(&t1.id, &t1.columns[0].id),
            target_id: EndpointKey::new(&t2.id, "column-gone"),
            kind: RelationKind::OneToMany,
        });
        assert!(matches!(
            SchemaGraph::from_config(config),
            Err(SchemaError::InvalidConfig(_))
        ));
    }
}
