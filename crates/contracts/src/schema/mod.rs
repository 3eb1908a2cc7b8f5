//! Schema-graph model: tables, columns, relations and the drag-to-connect
//! gesture. The graph is the single source of truth the builder renders
//! from; every mutation goes through [`SchemaGraph`].

mod column;
mod draft;
mod graph;
mod ident;
mod relation;
mod table;

pub use column::{Column, ColumnPatch, ColumnReference, ColumnType};
pub use draft::RelationDraft;
pub use graph::{DatabaseConfig, SchemaError, SchemaGraph};
pub use ident::new_id;
pub use relation::{EndpointKey, Relation, RelationKind};
pub use table::{Position, Table};
