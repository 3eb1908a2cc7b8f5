use super::graph::{SchemaError, SchemaGraph};
use super::relation::{Relation, RelationKind};

/// Two-phase drag-to-connect gesture: pick a source column, then a target.
///
/// The draft only remembers the source endpoint; nothing touches the graph
/// until [`RelationDraft::complete`] commits. Pointer tracking for the
/// provisional line lives in the view layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RelationDraft {
    #[default]
    Idle,
    PendingSource {
        table_id: String,
        column_id: String,
    },
}

impl RelationDraft {
    /// Record the chosen source endpoint. Restarting while already pending
    /// replaces the previous source (last gesture wins).
    pub fn start(&mut self, table_id: impl Into<String>, column_id: impl Into<String>) {
        *self = RelationDraft::PendingSource {
            table_id: table_id.into(),
            column_id: column_id.into(),
        };
    }

    /// Discard the pending source without mutating anything.
    pub fn cancel(&mut self) {
        *self = RelationDraft::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RelationDraft::PendingSource { .. })
    }

    pub fn source(&self) -> Option<(&str, &str)> {
        match self {
            RelationDraft::Idle => None,
            RelationDraft::PendingSource {
                table_id,
                column_id,
            } => Some((table_id, column_id)),
        }
    }

    /// Commit the gesture against `target`, creating a `one-to-many`
    /// relation in the graph and mirroring it on the source column.
    ///
    /// Returns `Ok(None)` when no gesture is in progress. The gesture is
    /// consumed either way; a rejected commit (self-loop, vanished
    /// endpoint, duplicate) resets to `Idle` and propagates the error.
    pub fn complete(
        &mut self,
        graph: &mut SchemaGraph,
        target_table_id: &str,
        target_column_id: &str,
    ) -> Result<Option<Relation>, SchemaError> {
        let (source_table, source_column) = match std::mem::take(self) {
            RelationDraft::Idle => return Ok(None),
            RelationDraft::PendingSource {
                table_id,
                column_id,
            } => (table_id, column_id),
        };
        graph
            .add_relation(
                (&source_table, &source_column),
                (target_table_id, target_column_id),
                RelationKind::OneToMany,
            )
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tables() -> (SchemaGraph, (String, String), (String, String)) {
        let mut graph = SchemaGraph::new();
        let t1 = graph.add_table();
        let t2 = graph.add_table();
        let source = (t1.id.clone(), t1.columns[0].id.clone());
        let target = (t2.id.clone(), t2.columns[0].id.clone());
        (graph, source, target)
    }

    #[test]
    fn start_then_complete_commits_exactly_one_relation() {
        let (mut graph, (t1, c1), (t2, c2)) = two_tables();
        let mut draft = RelationDraft::default();

        draft.start(t1.clone(), c1.clone());
        assert!(draft.is_pending());

        let relation = draft.complete(&mut graph, &t2, &c2).unwrap().unwrap();
        assert_eq!(draft, RelationDraft::Idle);
        assert_eq!(graph.relations().len(), 1);
        assert!(relation.source_id.is(&t1, &c1));
        assert!(relation.target_id.is(&t2, &c2));
        assert_eq!(relation.kind, RelationKind::OneToMany);

        let mirror = graph
            .table(&t1)
            .unwrap()
            .column(&c1)
            .unwrap()
            .references
            .clone()
            .unwrap();
        assert_eq!(mirror.table_id, t2);
        assert_eq!(mirror.column_id, c2);
        assert_eq!(mirror.kind, RelationKind::OneToMany);
    }

    #[test]
    fn complete_while_idle_is_a_no_op() {
        let (mut graph, _, (t2, c2)) = two_tables();
        let mut draft = RelationDraft::default();

        let committed = draft.complete(&mut graph, &t2, &c2).unwrap();
        assert!(committed.is_none());
        assert!(graph.relations().is_empty());
    }

    #[test]
    fn cancel_discards_the_pending_source() {
        let (mut graph, (t1, c1), (t2, c2)) = two_tables();
        let mut draft = RelationDraft::default();

        draft.start(t1, c1);
        draft.cancel();
        assert_eq!(draft, RelationDraft::Idle);

        let committed = draft.complete(&mut graph, &t2, &c2).unwrap();
        assert!(committed.is_none());
        assert!(graph.relations().is_empty());
    }

    #[test]
    fn rejected_commit_resets_the_draft() {
        let (mut graph, (t1, c1), _) = two_tables();
        let mut draft = RelationDraft::default();

        draft.start(t1.clone(), c1.clone());
        let result = draft.complete(&mut graph, &t1, &c1);
        assert_eq!(result, Err(SchemaError::SelfReference));
        assert_eq!(draft, RelationDraft::Idle);
        assert!(graph.relations().is_empty());
    }

    #[test]
    fn restarting_replaces_the_previous_source() {
        let (mut graph, (t1, c1), (t2, c2)) = two_tables();
        let extra = graph.add_column(&t1).unwrap();
        let mut draft = RelationDraft::default();

        draft.start(t1.clone(), c1);
        draft.start(t1.clone(), extra.id.clone());

        let relation = draft.complete(&mut graph, &t2, &c2).unwrap().unwrap();
        assert!(relation.source_id.is(&t1, &extra.id));
    }
}
