use contracts::deployment::SaveConfigRequest;
use contracts::schema::{ColumnPatch, Position, RelationDraft, SchemaGraph};
use leptos::prelude::*;

use super::model;

/// ViewModel for the schema builder canvas
///
/// The domain state is a [`SchemaGraph`] plus the in-progress
/// [`RelationDraft`]. Everything else here is purely visual: the canvas pan
/// offset, the pointer position feeding the provisional relation line, and
/// which table is being dragged. Rejected operations land in `error` and are
/// shown as a dismissible banner; the graph itself is never left corrupted.
#[derive(Clone, Copy)]
pub struct BuilderViewModel {
    pub graph: RwSignal<SchemaGraph>,
    pub draft: RwSignal<RelationDraft>,
    pub pan: RwSignal<Position>,
    pub pointer: RwSignal<Position>,
    pub dragged_table: RwSignal<Option<(String, f64, f64)>>,
    pub is_panning: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
}

impl BuilderViewModel {
    pub fn new() -> Self {
        Self {
            graph: RwSignal::new(SchemaGraph::new()),
            draft: RwSignal::new(RelationDraft::Idle),
            pan: RwSignal::new(Position::default()),
            pointer: RwSignal::new(Position::default()),
            dragged_table: RwSignal::new(None),
            is_panning: RwSignal::new(false),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            is_saving: RwSignal::new(false),
        }
    }

    fn report<T>(&self, result: Result<T, contracts::schema::SchemaError>) {
        if let Err(e) = result {
            self.error.set(Some(e.to_string()));
        }
    }

    pub fn set_name(&self, name: String) {
        self.graph.update(|g| g.set_name(name));
    }

    pub fn add_table(&self) {
        self.graph.update(|g| {
            g.add_table();
        });
    }

    pub fn delete_table(&self, table_id: &str) {
        let table_id = table_id.to_string();
        let vm = *self;
        self.graph.update(|g| vm.report(g.delete_table(&table_id)));
    }

    pub fn rename_table(&self, table_id: &str, name: String) {
        let table_id = table_id.to_string();
        let vm = *self;
        self.graph
            .update(|g| vm.report(g.rename_table(&table_id, name)));
    }

    pub fn set_table_position(&self, table_id: &str, position: Position) {
        let table_id = table_id.to_string();
        let vm = *self;
        self.graph
            .update(|g| vm.report(g.update_table_position(&table_id, position)));
    }

    pub fn add_column(&self, table_id: &str) {
        let table_id = table_id.to_string();
        let vm = *self;
        self.graph.update(|g| vm.report(g.add_column(&table_id)));
    }

    pub fn delete_column(&self, table_id: &str, column_id: &str) {
        let (table_id, column_id) = (table_id.to_string(), column_id.to_string());
        let vm = *self;
        self.graph
            .update(|g| vm.report(g.delete_column(&table_id, &column_id)));
    }

    pub fn update_column(&self, table_id: &str, column_id: &str, patch: ColumnPatch) {
        let (table_id, column_id) = (table_id.to_string(), column_id.to_string());
        let vm = *self;
        self.graph
            .update(|g| vm.report(g.update_column(&table_id, &column_id, patch)));
    }

    /// Begin the drag-to-connect gesture from a source column
    pub fn start_relation(&self, table_id: &str, column_id: &str) {
        let (table_id, column_id) = (table_id.to_string(), column_id.to_string());
        self.draft.update(|d| d.start(table_id, column_id));
    }

    /// Drop the gesture onto a target column
    pub fn complete_relation(&self, target_table_id: &str, target_column_id: &str) {
        let mut draft = self.draft.get_untracked();
        let vm = *self;
        let (table_id, column_id) = (target_table_id.to_string(), target_column_id.to_string());
        self.graph.update(|g| {
            vm.report(draft.complete(g, &table_id, &column_id));
        });
        // The gesture is consumed whether the commit succeeded or not
        self.draft.set(RelationDraft::Idle);
    }

    pub fn cancel_relation(&self) {
        self.draft.update(|d| d.cancel());
    }

    pub fn dismiss_error(&self) {
        self.error.set(None);
    }

    /// Persist the current schema on the server
    pub fn save_command(&self) {
        let config = self.graph.get_untracked().to_config();
        if config.name.trim().is_empty() {
            self.error.set(Some("Enter a database name before saving".to_string()));
            return;
        }

        self.is_saving.set(true);
        self.notice.set(None);
        self.error.set(None);

        let request = SaveConfigRequest {
            name: config.name.clone(),
            config,
        };
        let vm = *self;
        wasm_bindgen_futures::spawn_local(async move {
            match model::save_config(&request).await {
                Ok(saved) => {
                    vm.notice.set(Some(format!("Saved configuration {:?}", saved.name)));
                }
                Err(e) => vm.error.set(Some(e)),
            }
            vm.is_saving.set(false);
        });
    }
}
