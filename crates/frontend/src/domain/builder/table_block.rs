use contracts::schema::{ColumnPatch, ColumnType, Table};
use leptos::prelude::*;

use super::view_model::BuilderViewModel;

/// One table rendered on the canvas: header with name and actions, one row
/// per column. Name edits are local until committed on Enter or blur, so
/// typing does not churn the graph.
#[component]
pub fn TableBlock(table: Table, vm: BuilderViewModel) -> impl IntoView {
    let editing_name = RwSignal::new(Option::<String>::None);
    let editing_column = RwSignal::new(Option::<(String, String)>::None);

    let table_id = table.id.clone();
    let header_table_id = table.id.clone();
    let add_table_id = table.id.clone();
    let delete_table_id = table.id.clone();
    let rename_table_id = table.id.clone();
    let header_name = table.name.clone();

    let style = format!(
        "position: absolute; left: {}px; top: {}px;",
        table.position.x, table.position.y
    );

    let commit_rename = move || {
        if let Some(name) = editing_name.get_untracked() {
            if !name.trim().is_empty() {
                vm.rename_table(&rename_table_id, name);
            }
            editing_name.set(None);
        }
    };
    let commit_rename_blur = commit_rename.clone();

    view! {
        <div class="table-block" style=style>
            <div
                class="table-block__header"
                on:mousedown=move |ev| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    let pointer = vm.pointer.get_untracked();
                    let table = vm.graph.with_untracked(|g| g.table(&header_table_id).cloned());
                    if let Some(table) = table {
                        vm.dragged_table.set(Some((
                            header_table_id.clone(),
                            pointer.x - table.position.x,
                            pointer.y - table.position.y,
                        )));
                    }
                }
            >
                <Show
                    when=move || editing_name.get().is_some()
                    fallback={
                        let name = header_name.clone();
                        move || {
                            let name = name.clone();
                            let start = name.clone();
                            view! {
                                <span
                                    class="table-block__name"
                                    on:dblclick=move |_| editing_name.set(Some(start.clone()))
                                >
                                    {name.clone()}
                                </span>
                            }
                        }
                    }
                >
                    {
                        let commit_rename = commit_rename.clone();
                        let commit_rename_blur = commit_rename_blur.clone();
                        view! {
                            <input
                                class="table-block__name-input"
                                type="text"
                                prop:value=move || editing_name.get().unwrap_or_default()
                                on:input=move |ev| {
                                    editing_name.set(Some(event_target_value(&ev)))
                                }
                                on:keydown=move |ev| {
                                    if ev.key() == "Enter" {
                                        commit_rename();
                                    }
                                }
                                on:blur=move |_| commit_rename_blur()
                                autofocus
                            />
                        }
                    }
                </Show>
                <div class="table-block__actions">
                    <button
                        title="Add column"
                        on:mousedown=move |ev| ev.stop_propagation()
                        on:click=move |_| vm.add_column(&add_table_id)
                    >
                        "+"
                    </button>
                    <button
                        title="Delete table"
                        on:mousedown=move |ev| ev.stop_propagation()
                        on:click=move |_| vm.delete_table(&delete_table_id)
                    >
                        "\u{00d7}"
                    </button>
                </div>
            </div>
            <div class="table-block__columns">
                {table
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(index, column)| {
                        column_row(table_id.clone(), index, column.clone(), vm, editing_column)
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

fn column_row(
    table_id: String,
    index: usize,
    column: contracts::schema::Column,
    vm: BuilderViewModel,
    editing_column: RwSignal<Option<(String, String)>>,
) -> impl IntoView {
    let column_id = column.id.clone();
    let row_table_id = table_id.clone();
    let row_column_id = column.id.clone();
    let edit_column_id = column.id.clone();
    let edit_start_name = column.name.clone();
    let name_for_view = column.name.clone();
    let commit_table_id = table_id.clone();
    let commit_column_id = column.id.clone();
    let type_table_id = table_id.clone();
    let type_column_id = column.id.clone();
    let default_table_id = table_id.clone();
    let default_column_id = column.id.clone();
    let pk_table_id = table_id.clone();
    let pk_column_id = column.id.clone();
    let link_table_id = table_id.clone();
    let link_column_id = column.id.clone();
    let del_table_id = table_id.clone();
    let del_column_id = column.id.clone();

    let is_editing =
        move || editing_column.get().map(|(id, _)| id) == Some(edit_column_id.clone());

    let commit_name = move || {
        if let Some((id, name)) = editing_column.get_untracked() {
            if id == commit_column_id && !name.trim().is_empty() {
                vm.update_column(&commit_table_id, &commit_column_id, ColumnPatch::name(name));
            }
            editing_column.set(None);
        }
    };
    let commit_name_blur = commit_name.clone();

    let is_primary_key = column.is_primary_key;
    let current_type = column.column_type;
    let default_value = column.default_value.clone().unwrap_or_default();

    view! {
        <div
            class="table-block__row"
            class:table-block__row--alt=index % 2 == 0
            on:mouseup=move |ev| {
                // Dropping a pending relation gesture onto this column
                if vm.draft.get_untracked().is_pending() {
                    ev.stop_propagation();
                    vm.complete_relation(&row_table_id, &row_column_id);
                }
            }
        >
            <Show when=move || is_primary_key>
                <span class="table-block__pk">"PK"</span>
            </Show>
            <Show
                when=is_editing.clone()
                fallback={
                    let name = name_for_view.clone();
                    let start = edit_start_name.clone();
                    let id = column_id.clone();
                    move || {
                        let name = name.clone();
                        let start = start.clone();
                        let id = id.clone();
                        view! {
                            <span
                                class="table-block__column-name"
                                on:dblclick=move |_| {
                                    editing_column.set(Some((id.clone(), start.clone())))
                                }
                            >
                                {name.clone()}
                            </span>
                        }
                    }
                }
            >
                {
                    let commit_name = commit_name.clone();
                    let commit_name_blur = commit_name_blur.clone();
                    view! {
                        <input
                            class="table-block__column-input"
                            type="text"
                            prop:value=move || {
                                editing_column.get().map(|(_, name)| name).unwrap_or_default()
                            }
                            on:input=move |ev| {
                                if let Some((id, _)) = editing_column.get_untracked() {
                                    editing_column.set(Some((id, event_target_value(&ev))));
                                }
                            }
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    commit_name();
                                }
                            }
                            on:blur=move |_| commit_name_blur()
                            autofocus
                        />
                    }
                }
            </Show>
            <select
                class="table-block__type"
                on:change=move |ev| {
                    if let Some(t) = ColumnType::parse(&event_target_value(&ev)) {
                        vm.update_column(&type_table_id, &type_column_id, ColumnPatch::column_type(t));
                    }
                }
            >
                {ColumnType::ALL
                    .iter()
                    .map(|t| {
                        view! {
                            <option value=t.as_str() selected=*t == current_type>
                                {t.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <input
                class="table-block__default"
                type="text"
                placeholder="default"
                prop:value=default_value
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    let patch = if value.is_empty() {
                        ColumnPatch { clear_default: true, ..ColumnPatch::default() }
                    } else {
                        ColumnPatch { default_value: Some(value), ..ColumnPatch::default() }
                    };
                    vm.update_column(&default_table_id, &default_column_id, patch);
                }
            />
            <button
                class="table-block__action"
                class:table-block__action--on=is_primary_key
                title="Toggle primary key"
                on:click=move |_| {
                    vm.update_column(
                        &pk_table_id,
                        &pk_column_id,
                        ColumnPatch {
                            is_primary_key: Some(!is_primary_key),
                            ..ColumnPatch::default()
                        },
                    )
                }
            >
                "\u{1f511}"
            </button>
            <button
                class="table-block__action"
                title="Create relation"
                on:click=move |_| vm.start_relation(&link_table_id, &link_column_id)
            >
                "\u{2192}"
            </button>
            <Show when=move || index != 0>
                {
                    let del_table_id = del_table_id.clone();
                    let del_column_id = del_column_id.clone();
                    view! {
                        <button
                            class="table-block__action"
                            title="Delete column"
                            on:click=move |_| vm.delete_column(&del_table_id, &del_column_id)
                        >
                            "\u{00d7}"
                        </button>
                    }
                }
            </Show>
        </div>
    }
}
