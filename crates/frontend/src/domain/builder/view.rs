use contracts::schema::{EndpointKey, Position, SchemaGraph};
use leptos::html::Div;
use leptos::prelude::*;

use super::table_block::TableBlock;
use super::view_model::BuilderViewModel;

const TABLE_WIDTH: f64 = 250.0;
const HEADER_HEIGHT: f64 = 40.0;
const ROW_HEIGHT: f64 = 36.0;

/// Canvas-space anchor of a relation endpoint. Sources leave from the right
/// edge of their row, targets arrive at the left edge.
fn endpoint_anchor(graph: &SchemaGraph, key: &EndpointKey, leaving: bool) -> Option<(f64, f64)> {
    let (table, column) = graph.resolve_endpoint(key)?;
    let row = table.columns.iter().position(|c| c.id == column.id)?;
    let x = if leaving {
        table.position.x + TABLE_WIDTH
    } else {
        table.position.x
    };
    let y = table.position.y + HEADER_HEIGHT + row as f64 * ROW_HEIGHT + ROW_HEIGHT / 2.0;
    Some((x, y))
}

fn source_anchor(graph: &SchemaGraph, table_id: &str, column_id: &str) -> Option<(f64, f64)> {
    endpoint_anchor(graph, &EndpointKey::new(table_id, column_id), true)
}

#[component]
pub fn BuilderPage() -> impl IntoView {
    let vm = BuilderViewModel::new();
    let canvas_ref = NodeRef::<Div>::new();

    let on_mouse_move = move |ev: web_sys::MouseEvent| {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let rect = canvas.get_bounding_client_rect();
        let pan = vm.pan.get_untracked();
        let pointer = Position::new(
            ev.client_x() as f64 - rect.left() - pan.x,
            ev.client_y() as f64 - rect.top() - pan.y,
        );
        vm.pointer.set(pointer);

        if vm.is_panning.get_untracked() {
            vm.pan.update(|p| {
                p.x += ev.movement_x() as f64;
                p.y += ev.movement_y() as f64;
            });
        }
        if let Some((table_id, dx, dy)) = vm.dragged_table.get_untracked() {
            vm.set_table_position(&table_id, Position::new(pointer.x - dx, pointer.y - dy));
        }
    };

    let on_mouse_up = move |_| {
        vm.is_panning.set(false);
        vm.dragged_table.set(None);
        // Releasing over empty canvas abandons the gesture
        if vm.draft.get_untracked().is_pending() {
            vm.cancel_relation();
        }
    };

    view! {
        <div class="builder">
            <div class="builder__toolbar">
                <h1>"Database Builder"</h1>
                <input
                    class="builder__name"
                    type="text"
                    placeholder="Enter database name"
                    prop:value=move || vm.graph.with(|g| g.name().to_string())
                    on:change=move |ev| vm.set_name(event_target_value(&ev))
                />
                <button class="btn-primary" on:click=move |_| vm.add_table()>
                    "Add Table"
                </button>
                <button
                    class="btn-primary"
                    disabled=move || vm.is_saving.get()
                    on:click=move |_| vm.save_command()
                >
                    {move || if vm.is_saving.get() { "Saving..." } else { "Save" }}
                </button>
            </div>

            <Show when=move || vm.error.get().is_some()>
                <div class="builder__error">
                    {move || vm.error.get().unwrap_or_default()}
                    <button on:click=move |_| vm.dismiss_error()>"\u{00d7}"</button>
                </div>
            </Show>
            <Show when=move || vm.notice.get().is_some()>
                <div class="builder__notice">
                    {move || vm.notice.get().unwrap_or_default()}
                </div>
            </Show>

            <div
                class="builder__viewport"
                node_ref=canvas_ref
                on:mousemove=on_mouse_move
                on:mouseup=on_mouse_up
                on:mousedown=move |_| vm.is_panning.set(true)
            >
                <div
                    class="builder__canvas"
                    style=move || {
                        let pan = vm.pan.get();
                        format!("transform: translate({}px, {}px);", pan.x, pan.y)
                    }
                >
                    <svg class="builder__relations">
                        {move || {
                            vm.graph
                                .with(|g| {
                                    g.relations()
                                        .iter()
                                        .filter_map(|relation| {
                                            let from = endpoint_anchor(g, &relation.source_id, true)?;
                                            let to = endpoint_anchor(g, &relation.target_id, false)?;
                                            Some(view! {
                                                <line
                                                    x1=from.0
                                                    y1=from.1
                                                    x2=to.0
                                                    y2=to.1
                                                    stroke="#4A5568"
                                                    stroke-width="1"
                                                />
                                            })
                                        })
                                        .collect_view()
                                })
                        }}
                        {move || {
                            let draft = vm.draft.get();
                            let pointer = vm.pointer.get();
                            draft.source().and_then(|(table_id, column_id)| {
                                vm.graph.with(|g| source_anchor(g, table_id, column_id)).map(
                                    |from| {
                                        view! {
                                            <line
                                                x1=from.0
                                                y1=from.1
                                                x2=pointer.x
                                                y2=pointer.y
                                                stroke="#6366f1"
                                                stroke-width="2"
                                                stroke-dasharray="5,5"
                                            />
                                        }
                                    },
                                )
                            })
                        }}
                    </svg>
                    {move || {
                        vm.graph
                            .with(|g| {
                                g.tables()
                                    .iter()
                                    .map(|table| {
                                        let table = table.clone();
                                        view! { <TableBlock table=table vm=vm /> }
                                    })
                                    .collect_view()
                            })
                    }}
                </div>
            </div>
        </div>
    }
}
