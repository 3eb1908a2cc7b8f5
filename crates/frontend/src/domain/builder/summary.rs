use contracts::schema::DatabaseConfig;
use leptos::prelude::*;

/// Read-only listing of a saved configuration: tables, columns and their
/// badges. Shown next to the deployment form.
#[component]
pub fn SchemaSummary(config: DatabaseConfig) -> impl IntoView {
    view! {
        <div class="schema-summary">
            {config
                .tables
                .iter()
                .map(|table| {
                    let columns = table
                        .columns
                        .iter()
                        .map(|column| {
                            let not_null = column.is_not_null;
                            let primary_key = column.is_primary_key;
                            let default_value = column.default_value.clone();
                            view! {
                                <div class="schema-summary__column">
                                    <span class="schema-summary__column-name">
                                        {column.name.clone()}
                                    </span>
                                    <span class="schema-summary__column-type">
                                        {column.column_type.label()}
                                    </span>
                                    <Show when=move || not_null>
                                        <span class="schema-summary__badge schema-summary__badge--notnull">
                                            "NOT NULL"
                                        </span>
                                    </Show>
                                    <Show when=move || primary_key>
                                        <span class="schema-summary__badge schema-summary__badge--pk">
                                            "PRIMARY KEY"
                                        </span>
                                    </Show>
                                    {default_value
                                        .map(|value| {
                                            view! {
                                                <span class="schema-summary__badge">
                                                    {format!("DEFAULT: {}", value)}
                                                </span>
                                            }
                                        })}
                                </div>
                            }
                        })
                        .collect_view();
                    view! {
                        <div class="schema-summary__table">
                            <h3>{table.name.clone()}</h3>
                            {columns}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
