use contracts::deployment::DatabaseKind;
use leptos::prelude::*;

use super::view_model::DeploymentViewModel;
use crate::domain::builder::summary::SchemaSummary;

const DATABASE_KINDS: [DatabaseKind; 3] = [
    DatabaseKind::PostgreSql,
    DatabaseKind::MySql,
    DatabaseKind::Redis,
];

#[component]
pub fn DeploymentPage() -> impl IntoView {
    let vm = DeploymentViewModel::new();
    vm.load_configs();

    view! {
        <div class="deployment">
            <h1>"Deploy Database"</h1>

            <Show when=move || vm.error.get().is_some()>
                <div class="deployment__error">
                    {move || vm.error.get().unwrap_or_default()}
                </div>
            </Show>
            <Show when=move || vm.status.get().is_some()>
                <div class="deployment__success">
                    {move || vm.status.get().map(|s| s.message).unwrap_or_default()}
                </div>
            </Show>

            <div class="form-group">
                <label for="config">"Saved configuration"</label>
                <select
                    id="config"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        vm.selected_config_id
                            .set(if value.is_empty() { None } else { Some(value) });
                    }
                >
                    {move || {
                        let selected = vm.selected_config_id.get();
                        vm.configs
                            .get()
                            .iter()
                            .map(|config| {
                                view! {
                                    <option
                                        value=config.id.clone()
                                        selected=selected.as_deref() == Some(config.id.as_str())
                                    >
                                        {config.name.clone()}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </div>

            <div class="form-group">
                <label for="database-type">"Database type"</label>
                <select
                    id="database-type"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        if let Some(kind) =
                            DATABASE_KINDS.iter().find(|k| k.as_str() == value)
                        {
                            vm.database_type.set(*kind);
                        }
                    }
                >
                    {move || {
                        let current = vm.database_type.get();
                        DATABASE_KINDS
                            .iter()
                            .map(|kind| {
                                view! {
                                    <option value=kind.as_str() selected=*kind == current>
                                        {kind.as_str()}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </div>

            <div class="form-group">
                <label for="host">"Host"</label>
                <input
                    type="text"
                    id="host"
                    placeholder="localhost"
                    prop:value=move || vm.host.get()
                    on:input=move |ev| vm.host.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="port">"Port"</label>
                <input
                    type="number"
                    id="port"
                    placeholder="5432"
                    prop:value=move || vm.port.get()
                    on:input=move |ev| vm.port.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="database">"Database"</label>
                <input
                    type="text"
                    id="database"
                    placeholder="my_database"
                    prop:value=move || vm.database.get()
                    on:input=move |ev| vm.database.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="deploy-username">"Username"</label>
                <input
                    type="text"
                    id="deploy-username"
                    placeholder="postgres"
                    prop:value=move || vm.username.get()
                    on:input=move |ev| vm.username.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="deploy-password">"Password"</label>
                <input
                    type="password"
                    id="deploy-password"
                    prop:value=move || vm.password.get()
                    on:input=move |ev| vm.password.set(event_target_value(&ev))
                />
            </div>

            <button
                class="btn-primary"
                disabled=move || vm.is_deploying.get()
                on:click=move |_| vm.deploy_command()
            >
                {move || if vm.is_deploying.get() { "Deploying..." } else { "Deploy Database" }}
            </button>

            {move || {
                vm.selected_config()
                    .map(|config| {
                        view! {
                            <div class="deployment__preview">
                                <h2>"Schema preview"</h2>
                                <SchemaSummary config=config.config />
                            </div>
                        }
                    })
            }}

            <div class="deployment__instructions">
                <h2>"Deployment instructions"</h2>
                <ol>
                    <li>"Select a previously saved database configuration"</li>
                    <li>"Enter the target server's connection details"</li>
                    <li>"Make sure the server has SSH access enabled"</li>
                    <li>"Ensure the server can install and configure databases"</li>
                    <li>"Click \"Deploy Database\" to start the deployment"</li>
                </ol>
            </div>
        </div>
    }
}
