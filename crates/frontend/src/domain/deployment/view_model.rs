use contracts::deployment::{
    DatabaseKind, DeploymentRequest, DeploymentStatus, SavedConfig, ServerConfig,
};
use leptos::prelude::*;

use super::model;

/// ViewModel for the deployment form
///
/// The form fields mirror [`ServerConfig`]; validation runs before the
/// request is built. A failed deployment only sets `error`, it never touches
/// the selected configuration.
#[derive(Clone, Copy)]
pub struct DeploymentViewModel {
    pub configs: RwSignal<Vec<SavedConfig>>,
    pub selected_config_id: RwSignal<Option<String>>,
    pub host: RwSignal<String>,
    pub port: RwSignal<String>,
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
    pub database: RwSignal<String>,
    pub database_type: RwSignal<DatabaseKind>,
    pub is_deploying: RwSignal<bool>,
    pub status: RwSignal<Option<DeploymentStatus>>,
    pub error: RwSignal<Option<String>>,
}

impl DeploymentViewModel {
    pub fn new() -> Self {
        Self {
            configs: RwSignal::new(Vec::new()),
            selected_config_id: RwSignal::new(None),
            host: RwSignal::new(String::new()),
            port: RwSignal::new("5432".to_string()),
            username: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            database: RwSignal::new(String::new()),
            database_type: RwSignal::new(DatabaseKind::PostgreSql),
            is_deploying: RwSignal::new(false),
            status: RwSignal::new(None),
            error: RwSignal::new(None),
        }
    }

    /// Load the saved configurations for the selector
    pub fn load_configs(&self) {
        let vm = *self;
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_configs().await {
                Ok(configs) => {
                    if vm.selected_config_id.get_untracked().is_none() {
                        vm.selected_config_id
                            .set(configs.first().map(|c| c.id.clone()));
                    }
                    vm.configs.set(configs);
                }
                Err(e) => vm.error.set(Some(e)),
            }
        });
    }

    pub fn selected_config(&self) -> Option<SavedConfig> {
        let id = self.selected_config_id.get()?;
        self.configs.get().into_iter().find(|c| c.id == id)
    }

    fn validate(&self) -> Result<(String, u16), String> {
        let config_id = self
            .selected_config_id
            .get_untracked()
            .ok_or("Select a saved configuration first")?;
        if self.host.get_untracked().trim().is_empty() {
            return Err("Host is required".to_string());
        }
        let port = self
            .port
            .get_untracked()
            .trim()
            .parse::<u16>()
            .map_err(|_| "Port must be a number between 1 and 65535".to_string())?;
        if self.username.get_untracked().trim().is_empty() {
            return Err("Username is required".to_string());
        }
        if self.password.get_untracked().is_empty() {
            return Err("Password is required".to_string());
        }
        if self.database.get_untracked().trim().is_empty() {
            return Err("Database name is required".to_string());
        }
        Ok((config_id, port))
    }

    /// Validate the form and submit the deployment
    pub fn deploy_command(&self) {
        let (config_id, port) = match self.validate() {
            Ok(v) => v,
            Err(e) => {
                self.error.set(Some(e));
                return;
            }
        };

        let request = DeploymentRequest {
            config_id,
            server: ServerConfig {
                host: self.host.get_untracked().trim().to_string(),
                port,
                username: self.username.get_untracked().trim().to_string(),
                password: self.password.get_untracked(),
                database_type: self.database_type.get_untracked(),
                database: self.database.get_untracked().trim().to_string(),
                additional_config: None,
            },
        };

        self.is_deploying.set(true);
        self.status.set(None);
        self.error.set(None);

        let vm = *self;
        wasm_bindgen_futures::spawn_local(async move {
            match model::deploy(&request).await {
                Ok(status) => vm.status.set(Some(status)),
                Err(e) => vm.error.set(Some(format!("Deployment failed: {}", e))),
            }
            vm.is_deploying.set(false);
        });
    }
}
