//! Wire DTOs for saved configurations and deployment submission.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::DatabaseConfig;

/// Database engines the deployer can provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseKind {
    #[serde(rename = "PostgreSQL", alias = "postgresql")]
    PostgreSql,
    #[serde(rename = "MySQL", alias = "mysql")]
    MySql,
    #[serde(rename = "Redis", alias = "redis")]
    Redis,
}

impl DatabaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKind::PostgreSql => "PostgreSQL",
            DatabaseKind::MySql => "MySQL",
            DatabaseKind::Redis => "Redis",
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection descriptor for the target server, collected by the
/// deployment form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database_type: DatabaseKind,
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_config: Option<BTreeMap<String, String>>,
}

/// A persisted [`DatabaseConfig`] snapshot belonging to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedConfig {
    pub id: String,
    pub name: String,
    pub config: DatabaseConfig,
    pub created_at: String,
}

/// Request to save a configuration under a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveConfigRequest {
    pub name: String,
    pub config: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentRequest {
    pub config_id: String,
    #[serde(rename = "serverConfig")]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentDetails {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentStatus {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<DeploymentDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_uses_camel_case_wire_names() {
        let json = r#"{
            "host": "db.example.com",
            "port": 5432,
            "username": "postgres",
            "password": "secret",
            "databaseType": "PostgreSQL",
            "database": "shop"
        }"#;
        let config: ServerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.database_type, DatabaseKind::PostgreSql);
        assert!(config.additional_config.is_none());

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["databaseType"], "PostgreSQL");
    }

    #[test]
    fn deployment_request_keeps_snake_case_config_id() {
        let request = DeploymentRequest {
            config_id: "cfg-1".into(),
            server: ServerConfig {
                host: "localhost".into(),
                port: 6379,
                username: "root".into(),
                password: "pw".into(),
                database_type: DatabaseKind::Redis,
                database: "cache".into(),
                additional_config: None,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["config_id"], "cfg-1");
        assert_eq!(value["serverConfig"]["databaseType"], "Redis");
    }
}
