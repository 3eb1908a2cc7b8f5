pub mod repository;
pub mod service;

/// Stored user row. Password hashes never leave this crate.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}
