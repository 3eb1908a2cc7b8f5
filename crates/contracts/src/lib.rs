//! Shared contracts between the designer frontend and the backend.
//!
//! `schema` is the in-memory model the visual builder edits; the rest are
//! the wire DTOs for auth, saved configurations and deployment requests.

pub mod deployment;
pub mod schema;
pub mod system;
