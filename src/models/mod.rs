//! Entity variants exposed by the service.
//!
//! Each entity maps to one SQLite table via `sqlx::FromRow`, serializes as
//! JSON via `serde`, and describes its writable fields through
//! [`schema::Resource`] so the generic CRUD service can validate and persist it.

pub mod curd_student;
pub mod registration;
pub mod schema;
pub mod student;
pub mod user_info;
