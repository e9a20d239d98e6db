use super::schema::{FieldSpec, Resource};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user sign-up. Only ever created.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct Registration {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub city: String,
}

impl Resource for Registration {
    const TABLE: &'static str = "registered_users";
    const LABEL: &'static str = "registration";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name", 20),
        FieldSpec::email("email"),
        FieldSpec::text("city", 20),
    ];
}
