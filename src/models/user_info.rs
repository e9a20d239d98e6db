//! User record served by the function-style endpoint, where updates carry
//! their `id` inside the JSON body.

use super::schema::{FieldSpec, Resource};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub roll: i64,
    pub city: String,
    pub is_active: String,
}

impl Resource for UserInfo {
    const TABLE: &'static str = "user_info";
    const LABEL: &'static str = "user";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name", 100),
        FieldSpec::integer("roll"),
        FieldSpec::text("city", 100),
        FieldSpec::text("is_active", 3),
    ];
}
