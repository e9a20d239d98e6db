//! Student record served by the generic list/create and
//! retrieve/update/destroy endpoints.

use super::schema::{FieldSpec, Resource};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct Student {
    /// Server-assigned primary key.
    pub id: i64,

    /// Display name, at most 50 characters.
    pub name: String,

    /// Home city, at most 100 characters.
    pub city: String,

    pub roll_no: i64,

    /// Short status code such as "Yes" or "No".
    pub is_active: String,
}

impl Resource for Student {
    const TABLE: &'static str = "students_info";
    const LABEL: &'static str = "student";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name", 50),
        FieldSpec::text("city", 100),
        FieldSpec::integer("roll_no"),
        FieldSpec::text("is_active", 3),
    ];
}
