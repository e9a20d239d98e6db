//! Student record behind the single hand-dispatched endpoint. Updates and
//! deletes locate the row by its `name` rather than its id.

use super::schema::{FieldSpec, Resource};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct CurdStudent {
    pub id: i64,

    /// Natural key. Not unique in storage; see `RecordError::Ambiguous`.
    pub name: String,

    pub roll_no: i64,
    pub city: String,

    /// Free-form status code, at most 6 characters.
    pub status: String,
}

impl Resource for CurdStudent {
    const TABLE: &'static str = "curd_students";
    const LABEL: &'static str = "student";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name", 50),
        FieldSpec::integer("roll_no"),
        FieldSpec::text("city", 50),
        FieldSpec::text("status", 6),
    ];
}
