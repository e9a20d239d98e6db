//! src/services/record_service.rs
//!
//! RecordService: create/read/update/delete for any [`Resource`], backed by
//! SQLite. Validation runs through the serializer before anything is written.
//! Lookups go by primary key or by the entity's natural key.

use crate::{
    models::schema::Resource,
    services::serializer::{self, FieldErrors, FieldValue, Payload},
};
use sqlx::{QueryBuilder, SqlitePool, sqlite::Sqlite};
use std::{fmt, sync::Arc};
use thiserror::Error;
use tracing::{debug, warn};

/// How a request identifies the record it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Server-assigned primary key.
    Id(i64),
    /// Value of the entity's natural key column (`name`).
    Name(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "id {}", id),
            Lookup::Name(name) => write!(f, "name `{}`", name),
        }
    }
}

/// Whether an update replaces every declared field or only those supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Full,
    Partial,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("{entity} with {lookup} not found")]
    NotFound {
        entity: &'static str,
        lookup: Lookup,
    },
    #[error("{entity} with {lookup} matches more than one record")]
    Ambiguous {
        entity: &'static str,
        lookup: Lookup,
    },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type RecordResult<T> = Result<T, RecordError>;

/// RecordService provides the CRUD operations shared by every entity:
/// - List every record of a type
/// - Get one record by id or natural key
/// - Create a record from a validated payload
/// - Update a record fully or partially
/// - Delete a record, reporting how many rows went away
///
/// It holds no per-request state. Concurrency control is left to SQLite.
#[derive(Clone)]
pub struct RecordService {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl RecordService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Every record of type `R`, in insertion (id) order.
    pub async fn list<R: Resource>(&self) -> RecordResult<Vec<R>> {
        let sql = format!("SELECT {} FROM {} ORDER BY id ASC", R::columns(), R::TABLE);
        let rows = sqlx::query_as::<_, R>(&sql).fetch_all(&*self.db).await?;
        Ok(rows)
    }

    /// Fetch exactly one record.
    pub async fn get<R: Resource>(&self, lookup: &Lookup) -> RecordResult<R> {
        let id = self.resolve_id::<R>(lookup).await?;
        self.fetch_by_id::<R>(id, lookup).await
    }

    /// Validate every declared field and insert a new row.
    ///
    /// Nothing is written when any field fails; the error lists them all.
    pub async fn create<R: Resource>(&self, payload: &Payload) -> RecordResult<R> {
        let values =
            serializer::validate(R::FIELDS, payload, false).map_err(RecordError::Validation)?;

        let mut builder = QueryBuilder::<Sqlite>::new(format!("INSERT INTO {} (", R::TABLE));
        builder.push(
            values
                .iter()
                .map(|(column, _)| *column)
                .collect::<Vec<_>>()
                .join(", "),
        );
        builder.push(") VALUES (");
        for (i, (_, value)) in values.into_iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            push_value(&mut builder, value);
        }
        builder.push(") RETURNING ");
        builder.push(R::columns());

        let record: R = builder.build_query_as().fetch_one(&*self.db).await?;
        debug!("created {} in {}", R::LABEL, R::TABLE);
        Ok(record)
    }

    /// Overwrite fields of an existing record.
    ///
    /// The lookup is resolved before validation, so an unknown key reports
    /// NotFound even when the payload is also invalid. In `Partial` mode only
    /// supplied fields are validated and written; an empty partial payload
    /// returns the record untouched.
    pub async fn update<R: Resource>(
        &self,
        lookup: &Lookup,
        payload: &Payload,
        mode: UpdateMode,
    ) -> RecordResult<R> {
        let id = self.resolve_id::<R>(lookup).await?;
        let values = serializer::validate(R::FIELDS, payload, mode == UpdateMode::Partial)
            .map_err(RecordError::Validation)?;

        if values.is_empty() {
            return self.fetch_by_id::<R>(id, lookup).await;
        }

        let mut builder = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", R::TABLE));
        for (i, (column, value)) in values.into_iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(column).push(" = ");
            push_value(&mut builder, value);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" RETURNING ");
        builder.push(R::columns());

        let updated: Option<R> = builder
            .build_query_as()
            .fetch_optional(&*self.db)
            .await?;

        match updated {
            Some(record) => {
                debug!("updated {} {} ({:?})", R::LABEL, id, mode);
                Ok(record)
            }
            // Removed between lookup and write.
            None => Err(not_found::<R>(lookup)),
        }
    }

    /// Permanently remove a record and return the number of rows removed.
    ///
    /// Not idempotent: deleting an already-deleted key is NotFound.
    pub async fn delete<R: Resource>(&self, lookup: &Lookup) -> RecordResult<u64> {
        let id = self.resolve_id::<R>(lookup).await?;

        let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&*self.db).await?;

        if result.rows_affected() == 0 {
            return Err(not_found::<R>(lookup));
        }

        debug!("deleted {} {}", R::LABEL, id);
        Ok(result.rows_affected())
    }

    /// Turn a lookup into a primary key.
    ///
    /// A natural-key lookup must match exactly one row: none is NotFound,
    /// several is Ambiguous.
    async fn resolve_id<R: Resource>(&self, lookup: &Lookup) -> RecordResult<i64> {
        match lookup {
            Lookup::Id(id) => {
                let sql = format!("SELECT id FROM {} WHERE id = ?", R::TABLE);
                sqlx::query_scalar::<_, i64>(&sql)
                    .bind(*id)
                    .fetch_optional(&*self.db)
                    .await?
                    .ok_or_else(|| not_found::<R>(lookup))
            }
            Lookup::Name(name) => {
                let sql = format!(
                    "SELECT id FROM {} WHERE {} = ? ORDER BY id LIMIT 2",
                    R::TABLE,
                    R::NATURAL_KEY
                );
                let ids = sqlx::query_scalar::<_, i64>(&sql)
                    .bind(name.as_str())
                    .fetch_all(&*self.db)
                    .await?;

                match ids.as_slice() {
                    [id] => Ok(*id),
                    [] => Err(not_found::<R>(lookup)),
                    _ => {
                        warn!(
                            "natural-key lookup on {} matched several rows for {}",
                            R::TABLE,
                            lookup
                        );
                        Err(RecordError::Ambiguous {
                            entity: R::LABEL,
                            lookup: lookup.clone(),
                        })
                    }
                }
            }
        }
    }

    async fn fetch_by_id<R: Resource>(&self, id: i64, lookup: &Lookup) -> RecordResult<R> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", R::columns(), R::TABLE);
        sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_one(&*self.db)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => not_found::<R>(lookup),
                other => RecordError::Sqlx(other),
            })
    }
}

fn not_found<R: Resource>(lookup: &Lookup) -> RecordError {
    RecordError::NotFound {
        entity: R::LABEL,
        lookup: lookup.clone(),
    }
}

fn push_value(builder: &mut QueryBuilder<'_, Sqlite>, value: FieldValue) {
    match value {
        FieldValue::Text(text) => {
            builder.push_bind(text);
        }
        FieldValue::Integer(number) => {
            builder.push_bind(number);
        }
    }
}
