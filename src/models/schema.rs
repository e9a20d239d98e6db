//! Declared field schemas shared by every entity variant.

use serde::Serialize;
use sqlx::{FromRow, sqlite::SqliteRow};

/// Maximum length Django-style email columns accept.
pub const EMAIL_MAX_LEN: usize = 254;

/// Constraint attached to a writable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, at most `max_len` characters after trimming.
    Text { max_len: usize },
    /// Signed 64-bit integer; numeric strings are coerced.
    Integer,
    /// Text shaped like `local@domain.tld`.
    Email { max_len: usize },
}

/// One writable column of an entity.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str, max_len: usize) -> Self {
        Self {
            name,
            kind: FieldKind::Text { max_len },
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
        }
    }

    pub const fn email(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Email {
                max_len: EMAIL_MAX_LEN,
            },
        }
    }
}

/// An entity stored in its own table with a server-assigned `id` column.
///
/// `FIELDS` lists the writable columns in declaration order. `id` is never
/// part of it: storage assigns it and requests cannot change it.
pub trait Resource: for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Unpin + 'static {
    /// Backing table.
    const TABLE: &'static str;
    /// Human-readable singular name used in error messages.
    const LABEL: &'static str;
    const FIELDS: &'static [FieldSpec];
    /// Column used for natural-key lookups.
    const NATURAL_KEY: &'static str = "name";

    /// `id` followed by every declared field, ready for a SELECT list.
    fn columns() -> String {
        std::iter::once("id")
            .chain(Self::FIELDS.iter().map(|field| field.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
