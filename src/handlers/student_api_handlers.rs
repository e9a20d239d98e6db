//! Single `/student-api/` endpoint for [`CurdStudent`], split by HTTP verb.
//!
//! Every request carries its key inside the JSON body: GET takes an
//! optional `id`, PUT and DELETE locate the record by `name`. Natural-key
//! lookups that match nothing are 404, and lookups that match several rows
//! are 409.

use crate::{
    errors::AppError,
    handlers::payload::{Message, lookup_key, parse_payload},
    models::curd_student::CurdStudent,
    services::{
        record_service::{Lookup, RecordService, UpdateMode},
        serializer,
    },
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct IdKey {
    id: Option<i64>,
}

/// `name` as sent; normalized like the stored column before the lookup.
#[derive(Debug, Deserialize)]
struct NameKey {
    name: Option<Value>,
}

impl NameKey {
    fn into_lookup(self) -> Result<Lookup, AppError> {
        let raw = self
            .name
            .ok_or_else(|| AppError::bad_request("`name` is required to identify the student"))?;
        serializer::natural_key(&raw)
            .map(Lookup::Name)
            .map_err(|msg| AppError::bad_request(format!("invalid `name` - {}", msg)))
    }
}

/// `GET /student-api/` — one student when the body names an `id`,
/// otherwise every student.
pub async fn fetch_students(
    State(service): State<RecordService>,
    body: Bytes,
) -> Result<Response, AppError> {
    let payload = parse_payload(&body)?;
    let response = match lookup_key::<IdKey>(&payload)?.id {
        Some(id) => Json(service.get::<CurdStudent>(&Lookup::Id(id)).await?).into_response(),
        None => Json(service.list::<CurdStudent>().await?).into_response(),
    };
    Ok(response)
}

/// `POST /student-api/`
pub async fn add_student(
    State(service): State<RecordService>,
    body: Bytes,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let payload = parse_payload(&body)?;
    service.create::<CurdStudent>(&payload).await?;
    Ok((StatusCode::CREATED, Json(Message::new("Successfully added"))))
}

/// `PUT /student-api/` — partial overwrite of the student named in the body.
pub async fn update_student(
    State(service): State<RecordService>,
    body: Bytes,
) -> Result<Json<Message>, AppError> {
    let payload = parse_payload(&body)?;
    let lookup = lookup_key::<NameKey>(&payload)?.into_lookup()?;
    service
        .update::<CurdStudent>(&lookup, &payload, UpdateMode::Partial)
        .await?;
    Ok(Json(Message::new("Successfully updated")))
}

/// `DELETE /student-api/`
pub async fn remove_student(
    State(service): State<RecordService>,
    body: Bytes,
) -> Result<Json<Message>, AppError> {
    let payload = parse_payload(&body)?;
    let lookup = lookup_key::<NameKey>(&payload)?.into_lookup()?;
    let removed = service.delete::<CurdStudent>(&lookup).await?;
    Ok(Json(Message::deleted("Successfully deleted", removed)))
}
