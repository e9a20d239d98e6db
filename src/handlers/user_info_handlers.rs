//! Function-style endpoint for [`UserInfo`]: reads and deletes take the id
//! from the path, updates take it from the JSON body, and writes answer with
//! a short message instead of the record.

use crate::{
    errors::AppError,
    handlers::payload::{Message, RecordId, lookup_key, parse_payload},
    models::user_info::UserInfo,
    services::record_service::{Lookup, RecordService, UpdateMode},
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;

/// Lookup key carried in PUT/PATCH bodies.
#[derive(Debug, Deserialize)]
struct IdKey {
    id: Option<i64>,
}

/// `GET /user-info/`
pub async fn list_users(
    State(service): State<RecordService>,
) -> Result<Json<Vec<UserInfo>>, AppError> {
    Ok(Json(service.list::<UserInfo>().await?))
}

/// `GET /user-info/{id}/`
pub async fn get_user(
    State(service): State<RecordService>,
    RecordId(id): RecordId,
) -> Result<Json<UserInfo>, AppError> {
    Ok(Json(service.get::<UserInfo>(&Lookup::Id(id)).await?))
}

/// `POST /user-info/`
pub async fn create_user(
    State(service): State<RecordService>,
    body: Bytes,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let payload = parse_payload(&body)?;
    service.create::<UserInfo>(&payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(Message::new("Data inserted successfully")),
    ))
}

/// `PUT /user-info/` — body carries `id` and every field.
pub async fn replace_user(
    State(service): State<RecordService>,
    body: Bytes,
) -> Result<Json<Message>, AppError> {
    write_user(&service, &body, UpdateMode::Full).await?;
    Ok(Json(Message::new("Data completely updated")))
}

/// `PATCH /user-info/` — body carries `id` and the fields to overwrite.
pub async fn patch_user(
    State(service): State<RecordService>,
    body: Bytes,
) -> Result<Json<Message>, AppError> {
    write_user(&service, &body, UpdateMode::Partial).await?;
    Ok(Json(Message::new("Data overwritten in some fields")))
}

/// `DELETE /user-info/{id}/`
pub async fn delete_user(
    State(service): State<RecordService>,
    RecordId(id): RecordId,
) -> Result<Json<Message>, AppError> {
    let removed = service.delete::<UserInfo>(&Lookup::Id(id)).await?;
    Ok(Json(Message::deleted("Deleted successfully", removed)))
}

async fn write_user(service: &RecordService, body: &Bytes, mode: UpdateMode) -> Result<(), AppError> {
    let payload = parse_payload(body)?;
    let id = lookup_key::<IdKey>(&payload)?
        .id
        .ok_or_else(|| AppError::bad_request("`id` is required to identify the user"))?;

    service
        .update::<UserInfo>(&Lookup::Id(id), &payload, mode)
        .await?;
    Ok(())
}
