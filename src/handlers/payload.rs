//! Request body decoding and the small acknowledgment body shared by the
//! message-style endpoints.
//!
//! Bodies are read as raw bytes and parsed here instead of through axum's
//! `Json` extractor: clients of the hand-rolled endpoints send JSON without a
//! `Content-Type` header, and GET/DELETE requests may carry a body too.

use crate::{errors::AppError, services::serializer::Payload};
use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Decode a request body into a JSON object. An empty body is `{}`.
pub fn parse_payload(body: &Bytes) -> Result<Payload, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::bad_request("request body must be a JSON object")),
        Err(err) => Err(AppError::bad_request(format!("JSON parse error - {}", err))),
    }
}

/// Pull the lookup key(s) `T` out of an already decoded body.
pub fn lookup_key<T: DeserializeOwned>(payload: &Payload) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(payload.clone()))
        .map_err(|err| AppError::bad_request(format!("invalid lookup key - {}", err)))
}

/// Numeric `{id}` path segment. Anything that is not an integer cannot name
/// a record, so it is answered with a JSON 404 instead of axum's plain-text
/// rejection.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|err| AppError::not_found(err.body_text()))?;
        raw.parse::<i64>()
            .map(RecordId)
            .map_err(|_| AppError::not_found(format!("no record with id `{}`", raw)))
    }
}

/// `{"msg": "..."}`, plus the removed row count for deletes.
#[derive(Debug, Serialize)]
pub struct Message {
    pub msg: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<u64>,
}

impl Message {
    pub fn new(msg: &'static str) -> Self {
        Self { msg, deleted: None }
    }

    pub fn deleted(msg: &'static str, count: u64) -> Self {
        Self {
            msg,
            deleted: Some(count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct NameKey {
        name: Option<String>,
    }

    #[test]
    fn empty_body_is_an_empty_object() {
        assert!(parse_payload(&Bytes::new()).unwrap().is_empty());
        assert!(parse_payload(&Bytes::from_static(b" \n")).unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_and_non_object_bodies() {
        let err = parse_payload(&Bytes::from_static(b"{\"name\": ")).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = parse_payload(&Bytes::from_static(b"[1, 2]")).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lookup_key_ignores_other_fields() {
        let payload = parse_payload(&Bytes::from_static(
            br#"{"name": "Sita", "city": "RameChap"}"#,
        ))
        .unwrap();
        let key: NameKey = lookup_key(&payload).unwrap();
        assert_eq!(key.name.as_deref(), Some("Sita"));
    }

    #[test]
    fn lookup_key_with_wrong_type_is_bad_request() {
        let payload = parse_payload(&Bytes::from_static(br#"{"name": 5}"#)).unwrap();
        let err = lookup_key::<NameKey>(&payload).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
