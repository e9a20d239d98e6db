//! List/create and retrieve/update/destroy handlers that work for any
//! [`Resource`]. Routes pick the entity by instantiating them, e.g.
//! `get(list::<Student>)`.
//!
//! Created and updated records are echoed back in full, id included.

use crate::{
    errors::AppError,
    handlers::payload::{Message, RecordId, parse_payload},
    models::schema::Resource,
    services::record_service::{Lookup, RecordService, UpdateMode},
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
};

/// `GET /{collection}/`
pub async fn list<R: Resource>(
    State(service): State<RecordService>,
) -> Result<Json<Vec<R>>, AppError> {
    Ok(Json(service.list::<R>().await?))
}

/// `POST /{collection}/` — 201 with the stored record.
pub async fn create<R: Resource>(
    State(service): State<RecordService>,
    body: Bytes,
) -> Result<(StatusCode, Json<R>), AppError> {
    let payload = parse_payload(&body)?;
    let record = service.create::<R>(&payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /{collection}/{id}/`
pub async fn retrieve<R: Resource>(
    State(service): State<RecordService>,
    RecordId(id): RecordId,
) -> Result<Json<R>, AppError> {
    Ok(Json(service.get::<R>(&Lookup::Id(id)).await?))
}

/// `PUT /{collection}/{id}/` — every declared field is required.
pub async fn update<R: Resource>(
    State(service): State<RecordService>,
    RecordId(id): RecordId,
    body: Bytes,
) -> Result<Json<R>, AppError> {
    let payload = parse_payload(&body)?;
    let record = service
        .update::<R>(&Lookup::Id(id), &payload, UpdateMode::Full)
        .await?;
    Ok(Json(record))
}

/// `PATCH /{collection}/{id}/` — only supplied fields change.
pub async fn partial_update<R: Resource>(
    State(service): State<RecordService>,
    RecordId(id): RecordId,
    body: Bytes,
) -> Result<Json<R>, AppError> {
    let payload = parse_payload(&body)?;
    let record = service
        .update::<R>(&Lookup::Id(id), &payload, UpdateMode::Partial)
        .await?;
    Ok(Json(record))
}

/// `DELETE /{collection}/{id}/`
pub async fn destroy<R: Resource>(
    State(service): State<RecordService>,
    RecordId(id): RecordId,
) -> Result<Json<Message>, AppError> {
    let removed = service.delete::<R>(&Lookup::Id(id)).await?;
    Ok(Json(Message::deleted("Deleted successfully", removed)))
}

#[cfg(test)]
mod tests {
    use crate::routes::routes::testing::{send, send_raw, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn create_list_retrieve_and_destroy_students() {
        let app = test_app().await;

        let (status, body) = send(&app, Method::GET, "/students-info/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, created) = send(
            &app,
            Method::POST,
            "/students-info/",
            Some(json!({
                "name": "Gita",
                "city": "Biratnagar",
                "roll_no": "4",
                "is_active": "Yes"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["roll_no"], json!(4));

        let (status, fetched) =
            send(&app, Method::GET, &format!("/students-info/{id}/"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, listed) = send(&app, Method::GET, "/students-info/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([created]));

        let (status, body) =
            send(&app, Method::DELETE, &format!("/students-info/{id}/"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], json!(1));

        let (status, _) = send(&app, Method::DELETE, &format!("/students-info/{id}/"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, listed) = send(&app, Method::GET, "/students-info/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn put_requires_all_fields_and_patch_does_not() {
        let app = test_app().await;
        let (_, created) = send(
            &app,
            Method::POST,
            "/students-info/",
            Some(json!({
                "name": "Gita",
                "city": "Biratnagar",
                "roll_no": 4,
                "is_active": "Yes"
            })),
        )
        .await;
        let uri = format!("/students-info/{}/", created["id"]);

        let (status, errors) =
            send(&app, Method::PUT, &uri, Some(json!({ "city": "Dharan" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(errors.get("name").is_some());
        assert!(errors.get("roll_no").is_some());
        assert!(errors.get("is_active").is_some());
        assert!(errors.get("city").is_none());

        let (status, patched) =
            send(&app, Method::PATCH, &uri, Some(json!({ "city": "Dharan" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["city"], json!("Dharan"));
        assert_eq!(patched["name"], json!("Gita"));
        assert_eq!(patched["roll_no"], json!(4));

        let (status, replaced) = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({
                "name": "Gita Rai",
                "city": "Itahari",
                "roll_no": 5,
                "is_active": "No"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(replaced["id"], created["id"]);
        assert_eq!(replaced["name"], json!("Gita Rai"));
        assert_eq!(replaced["is_active"], json!("No"));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = test_app().await;
        let (status, body) = send(&app, Method::GET, "/students-info/999/", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], json!(404));

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/students-info/999/",
            Some(json!({ "city": "Dharan" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_json_not_found() {
        let app = test_app().await;
        for method in [Method::GET, Method::PUT, Method::PATCH, Method::DELETE] {
            let (status, body) = send(
                &app,
                method.clone(),
                "/students-info/abc/",
                Some(json!({ "city": "Dharan" })),
            )
            .await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
            assert_eq!(body["status"], json!(404), "{method}");
        }
    }

    #[tokio::test]
    async fn malformed_json_creates_nothing() {
        let app = test_app().await;
        let (status, body) =
            send_raw(&app, Method::POST, "/students-info/", b"{\"name\": ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], json!(400));

        let (_, listed) = send(&app, Method::GET, "/students-info/", None).await;
        assert_eq!(listed, json!([]));
    }
}
