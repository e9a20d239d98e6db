use crate::{
    errors::AppError,
    handlers::payload::{Message, parse_payload},
    models::registration::Registration,
    services::record_service::RecordService,
};
use axum::{Json, body::Bytes, extract::State, http::StatusCode};

/// `POST /register/`
pub async fn register_user(
    State(service): State<RecordService>,
    body: Bytes,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let payload = parse_payload(&body)?;
    service.create::<Registration>(&payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(Message::new("Successfully registered")),
    ))
}

#[cfg(test)]
mod tests {
    use crate::routes::routes::testing::{send, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn registers_a_valid_user() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/register/",
            Some(json!({ "name": "janak", "email": "janak@gmail.com", "city": "Pokhara" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "msg": "Successfully registered" }));
    }

    #[tokio::test]
    async fn reports_every_invalid_field() {
        let app = test_app().await;
        let (status, errors) = send(
            &app,
            Method::POST,
            "/register/",
            Some(json!({
                "name": "a name that is far too long",
                "email": "not-an-email",
                "city": "Pokhara"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            errors,
            json!({
                "email": ["Enter a valid email address."],
                "name": ["Ensure this field has no more than 20 characters."]
            })
        );
    }

    #[tokio::test]
    async fn only_post_is_routed() {
        let app = test_app().await;
        let (status, _) = send(&app, Method::GET, "/register/", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
