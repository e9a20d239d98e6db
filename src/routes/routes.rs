//! Defines routes for every record endpoint family.
//!
//! ## Structure
//! - **Generic views** (`Student`)
//!   - `GET    /students-info/`       — list
//!   - `POST   /students-info/`       — create
//!   - `GET    /students-info/{id}/`  — retrieve
//!   - `PUT    /students-info/{id}/`  — full update
//!   - `PATCH  /students-info/{id}/`  — partial update
//!   - `DELETE /students-info/{id}/`  — destroy
//!
//! - **Function view** (`UserInfo`): id in the path for GET/DELETE, in the
//!   body for PUT/PATCH.
//!
//! - **Hand-dispatched endpoint** (`CurdStudent`): `/student-api/`, keys in
//!   the body for every verb.
//!
//! - **Registration**: `POST /register/`.

use crate::{
    handlers::{
        generic_handlers,
        health_handlers::{healthz, readyz},
        register_handlers::register_user,
        student_api_handlers::{add_student, fetch_students, remove_student, update_student},
        user_info_handlers::{
            create_user, delete_user, get_user, list_users, patch_user, replace_user,
        },
    },
    models::student::Student,
    services::record_service::RecordService,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build and return the router for all record routes.
///
/// The router carries shared state (`RecordService`) to all handlers.
pub fn routes() -> Router<RecordService> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route(
            "/students-info/",
            get(generic_handlers::list::<Student>).post(generic_handlers::create::<Student>),
        )
        .route(
            "/students-info/{id}/",
            get(generic_handlers::retrieve::<Student>)
                .put(generic_handlers::update::<Student>)
                .patch(generic_handlers::partial_update::<Student>)
                .delete(generic_handlers::destroy::<Student>),
        )
        .route(
            "/user-info/",
            get(list_users)
                .post(create_user)
                .put(replace_user)
                .patch(patch_user),
        )
        .route("/user-info/{id}/", get(get_user).delete(delete_user))
        .route(
            "/student-api/",
            get(fetch_students)
                .post(add_student)
                .put(update_student)
                .delete(remove_student),
        )
        .route("/register/", post(register_user))
}

#[cfg(test)]
pub mod testing {
    //! Drives the router in-process against an in-memory database.

    use super::routes;
    use crate::{db::test_pool, services::record_service::RecordService};
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode},
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    pub async fn test_app() -> Router {
        routes().with_state(RecordService::new(Arc::new(test_pool().await)))
    }

    /// Send one request and decode the JSON response (`Null` when empty).
    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let body = match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        };
        dispatch(app, method, uri, body).await
    }

    /// Like [`send`], but with the body bytes exactly as given.
    pub async fn send_raw(
        app: &Router,
        method: Method,
        uri: &str,
        body: &'static [u8],
    ) -> (StatusCode, Value) {
        dispatch(app, method, uri, Body::from(body)).await
    }

    async fn dispatch(app: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}
