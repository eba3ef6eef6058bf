//! # REST API Interface Layer
//!
//! HTTP endpoints under `/api`. Handlers log the request, call one service
//! method and map the outcome:
//!
//! - unknown id or dose: `404 Not Found`
//! - malformed time, date or month: `400 Bad Request`
//! - anything else (storage failures): `500 Internal Server Error`
//!
//! Error bodies are the plain error message.

pub mod dashboard_apis;
pub mod medication_apis;
pub mod professional_apis;
pub mod profile_apis;
pub mod therapy_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::domain::TrackerError;

/// Status code for a failed service call
pub fn status_for(err: &anyhow::Error) -> StatusCode {
    match err.downcast_ref::<TrackerError>() {
        Some(e) if e.is_not_found() => StatusCode::NOT_FOUND,
        Some(_) => StatusCode::BAD_REQUEST,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed service call and turn it into a response
pub fn error_response(action: &str, err: anyhow::Error) -> Response {
    let status = status_for(&err);
    error!("Failed to {}: {:#}", action, err);

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        (status, format!("Error trying to {}", action)).into_response()
    } else {
        (status, err.to_string()).into_response()
    }
}

/// Response for a lookup that found nothing
pub fn not_found(err: TrackerError) -> Response {
    (StatusCode::NOT_FOUND, err.to_string()).into_response()
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use chrono::NaiveDate;
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::domain::FixedClock;
    use crate::storage::DbConnection;
    use crate::{create_router, AppState};

    /// Router over an in-memory database with the clock frozen at
    /// 2026-10-16 (a Friday) at `hour:minute`
    pub async fn test_app(hour: u32, minute: u32) -> Router {
        let db = DbConnection::in_memory().await.unwrap();
        let clock = FixedClock::at(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(), hour, minute).unwrap();
        let state = AppState::build(Arc::new(db), AppConfig::default(), Arc::new(clock))
            .await
            .unwrap();
        create_router(state).unwrap()
    }

    pub async fn send(app: &Router, method: Method, uri: &str, body: Option<impl Serialize>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    pub async fn get_json<T: DeserializeOwned>(app: &Router, uri: &str) -> T {
        let (status, body) = send(app, Method::GET, uri, None::<()>).await;
        assert_eq!(status, StatusCode::OK, "GET {} -> {}", uri, String::from_utf8_lossy(&body));
        serde_json::from_slice(&body).unwrap()
    }

    pub async fn post_json<T: DeserializeOwned>(app: &Router, uri: &str, body: impl Serialize) -> T {
        let (status, bytes) = send(app, Method::POST, uri, Some(body)).await;
        assert!(status.is_success(), "POST {} -> {} {}", uri, status, String::from_utf8_lossy(&bytes));
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&TrackerError::MedicationNotFound(1).into()), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&TrackerError::InvalidDate("x".to_string()).into()), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&anyhow::anyhow!("disk full")), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_context_keeps_domain_error() {
        let err = anyhow::Error::from(TrackerError::TherapyNotFound(3)).context("while exporting");
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);
    }
}
