//! # REST API for Medications
//!
//! Medication CRUD, dose toggling and the next-dose lookup.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::{DeleteResponse, RecordId, SaveMedicationRequest, ToggleDoseRequest};
use tracing::info;

use super::{error_response, not_found};
use crate::domain::TrackerError;
use crate::AppState;

/// Create a router for medication related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_medications).post(create_medication))
        .route(
            "/:id",
            get(get_medication).put(update_medication).delete(delete_medication),
        )
        .route("/:id/toggle", post(toggle_dose))
}

/// Routes for the dose schedule
pub fn schedule_router() -> Router<AppState> {
    Router::new().route("/next", get(get_next_medication))
}

pub async fn list_medications(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/medications");
    Json(state.medication_service.list_medications().await)
}

pub async fn get_medication(State(state): State<AppState>, Path(id): Path<RecordId>) -> impl IntoResponse {
    info!("GET /api/medications/{}", id);

    match state.medication_service.get_medication(id).await {
        Some(medication) => (StatusCode::OK, Json(medication)).into_response(),
        None => not_found(TrackerError::MedicationNotFound(id)),
    }
}

pub async fn create_medication(
    State(state): State<AppState>,
    Json(request): Json<SaveMedicationRequest>,
) -> impl IntoResponse {
    info!("POST /api/medications - request: {:?}", request);

    match state.medication_service.create_medication(request).await {
        Ok(medication) => (StatusCode::CREATED, Json(medication)).into_response(),
        Err(e) => error_response("create medication", e),
    }
}

pub async fn update_medication(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(request): Json<SaveMedicationRequest>,
) -> impl IntoResponse {
    info!("PUT /api/medications/{} - request: {:?}", id, request);

    match state.medication_service.update_medication(id, request).await {
        Ok(medication) => (StatusCode::OK, Json(medication)).into_response(),
        Err(e) => error_response("update medication", e),
    }
}

pub async fn delete_medication(State(state): State<AppState>, Path(id): Path<RecordId>) -> impl IntoResponse {
    info!("DELETE /api/medications/{}", id);

    match state.medication_service.delete_medication(id).await {
        Ok(medication) => {
            let response = DeleteResponse {
                success_message: format!("Medication '{}' deleted", medication.name),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("delete medication", e),
    }
}

/// Mark a dose as given, or undo it
pub async fn toggle_dose(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(request): Json<ToggleDoseRequest>,
) -> impl IntoResponse {
    info!("POST /api/medications/{}/toggle - time: {}", id, request.time);

    match state.medication_service.toggle_dose(id, request).await {
        Ok(medication) => (StatusCode::OK, Json(medication)).into_response(),
        Err(e) => error_response("toggle dose", e),
    }
}

pub async fn get_next_medication(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/schedule/next");
    Json(state.medication_service.next_medication().await)
}
