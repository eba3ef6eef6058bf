use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{CreateProfessionalRequest, DeleteResponse, RecordId};
use tracing::info;

use super::{error_response, not_found};
use crate::domain::TrackerError;
use crate::AppState;

/// Create a router for the care team contact list
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_professionals).post(create_professional))
        .route("/:id", get(get_professional).delete(delete_professional))
}

pub async fn list_professionals(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/professionals");
    Json(state.professional_service.list_professionals().await)
}

pub async fn get_professional(State(state): State<AppState>, Path(id): Path<RecordId>) -> impl IntoResponse {
    info!("GET /api/professionals/{}", id);

    match state.professional_service.get_professional(id).await {
        Some(professional) => (StatusCode::OK, Json(professional)).into_response(),
        None => not_found(TrackerError::ProfessionalNotFound(id)),
    }
}

pub async fn create_professional(
    State(state): State<AppState>,
    Json(request): Json<CreateProfessionalRequest>,
) -> impl IntoResponse {
    info!("POST /api/professionals - request: {:?}", request);

    match state.professional_service.create_professional(request).await {
        Ok(professional) => (StatusCode::CREATED, Json(professional)).into_response(),
        Err(e) => error_response("create professional", e),
    }
}

pub async fn delete_professional(State(state): State<AppState>, Path(id): Path<RecordId>) -> impl IntoResponse {
    info!("DELETE /api/professionals/{}", id);

    match state.professional_service.delete_professional(id).await {
        Ok(professional) => {
            let response = DeleteResponse {
                success_message: format!("Professional '{}' deleted", professional.name),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("delete professional", e),
    }
}
