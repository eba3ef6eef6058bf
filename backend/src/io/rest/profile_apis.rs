use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::UpdateProfileRequest;
use tracing::info;

use super::error_response;
use crate::AppState;

/// Create a router for the caregiver profile
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).put(update_profile))
        .route("/age", get(get_age))
}

pub async fn get_profile(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/profile");
    Json(state.profile_service.get_profile().await)
}

pub async fn update_profile(
    State(state): State<AppState>,
    Json(request): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    // Photos may be large data URLs, keep them out of the log
    info!("PUT /api/profile - baby: {}, birth date: {:?}", request.baby_name, request.birth_date);

    match state.profile_service.update_profile(request).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => error_response("update profile", e),
    }
}

pub async fn get_age(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/profile/age");
    Json(state.profile_service.age().await)
}
