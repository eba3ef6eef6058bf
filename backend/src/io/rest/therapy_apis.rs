//! # REST API for Therapies
//!
//! Appointment CRUD, calendar export links and the agenda views.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{DeleteResponse, MonthOverviewRequest, RecordId, SaveTherapyRequest};
use tracing::info;

use super::{error_response, not_found};
use crate::domain::TrackerError;
use crate::AppState;

/// Create a router for therapy related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_therapies).post(create_therapy))
        .route(
            "/:id",
            get(get_therapy).put(update_therapy).delete(delete_therapy),
        )
        .route("/:id/calendar-link", get(get_calendar_link))
}

/// Routes for the agenda views
pub fn agenda_router() -> Router<AppState> {
    Router::new()
        .route("/week", get(get_weekly_agenda))
        .route("/day/:date", get(get_day))
        .route("/month", get(get_month))
}

pub async fn list_therapies(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/therapies");
    Json(state.therapy_service.list_therapies().await)
}

pub async fn get_therapy(State(state): State<AppState>, Path(id): Path<RecordId>) -> impl IntoResponse {
    info!("GET /api/therapies/{}", id);

    match state.therapy_service.get_therapy(id).await {
        Some(therapy) => (StatusCode::OK, Json(therapy)).into_response(),
        None => not_found(TrackerError::TherapyNotFound(id)),
    }
}

pub async fn create_therapy(
    State(state): State<AppState>,
    Json(request): Json<SaveTherapyRequest>,
) -> impl IntoResponse {
    info!("POST /api/therapies - request: {:?}", request);

    match state.therapy_service.create_therapy(request).await {
        Ok(therapy) => (StatusCode::CREATED, Json(therapy)).into_response(),
        Err(e) => error_response("create therapy", e),
    }
}

pub async fn update_therapy(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(request): Json<SaveTherapyRequest>,
) -> impl IntoResponse {
    info!("PUT /api/therapies/{} - request: {:?}", id, request);

    match state.therapy_service.update_therapy(id, request).await {
        Ok(therapy) => (StatusCode::OK, Json(therapy)).into_response(),
        Err(e) => error_response("update therapy", e),
    }
}

pub async fn delete_therapy(State(state): State<AppState>, Path(id): Path<RecordId>) -> impl IntoResponse {
    info!("DELETE /api/therapies/{}", id);

    match state.therapy_service.delete_therapy(id).await {
        Ok(therapy) => {
            let response = DeleteResponse {
                success_message: format!("Therapy '{}' deleted", therapy.specialty),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("delete therapy", e),
    }
}

/// Google Calendar template link for one appointment
pub async fn get_calendar_link(State(state): State<AppState>, Path(id): Path<RecordId>) -> impl IntoResponse {
    info!("GET /api/therapies/{}/calendar-link", id);

    let prefix = state.config.calendar_title_prefix.clone();
    match state.therapy_service.calendar_link(id, &prefix).await {
        Ok(link) => (StatusCode::OK, Json(link)).into_response(),
        Err(e) => error_response("build calendar link", e),
    }
}

pub async fn get_weekly_agenda(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/agenda/week");
    Json(state.therapy_service.weekly_agenda().await)
}

pub async fn get_day(State(state): State<AppState>, Path(date): Path<String>) -> impl IntoResponse {
    info!("GET /api/agenda/day/{}", date);

    match state.therapy_service.therapies_on(&date).await {
        Ok(day) => (StatusCode::OK, Json(day)).into_response(),
        Err(e) => error_response("list therapies for day", e),
    }
}

pub async fn get_month(
    State(state): State<AppState>,
    Query(query): Query<MonthOverviewRequest>,
) -> impl IntoResponse {
    info!("GET /api/agenda/month - query: {:?}", query);

    match state.therapy_service.month_overview(query.year, query.month).await {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(e) => error_response("build month overview", e),
    }
}
