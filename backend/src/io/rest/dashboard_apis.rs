use axum::{extract::State, response::{IntoResponse, Json}, routing::get, Router};
use tracing::info;

use crate::AppState;

/// Create a router for the home screen summary
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

pub async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/dashboard");
    Json(state.dashboard_service.dashboard().await)
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::{get_json, post_json, test_app};
    use serde_json::json;
    use shared::{DashboardResponse, Medication, Therapy};

    #[tokio::test]
    async fn test_dashboard_route() {
        let app = test_app(8, 10).await;

        let empty: DashboardResponse = get_json(&app, "/api/dashboard").await;
        assert!(empty.next_medication.is_none());
        assert!(empty.weekly_agenda.is_empty());

        let _: Medication = post_json(
            &app,
            "/api/medications",
            json!({"name": "Ferro", "dose": "1 ml", "times": ["08:00", "20:00"]}),
        )
        .await;
        let _: Therapy = post_json(
            &app,
            "/api/therapies",
            json!({"specialty": "Fisioterapia", "date": "2026-10-19", "time": "10:00"}),
        )
        .await;

        let dashboard: DashboardResponse = get_json(&app, "/api/dashboard").await;
        // Ten minutes overdue still wins over the evening dose
        let next = dashboard.next_medication.unwrap();
        assert_eq!(next.time.to_string(), "08:00");
        assert_eq!(next.minutes_until, -10);
        assert_eq!(dashboard.weekly_agenda[0].display_date, "seg., 19/10");
        assert_eq!(dashboard.medication_count, 1);
        assert_eq!(dashboard.therapy_count, 1);
    }
}
