use crate::{dtos::health::HealthResponse, state::AppState};
use axum::{Json, extract::State};
use database::services::course::CourseService;
use log::warn;

/// Reports service status along with database reachability
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let courses_count = match CourseService::count_courses(&state.db).await {
        Ok(count) => Some(count),
        Err(e) => {
            warn!("Health check could not reach the database: {e}");
            None
        }
    };

    let database = courses_count.is_some();
    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" }.to_owned(),
        service: "Platziflix API".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        database,
        courses_count,
    })
}
