use crate::dtos::health::RootResponse;
use axum::Json;

/// Welcome message for API consumers
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = RootResponse)
    ),
    tag = "Health"
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Bienvenido a Platziflix API".to_owned(),
    })
}
