use axum::extract::State;
use axum::response::Response;
use serde::Serialize;

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub mod categories;
pub mod events;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
    database: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> Result<Response, AppError> {
    state.events.ping().await?;

    let payload = HealthPayload {
        status: "ok",
        service: "charity-events-api",
        database: "up",
    };

    Ok(success(payload))
}
