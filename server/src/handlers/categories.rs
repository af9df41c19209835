use axum::extract::State;
use axum::response::Response;

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success_list;

pub async fn list_categories(State(state): State<AppState>) -> Result<Response, AppError> {
    let categories = state.events.list_categories().await?;
    Ok(success_list(categories))
}
