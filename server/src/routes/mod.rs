use std::path::Path;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, with_security_headers, Config};
use crate::handlers::{categories, events, health_check};
use crate::state::AppState;

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_events))
        .route("/events/search", get(events::search_events))
        .route("/events/:id", get(events::get_event))
        .route("/categories", get(categories::list_categories))
}

pub fn create_routes(state: AppState, static_dir: Option<&Path>, include_hsts: bool) -> Router {
    let mut router = Router::new()
        .nest("/api", api_routes())
        .route("/health", get(health_check))
        .with_state(state);

    if let Some(dir) = static_dir {
        tracing::info!("Serving static files from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    with_security_headers(router, include_hsts).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(create_cors_layer()),
    )
}

pub fn create_app(state: AppState, config: &Config) -> Router {
    create_routes(state, config.static_dir.as_deref(), config.production)
}
