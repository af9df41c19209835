use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use charity_events_server::config::Config;
use charity_events_server::db::{create_pool, EventRepository, PgEventRepository};
use charity_events_server::routes::create_app;
use charity_events_server::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();

    let pool = create_pool(&config)
        .await
        .expect("Failed to connect to database");

    tracing::info!(
        max_connections = config.db.pool_max,
        "Successfully connected to database"
    );

    if config.run_migrations {
        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        tracing::info!("Migrations run successfully");
    }

    let repository = PgEventRepository::new(pool);
    repository
        .ping()
        .await
        .expect("Database did not answer a test query");

    let app = create_app(AppState::new(Arc::new(repository)), &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Charity Events API running at http://{}", addr);
    tracing::info!("  GET /api/events         - all active events");
    tracing::info!("  GET /api/events/search  - search by category, location, date");
    tracing::info!("  GET /api/events/:id     - event details");
    tracing::info!("  GET /api/categories     - all categories");

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
