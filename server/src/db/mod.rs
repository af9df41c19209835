use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;
use crate::models::{Category, Event, EventDetail, SearchCriteria};
use crate::utils::error::AppError;

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod query;

pub use postgres::PgEventRepository;

const ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Read access to the events catalogue. Only active events are ever returned.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Active events with organisation and category names, earliest first.
    async fn list_active_events(&self) -> Result<Vec<Event>, AppError>;

    /// `Ok(None)` when no active event has this id.
    async fn get_event_by_id(&self, id: i32) -> Result<Option<EventDetail>, AppError>;

    /// Active events narrowed by every criterion that is present, earliest first.
    async fn search_events(&self, criteria: &SearchCriteria) -> Result<Vec<Event>, AppError>;

    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    let options = config.connect_options()?;
    PgPoolOptions::new()
        .max_connections(config.db.pool_max)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .connect_with(options)
        .await
}
