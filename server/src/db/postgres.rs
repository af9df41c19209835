use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPool};
use sqlx::query::QueryAs;
use sqlx::Postgres;

use super::query::{EventQuery, QueryParam};
use super::EventRepository;
use crate::models::{Category, Event, EventDetail, SearchCriteria};
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_events(&self, query: EventQuery) -> Result<Vec<Event>, AppError> {
        let built = query.build();
        tracing::debug!(sql = %built.sql, params = built.params.len(), "Fetching events");
        let events = bind_params(sqlx::query_as::<_, Event>(&built.sql), &built.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }
}

fn bind_params<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &[QueryParam],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    params.iter().fold(query, |query, param| match param {
        QueryParam::Int(value) => query.bind(*value),
        QueryParam::Text(value) => query.bind(value.clone()),
        QueryParam::Date(value) => query.bind(*value),
    })
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn list_active_events(&self) -> Result<Vec<Event>, AppError> {
        self.fetch_events(EventQuery::active()).await
    }

    async fn get_event_by_id(&self, id: i32) -> Result<Option<EventDetail>, AppError> {
        let built = EventQuery::detail(id).build();
        let event = bind_params(sqlx::query_as::<_, EventDetail>(&built.sql), &built.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn search_events(&self, criteria: &SearchCriteria) -> Result<Vec<Event>, AppError> {
        self.fetch_events(EventQuery::from_criteria(criteria)).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
