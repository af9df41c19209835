//! In-memory catalogue with the same visibility and ordering rules as
//! [`super::PgEventRepository`], used to drive handler tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::EventRepository;
use crate::models::{Category, Event, EventDetail, Organisation, SearchCriteria};
use crate::utils::error::AppError;

#[derive(Default)]
pub struct InMemoryEventRepository {
    events: Vec<Event>,
    organisations: Vec<Organisation>,
    categories: Vec<Category>,
    failing: bool,
}

impl InMemoryEventRepository {
    pub fn new(events: Vec<Event>, organisations: Vec<Organisation>, categories: Vec<Category>) -> Self {
        Self {
            events,
            organisations,
            categories,
            failing: false,
        }
    }

    /// Every call fails as if the database were unreachable.
    pub fn unavailable() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing {
            return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn joined(&self, event: &Event) -> Event {
        let mut event = event.clone();
        event.organisation_name = self
            .organisation(event.organisation_id)
            .map(|o| o.name.clone());
        event.category_name = event
            .category_id
            .and_then(|id| self.categories.iter().find(|c| c.id == id))
            .map(|c| c.name.clone());
        event
    }

    fn organisation(&self, id: Option<i32>) -> Option<&Organisation> {
        id.and_then(|id| self.organisations.iter().find(|o| o.id == id))
    }

    fn active_sorted(&self) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.is_active)
            .map(|e| self.joined(e))
            .collect();
        events.sort_by_key(|e| (e.event_date, e.id));
        events
    }
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn list_active_events(&self) -> Result<Vec<Event>, AppError> {
        self.check()?;
        Ok(self.active_sorted())
    }

    async fn get_event_by_id(&self, id: i32) -> Result<Option<EventDetail>, AppError> {
        self.check()?;
        let Some(event) = self.events.iter().find(|e| e.id == id && e.is_active) else {
            return Ok(None);
        };
        let organisation = self.organisation(event.organisation_id);
        Ok(Some(EventDetail {
            event: self.joined(event),
            mission_statement: organisation.and_then(|o| o.mission_statement.clone()),
            contact_email: organisation.and_then(|o| o.contact_email.clone()),
            contact_phone: organisation.and_then(|o| o.contact_phone.clone()),
            address: organisation.and_then(|o| o.address.clone()),
            organisation_description: organisation.and_then(|o| o.description.clone()),
        }))
    }

    async fn search_events(&self, criteria: &SearchCriteria) -> Result<Vec<Event>, AppError> {
        self.check()?;
        Ok(self
            .active_sorted()
            .into_iter()
            .filter(|e| {
                criteria
                    .category
                    .as_deref()
                    .map_or(true, |c| contains_ci(e.category_name.as_deref(), c))
            })
            .filter(|e| {
                criteria
                    .location
                    .as_deref()
                    .map_or(true, |l| contains_ci(Some(&e.location), l))
            })
            .filter(|e| criteria.date.map_or(true, |d| e.event_date == d))
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.check()?;
        let mut categories = self.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

pub fn event(id: i32, title: &str, date: NaiveDate, category_id: i32, location: &str) -> Event {
    Event {
        id,
        title: title.to_string(),
        description: format!("{title} description"),
        full_description: None,
        event_date: date,
        event_time: None,
        location: location.to_string(),
        venue_details: None,
        is_free: false,
        ticket_price: Decimal::new(2500, 2),
        fundraising_goal: Decimal::new(10_000, 0),
        current_amount: Decimal::new(2_500, 0),
        image_url: Some(format!("/images/event-{id}.jpg")),
        is_active: true,
        organisation_id: Some(1),
        category_id: Some(category_id),
        organisation_name: None,
        category_name: None,
    }
}

/// A small catalogue: two health events, a gala, and an inactive health event.
pub fn sample_catalogue() -> InMemoryEventRepository {
    let date = |d| NaiveDate::from_ymd_opt(2025, 11, d).unwrap();

    let mut hidden = event(4, "Cancelled Health Walk", date(1), 1, "Sydney");
    hidden.is_active = false;

    InMemoryEventRepository::new(
        vec![
            event(3, "Charity Gala", date(5), 2, "Melbourne Town Hall"),
            event(1, "Fun Run for Heart Health", date(20), 1, "Sydney Olympic Park"),
            event(2, "Mental Health Forum", date(5), 3, "Brisbane"),
            hidden,
        ],
        vec![Organisation {
            id: 1,
            name: "Hope Foundation".to_string(),
            mission_statement: Some("Helping communities thrive".to_string()),
            contact_email: Some("info@hope.org".to_string()),
            contact_phone: None,
            address: Some("1 George St, Sydney".to_string()),
            description: Some("A local charity".to_string()),
        }],
        vec![
            Category { id: 1, name: "Health & Wellness".to_string() },
            Category { id: 2, name: "Gala Dinner".to_string() },
            Category { id: 3, name: "Mental Health".to_string() },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inactive_events_never_listed_or_found() {
        let repo = sample_catalogue();
        let listed = repo.list_active_events().await.unwrap();
        assert!(listed.iter().all(|e| e.is_active));
        assert!(listed.iter().all(|e| e.id != 4));

        let searched = repo
            .search_events(&SearchCriteria {
                category: Some("health".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(searched.iter().all(|e| e.id != 4));
        assert!(repo.get_event_by_id(4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_listing_is_ordered_and_idempotent() {
        let repo = sample_catalogue();
        let first = repo.list_active_events().await.unwrap();
        let second = repo.list_active_events().await.unwrap();
        assert_eq!(first, second);
        let ids: Vec<i32> = first.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_empty_search_matches_listing() {
        let repo = sample_catalogue();
        assert_eq!(
            repo.search_events(&SearchCriteria::default()).await.unwrap(),
            repo.list_active_events().await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_category_search_is_case_insensitive() {
        let repo = sample_catalogue();
        let results = repo
            .search_events(&SearchCriteria {
                category: Some("HEALTH".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<i32> = results.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_detail_carries_organisation_profile() {
        let repo = sample_catalogue();
        let detail = repo.get_event_by_id(1).await.unwrap().unwrap();
        assert_eq!(detail.event.organisation_name.as_deref(), Some("Hope Foundation"));
        assert_eq!(detail.event.category_name.as_deref(), Some("Health & Wellness"));
        assert_eq!(detail.contact_email.as_deref(), Some("info@hope.org"));
    }
}
