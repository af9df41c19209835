use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::Event;

/// Every event fetched from the API, in server order (earliest first).
///
/// Loaded once per page and then filtered locally; render functions borrow it
/// rather than reaching for shared state.
#[derive(Debug, Default, Clone)]
pub struct EventStore {
    events: Vec<Event>,
    loaded: bool,
}

/// Aggregate figures shown in the page's live statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventStats {
    pub total_events: usize,
    pub upcoming_events: usize,
    pub total_raised: Decimal,
    pub total_goal: Decimal,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, events: Vec<Event>) {
        self.events = events;
        self.loaded = true;
    }

    pub fn all(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Events whose title, description, category or location contains `term`,
    /// ignoring case.
    pub fn keyword_matches(&self, term: &str) -> Vec<Event> {
        let needle = term.to_lowercase();
        let contains = |field: &str| field.to_lowercase().contains(&needle);

        self.events
            .iter()
            .filter(|event| {
                contains(&event.title)
                    || contains(&event.description)
                    || event.category_name.as_deref().is_some_and(contains)
                    || contains(&event.location)
            })
            .cloned()
            .collect()
    }

    pub fn upcoming(&self, today: NaiveDate) -> Vec<Event> {
        self.events
            .iter()
            .filter(|event| event.is_active && event.event_date >= today)
            .cloned()
            .collect()
    }

    /// Other active events in the same category, at most `limit` of them.
    pub fn related_to(&self, event: &Event, limit: usize) -> Vec<Event> {
        let Some(category_id) = event.category_id else {
            return Vec::new();
        };
        self.events
            .iter()
            .filter(|other| {
                other.is_active && other.id != event.id && other.category_id == Some(category_id)
            })
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn stats(&self, today: NaiveDate) -> EventStats {
        EventStats {
            total_events: self.events.len(),
            upcoming_events: self.events.iter().filter(|e| e.event_date >= today).count(),
            total_raised: self.events.iter().map(|e| e.current_amount).sum(),
            total_goal: self.events.iter().map(|e| e.fundraising_goal).sum(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn store() -> EventStore {
        let mut store = EventStore::new();
        store.replace(catalogue());
        store
    }

    fn ids(events: &[Event]) -> Vec<i32> {
        events.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_keyword_matches_every_searchable_field() {
        let store = store();
        assert_eq!(ids(&store.keyword_matches("GALA")), vec![2]);
        assert_eq!(ids(&store.keyword_matches("health")), vec![3]);
        assert_eq!(ids(&store.keyword_matches("sydney")), vec![1, 4]);
        assert_eq!(ids(&store.keyword_matches("join us")), vec![1, 2, 3, 4]);
        assert!(store.keyword_matches("opera").is_empty());
    }

    #[test]
    fn test_keyword_tolerates_missing_category() {
        let mut events = catalogue();
        events[0].category_name = None;
        let mut store = EventStore::new();
        store.replace(events);
        assert_eq!(ids(&store.keyword_matches("sport")), Vec::<i32>::new());
    }

    #[test]
    fn test_upcoming_includes_today_and_skips_inactive() {
        let mut events = catalogue();
        events[3].is_active = false;
        let mut store = EventStore::new();
        store.replace(events);
        assert_eq!(ids(&store.upcoming(day(10))), vec![2, 3]);
    }

    #[test]
    fn test_related_events_share_category() {
        let mut events = catalogue();
        events.push(event(5, "Gala Encore", day(28), "Gala", "Perth"));
        let mut store = EventStore::new();
        store.replace(events);

        let gala = store.all()[1].clone();
        assert_eq!(ids(&store.related_to(&gala, 3)), vec![5]);
        assert!(store.related_to(&gala, 0).is_empty());
    }

    #[test]
    fn test_stats_sum_amounts() {
        let stats = store().stats(day(12));
        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.upcoming_events, 2);
        assert_eq!(stats.total_raised, Decimal::new(1000, 0));
        assert_eq!(stats.total_goal, Decimal::new(4000, 0));
    }

    #[test]
    fn test_new_store_is_not_loaded() {
        let store = EventStore::new();
        assert!(!store.is_loaded());
        assert!(store.is_empty());
    }
}
