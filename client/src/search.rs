use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::api::EventsApi;
use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::models::{Category, Event, SearchCriteria};
use crate::render::format_date;
use crate::store::{EventStats, EventStore};

/// Keyword input shorter than this (after trimming) does not filter.
pub const MIN_KEYWORD_LEN: usize = 2;

pub const EMPTY_KEYWORD_PROMPT: &str = "Please enter a search keyword";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    Keyword,
    Advanced,
}

/// What a settled keyword input should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordTrigger {
    Search(String),
    ShowAll,
    Ignore,
}

pub fn classify_keyword_input(input: &str) -> KeywordTrigger {
    let term = input.trim();
    match term.chars().count() {
        0 => KeywordTrigger::ShowAll,
        n if n >= MIN_KEYWORD_LEN => KeywordTrigger::Search(term.to_string()),
        _ => KeywordTrigger::Ignore,
    }
}

/// The search results region of the page.
#[derive(Debug, Clone, Default)]
pub struct ResultsView {
    pub events: Vec<Event>,
    pub stats: String,
    pub error: Option<String>,
    pub prompt: Option<String>,
}

impl ResultsView {
    pub fn count(&self) -> usize {
        self.events.len()
    }

    pub fn no_results(&self) -> bool {
        self.error.is_none() && self.events.is_empty()
    }

    fn show(&mut self, events: Vec<Event>, stats: String) {
        self.events = events;
        self.stats = stats;
        self.error = None;
        self.prompt = None;
    }
}

/// The category dropdown, with its own error slot.
#[derive(Debug, Clone, Default)]
pub struct CategoryOptions {
    pub categories: Vec<Category>,
    pub error: Option<String>,
}

/// State and actions behind the search page.
///
/// Owns the [`EventStore`]; the keyword mode filters it locally, the advanced
/// mode asks the server. Only one mode is active at a time.
pub struct SearchController {
    api: Arc<dyn EventsApi>,
    store: EventStore,
    mode: SearchMode,
    keyword: String,
    criteria: SearchCriteria,
    results: ResultsView,
    categories: CategoryOptions,
}

impl SearchController {
    pub fn new(api: Arc<dyn EventsApi>) -> Self {
        Self {
            api,
            store: EventStore::new(),
            mode: SearchMode::default(),
            keyword: String::new(),
            criteria: SearchCriteria::default(),
            results: ResultsView::default(),
            categories: CategoryOptions::default(),
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    pub fn categories(&self) -> &CategoryOptions {
        &self.categories
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn stats(&self, today: NaiveDate) -> EventStats {
        self.store.stats(today)
    }

    pub async fn load_all_events(&mut self) {
        self.results.stats = "Loading event data...".to_string();
        match self.api.list_events().await {
            Ok(events) => {
                tracing::info!(count = events.len(), "Loaded events");
                self.store.replace(events);
                let stats = format!("Loaded {} events", self.store.len());
                self.results.show(self.store.all().to_vec(), stats);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load event data");
                self.results.stats = "Event data loading failed".to_string();
                self.results.error = Some(format!("Data loading failed: {e}"));
            }
        }
    }

    pub async fn load_categories(&mut self) {
        match self.api.list_categories().await {
            Ok(categories) => {
                self.categories = CategoryOptions {
                    categories,
                    error: None,
                };
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load categories");
                self.categories.error = Some(format!("Category data loading failed: {e}"));
            }
        }
    }

    /// Switching modes clears the inputs of the mode being left.
    pub fn switch_mode(&mut self, mode: SearchMode) {
        if self.mode == mode {
            return;
        }
        match mode {
            SearchMode::Keyword => self.criteria = SearchCriteria::default(),
            SearchMode::Advanced => self.keyword.clear(),
        }
        self.mode = mode;
    }

    /// Applies a settled keyword input: filter, reset, or nothing. Ignored
    /// outside keyword mode.
    pub fn handle_keyword_input(&mut self, input: &str) -> KeywordTrigger {
        if self.mode != SearchMode::Keyword {
            tracing::trace!("Keyword input outside keyword mode dropped");
            return KeywordTrigger::Ignore;
        }
        self.keyword = input.to_string();
        let trigger = classify_keyword_input(input);
        match &trigger {
            KeywordTrigger::Search(term) => self.perform_keyword_search(term),
            KeywordTrigger::ShowAll => self.show_all_events(),
            KeywordTrigger::Ignore => {}
        }
        trigger
    }

    /// Explicit submit of the keyword form. Returns `false` when only the
    /// empty-term prompt was shown.
    pub fn submit_keyword(&mut self) -> bool {
        let term = self.keyword.trim().to_string();
        if term.is_empty() {
            self.results.prompt = Some(EMPTY_KEYWORD_PROMPT.to_string());
            return false;
        }
        self.perform_keyword_search(&term);
        true
    }

    pub fn perform_keyword_search(&mut self, term: &str) {
        let matches = self.store.keyword_matches(term);
        let stats = format!("Found {} events containing \"{}\"", matches.len(), term);
        self.results.show(matches, stats);
    }

    pub async fn perform_advanced_search(&mut self, criteria: SearchCriteria) {
        self.criteria = criteria.normalized();
        match self.api.search_events(&self.criteria).await {
            Ok(events) => {
                let stats = format!(
                    "Found {} events{}",
                    events.len(),
                    describe_criteria(&self.criteria)
                );
                self.results.show(events, stats);
            }
            Err(e) => {
                tracing::error!(error = %e, "Advanced search failed");
                self.results.error = Some(format!("Search failed: {e}"));
            }
        }
    }

    // Criteria only change in advanced mode, so nothing stale survives into
    // the next advanced search.
    pub fn set_category(&mut self, category: Option<String>) {
        if self.mode == SearchMode::Advanced {
            self.criteria.category = category;
        }
    }

    pub fn set_location(&mut self, location: Option<String>) {
        if self.mode == SearchMode::Advanced {
            self.criteria.location = location;
        }
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        if self.mode == SearchMode::Advanced {
            self.criteria.date = date;
        }
    }

    /// Re-runs the advanced search after a form change, but only in advanced
    /// mode and only when some criterion is set.
    pub async fn on_criteria_changed(&mut self) -> bool {
        if self.mode != SearchMode::Advanced {
            return false;
        }
        let criteria = self.criteria.clone().normalized();
        if criteria.is_empty() {
            return false;
        }
        self.perform_advanced_search(criteria).await;
        true
    }

    pub fn show_upcoming_events(&mut self, today: NaiveDate) {
        let upcoming = self.store.upcoming(today);
        let stats = format!("Found {} upcoming events", upcoming.len());
        self.results.show(upcoming, stats);
    }

    pub fn show_all_events(&mut self) {
        let stats = format!("Showing all {} events", self.store.len());
        self.results.show(self.store.all().to_vec(), stats);
    }

    pub fn clear_filters(&mut self) {
        self.keyword.clear();
        self.criteria = SearchCriteria::default();
        self.show_all_events();
    }

    pub fn related_events(&self, event: &Event, limit: usize) -> Vec<Event> {
        self.store.related_to(event, limit)
    }
}

/// " (Category: Health, Date: November 20, 2025)" or empty.
fn describe_criteria(criteria: &SearchCriteria) -> String {
    let mut parts = Vec::new();
    if let Some(category) = &criteria.category {
        parts.push(format!("Category: {category}"));
    }
    if let Some(location) = &criteria.location {
        parts.push(format!("Location: {location}"));
    }
    if let Some(date) = criteria.date {
        parts.push(format!("Date: {}", format_date(date)));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

/// Debounces the free-text inputs of the search page, one pending slot per
/// input, before handing the settled value to the controller.
pub struct SearchInputDriver {
    controller: Arc<Mutex<SearchController>>,
    keyword: Debouncer,
    location: Debouncer,
}

impl SearchInputDriver {
    pub fn new(controller: Arc<Mutex<SearchController>>, config: &ClientConfig) -> Self {
        Self {
            controller,
            keyword: Debouncer::new(config.keyword_debounce),
            location: Debouncer::new(config.location_debounce),
        }
    }

    /// Drops any input still waiting out its delay before switching.
    pub async fn switch_mode(&mut self, mode: SearchMode) {
        self.keyword.cancel();
        self.location.cancel();
        self.controller.lock().await.switch_mode(mode);
    }

    pub fn on_keyword_input(&mut self, input: impl Into<String>) -> JoinHandle<bool> {
        let controller = self.controller.clone();
        let input = input.into();
        self.keyword.schedule(async move {
            controller.lock().await.handle_keyword_input(&input);
        })
    }

    pub fn on_location_input(&mut self, input: impl Into<String>) -> JoinHandle<bool> {
        let controller = self.controller.clone();
        let input = input.into();
        self.location.schedule(async move {
            let mut controller = controller.lock().await;
            controller.set_location(Some(input));
            controller.on_criteria_changed().await;
        })
    }
}
