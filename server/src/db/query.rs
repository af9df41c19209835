//! Typed construction of the event SELECT statements.
//!
//! Every statement is a fixed skeleton (projection, joins, ordering) plus a
//! list of [`EventFilter`]s. Filters render to positional placeholders and the
//! values travel separately as [`QueryParam`]s, so user input never becomes
//! part of the SQL text.

use chrono::NaiveDate;

use crate::models::SearchCriteria;

const SUMMARY_COLUMNS: &str = "e.id, e.title, e.description, e.full_description, \
     e.event_date, e.event_time, e.location, e.venue_details, e.is_free, \
     e.ticket_price, e.fundraising_goal, e.current_amount, e.image_url, \
     e.is_active, e.organisation_id, e.category_id, \
     o.name AS organisation_name, c.name AS category_name";

const DETAIL_COLUMNS: &str = "o.mission_statement, o.contact_email, o.contact_phone, \
     o.address, o.description AS organisation_description";

const JOINS: &str = "FROM events e \
     LEFT JOIN organisations o ON e.organisation_id = o.id \
     LEFT JOIN categories c ON e.category_id = c.id";

const ORDER: &str = "ORDER BY e.event_date ASC, e.id ASC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Summary,
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    ActiveOnly,
    Id(i32),
    CategoryContains(String),
    LocationContains(String),
    OnDate(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    Int(i32),
    Text(String),
    Date(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

#[derive(Debug, Clone)]
pub struct EventQuery {
    projection: Projection,
    filters: Vec<EventFilter>,
}

impl EventQuery {
    /// Active events in list form, no further filtering.
    pub fn active() -> Self {
        Self {
            projection: Projection::Summary,
            filters: vec![EventFilter::ActiveOnly],
        }
    }

    /// A single active event with its organisation profile.
    pub fn detail(id: i32) -> Self {
        Self {
            projection: Projection::Detail,
            filters: vec![EventFilter::Id(id), EventFilter::ActiveOnly],
        }
    }

    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        let mut query = Self::active();
        if let Some(category) = &criteria.category {
            query = query.filter(EventFilter::CategoryContains(category.clone()));
        }
        if let Some(location) = &criteria.location {
            query = query.filter(EventFilter::LocationContains(location.clone()));
        }
        if let Some(date) = criteria.date {
            query = query.filter(EventFilter::OnDate(date));
        }
        query
    }

    pub fn filter(mut self, filter: EventFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn build(&self) -> BuiltQuery {
        let mut params = Vec::new();
        let mut conditions = Vec::with_capacity(self.filters.len());

        for filter in &self.filters {
            let condition = match filter {
                EventFilter::ActiveOnly => "e.is_active = TRUE".to_string(),
                EventFilter::Id(id) => {
                    params.push(QueryParam::Int(*id));
                    format!("e.id = ${}", params.len())
                }
                EventFilter::CategoryContains(text) => {
                    params.push(QueryParam::Text(contains_pattern(text)));
                    format!("c.name ILIKE ${} ESCAPE '\\'", params.len())
                }
                EventFilter::LocationContains(text) => {
                    params.push(QueryParam::Text(contains_pattern(text)));
                    format!("e.location ILIKE ${} ESCAPE '\\'", params.len())
                }
                EventFilter::OnDate(date) => {
                    params.push(QueryParam::Date(*date));
                    format!("e.event_date = ${}", params.len())
                }
            };
            conditions.push(condition);
        }

        let mut sql = match self.projection {
            Projection::Summary => format!("SELECT {SUMMARY_COLUMNS} {JOINS}"),
            Projection::Detail => format!("SELECT {SUMMARY_COLUMNS}, {DETAIL_COLUMNS} {JOINS}"),
        };
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        if self.projection == Projection::Summary {
            sql.push(' ');
            sql.push_str(ORDER);
        }

        BuiltQuery { sql, params }
    }
}

/// Wraps user text in `%...%`, escaping LIKE metacharacters so they match literally.
pub fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
