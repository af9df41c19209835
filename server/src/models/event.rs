use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An event row joined with the names of its organisation and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub full_description: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub location: String,
    pub venue_details: Option<String>,
    pub is_free: bool,
    pub ticket_price: Decimal,
    pub fundraising_goal: Decimal,
    pub current_amount: Decimal,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub organisation_id: Option<i32>,
    pub category_id: Option<i32>,
    pub organisation_name: Option<String>,
    pub category_name: Option<String>,
}

/// The detail view of an event, carrying the owning organisation's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EventDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub mission_statement: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub organisation_description: Option<String>,
}

/// Optional filters for an event search. Absent fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.location.is_none() && self.date.is_none()
    }
}
