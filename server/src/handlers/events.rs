use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::SearchCriteria;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{search_results, success, success_list};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw query string of `/events/search`. Blank values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub category: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
}

impl TryFrom<SearchParams> for SearchCriteria {
    type Error = AppError;

    fn try_from(params: SearchParams) -> Result<Self, Self::Error> {
        let date = match non_blank(params.date) {
            Some(raw) => Some(NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|_| {
                AppError::ValidationError(format!("Invalid date '{raw}', expected YYYY-MM-DD"))
            })?),
            None => None,
        };

        Ok(SearchCriteria {
            category: non_blank(params.category),
            location: non_blank(params.location),
            date,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state.events.list_active_events().await?;
    Ok(success_list(events))
}

pub async fn search_events(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params?;
    let criteria = SearchCriteria::try_from(params)?;
    tracing::debug!(?criteria, "Searching events");

    let events = state.events.search_events(&criteria).await?;
    Ok(search_results(events, criteria))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    // A malformed id cannot match any event.
    let Ok(id) = raw_id.parse::<i32>() else {
        return Err(event_not_found());
    };

    match state.events.get_event_by_id(id).await? {
        Some(event) => Ok(success(event)),
        None => Err(event_not_found()),
    }
}

fn event_not_found() -> AppError {
    AppError::NotFound("Event not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_params_become_absent() {
        let params = SearchParams {
            category: Some("   ".to_string()),
            location: Some(String::new()),
            date: None,
        };
        let criteria = SearchCriteria::try_from(params).unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_params_are_trimmed_and_date_parsed() {
        let params = SearchParams {
            category: Some(" Health ".to_string()),
            location: None,
            date: Some("2025-10-20".to_string()),
        };
        let criteria = SearchCriteria::try_from(params).unwrap();
        assert_eq!(criteria.category.as_deref(), Some("Health"));
        assert_eq!(criteria.date, NaiveDate::from_ymd_opt(2025, 10, 20));
    }

    #[test]
    fn test_malformed_date_is_a_validation_error() {
        let params = SearchParams {
            date: Some("20/10/2025".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            SearchCriteria::try_from(params),
            Err(AppError::ValidationError(_))
        ));
    }
}
