use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{Category, Envelope, Event, EventDetail, SearchCriteria};

/// The read-only charity events API as seen by the frontend.
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>, ClientError>;
    async fn search_events(&self, criteria: &SearchCriteria) -> Result<Vec<Event>, ClientError>;
    async fn get_event(&self, id: i32) -> Result<EventDetail, ClientError>;
    async fn list_categories(&self) -> Result<Vec<Category>, ClientError>;
}

#[derive(Clone)]
pub struct HttpEventsApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpEventsApi {
    /// `base_url` is the API root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, ?query, "API call");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<Envelope<serde_json::Value>>()
                .await
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
            tracing::warn!(%url, status = status.as_u16(), %message, "API call failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        if !envelope.success {
            return Err(ClientError::Unsuccessful(
                envelope
                    .message
                    .unwrap_or_else(|| "Data loading failed".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| ClientError::Unsuccessful("Response carried no data".to_string()))
    }
}

#[async_trait]
impl EventsApi for HttpEventsApi {
    async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        self.fetch("/events", &[]).await
    }

    async fn search_events(&self, criteria: &SearchCriteria) -> Result<Vec<Event>, ClientError> {
        self.fetch("/events/search", &criteria.query_pairs()).await
    }

    async fn get_event(&self, id: i32) -> Result<EventDetail, ClientError> {
        self.fetch(&format!("/events/{id}"), &[]).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.fetch("/categories", &[]).await
    }
}
