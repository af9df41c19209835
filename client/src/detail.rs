use chrono::NaiveDate;

use crate::api::EventsApi;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{Event, EventDetail};
use crate::render::{render_event_detail, render_related_events};
use crate::store::EventStore;

/// Everything the event details page shows.
#[derive(Debug, Clone)]
pub struct EventPage {
    pub detail: EventDetail,
    pub related: Vec<Event>,
}

impl EventPage {
    /// Loads one event and up to `config.related_limit` others from its
    /// category. A failing listing only hides the related section.
    pub async fn load(api: &dyn EventsApi, id: i32, config: &ClientConfig) -> Result<Self, ClientError> {
        let detail = api.get_event(id).await?;

        let related = match api.list_events().await {
            Ok(events) => {
                let mut store = EventStore::new();
                store.replace(events);
                store.related_to(&detail.event, config.related_limit)
            }
            Err(e) => {
                tracing::warn!(error = %e, event_id = id, "Failed to load related events");
                Vec::new()
            }
        };

        Ok(Self { detail, related })
    }

    pub fn render(&self, today: NaiveDate) -> String {
        let mut html = render_event_detail(&self.detail, today);
        if let Some(related) = render_related_events(&self.related, today) {
            html.push_str(r#"<section class="related-events">"#);
            html.push_str(&related);
            html.push_str("</section>");
        }
        html
    }
}
