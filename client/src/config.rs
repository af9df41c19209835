use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:3000/api";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub keyword_debounce: Duration,
    pub location_debounce: Duration,
    pub refresh_interval: Duration,
    pub related_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            keyword_debounce: Duration::from_millis(500),
            location_debounce: Duration::from_millis(300),
            refresh_interval: Duration::from_secs(30),
            related_limit: 3,
        }
    }
}

impl ClientConfig {
    /// Defaults, with the API location taken from `CHARITY_API_URL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("CHARITY_API_URL") {
            if !url.trim().is_empty() {
                config.api_base_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        config
    }
}
