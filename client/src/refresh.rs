use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::render::render_stats_line;
use crate::search::SearchController;
use crate::store::EventStats;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Periodically recomputes page statistics from the controller's store.
///
/// Ticks are skipped while the page is hidden. When the page becomes visible
/// again the events are reloaded straight away and the period restarts.
pub struct StatsRefresher {
    controller: Arc<Mutex<SearchController>>,
    period: Duration,
    today: fn() -> NaiveDate,
}

impl StatsRefresher {
    pub fn new(controller: Arc<Mutex<SearchController>>, config: &ClientConfig) -> Self {
        Self {
            controller,
            period: config.refresh_interval,
            today: local_today,
        }
    }

    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    async fn publish(&self, stats_tx: &watch::Sender<Option<EventStats>>) {
        let stats = self.controller.lock().await.stats((self.today)());
        tracing::debug!("Real-time stats: {}", render_stats_line(&stats));
        stats_tx.send_replace(Some(stats));
    }

    /// Runs until `shutdown` fires or the visibility sender is dropped.
    pub fn spawn(
        self,
        mut visibility: watch::Receiver<bool>,
        shutdown: CancellationToken,
    ) -> (JoinHandle<()>, watch::Receiver<Option<EventStats>>) {
        let (stats_tx, stats_rx) = watch::channel(None);

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.period, self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        if *visibility.borrow() {
                            self.publish(&stats_tx).await;
                        }
                    }
                    changed = visibility.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let visible = *visibility.borrow_and_update();
                        if visible {
                            tracing::debug!("Page visible again, reloading events");
                            self.controller.lock().await.load_all_events().await;
                            self.publish(&stats_tx).await;
                            ticker.reset();
                        }
                    }
                }
            }
            tracing::debug!("Stats refresher stopped");
        });

        (handle, stats_rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::mock::MockApi;
    use crate::store::fixtures::{catalogue, day};

    fn first_of_november() -> NaiveDate {
        day(1)
    }

    async fn setup() -> (Arc<MockApi>, Arc<Mutex<SearchController>>) {
        let api = Arc::new(MockApi {
            events: catalogue(),
            ..Default::default()
        });
        let mut controller = SearchController::new(api.clone());
        controller.load_all_events().await;
        (api, Arc::new(Mutex::new(controller)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_stats_each_period_while_visible() {
        let (api, controller) = setup().await;
        let (_visibility_tx, visibility_rx) = watch::channel(true);
        let shutdown = CancellationToken::new();
        let (handle, mut stats_rx) = StatsRefresher::new(controller, &ClientConfig::default())
            .with_clock(first_of_november)
            .spawn(visibility_rx, shutdown.clone());

        stats_rx.changed().await.unwrap();
        let stats = stats_rx.borrow_and_update().unwrap();
        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.upcoming_events, 4);
        assert_eq!(api.list_calls(), 1);

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_hidden_page_pauses_and_visible_page_reloads() {
        let (api, controller) = setup().await;
        let (visibility_tx, visibility_rx) = watch::channel(false);
        let shutdown = CancellationToken::new();
        let (handle, mut stats_rx) = StatsRefresher::new(controller, &ClientConfig::default())
            .with_clock(first_of_november)
            .spawn(visibility_rx, shutdown.clone());

        tokio::time::sleep(Duration::from_secs(95)).await;
        assert!(!stats_rx.has_changed().unwrap());
        assert_eq!(api.list_calls(), 1);

        visibility_tx.send(true).unwrap();
        stats_rx.changed().await.unwrap();
        assert!(stats_rx.borrow_and_update().is_some());
        assert_eq!(api.list_calls(), 2);

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_period_comes_from_config() {
        let (_, controller) = setup().await;
        let (_visibility_tx, visibility_rx) = watch::channel(true);
        let shutdown = CancellationToken::new();
        let config = ClientConfig {
            refresh_interval: Duration::from_secs(5),
            ..Default::default()
        };
        let (handle, stats_rx) = StatsRefresher::new(controller, &config)
            .with_clock(first_of_november)
            .spawn(visibility_rx, shutdown.clone());

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(!stats_rx.has_changed().unwrap());
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(stats_rx.has_changed().unwrap());

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_visibility_source_is_gone() {
        let (_, controller) = setup().await;
        let (visibility_tx, visibility_rx) = watch::channel(true);
        let (handle, _stats_rx) = StatsRefresher::new(controller, &ClientConfig::default())
            .spawn(visibility_rx, CancellationToken::new());

        drop(visibility_tx);
        handle.await.unwrap();
    }
}
