//! Timer-driven notification refresh.
//!
//! The app has no push transport; the notification list is kept
//! approximately fresh by polling the list endpoint on an interval tied
//! to the app's foreground lifecycle.

use crate::models::notification::Notification;
use crate::services::api_client::ApiClient;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Snapshot of the notification list with its derived unread count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationFeed {
    pub items: Vec<Notification>,
    pub unread: usize,
}

pub struct NotificationPoller {
    api: Arc<ApiClient>,
    interval: Duration,
    feed: Arc<RwLock<NotificationFeed>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl NotificationPoller {
    pub fn new(api: Arc<ApiClient>, interval: Duration) -> Self {
        Self {
            api,
            interval,
            feed: Arc::new(RwLock::new(NotificationFeed::default())),
            timer: Mutex::new(None),
        }
    }

    pub fn feed(&self) -> NotificationFeed {
        self.feed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn unread_count(&self) -> usize {
        self.feed().unread
    }

    pub fn is_running(&self) -> bool {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Begin firing [`NotificationPoller::refresh`] on the configured
    /// interval. The first refresh fires immediately. Starting while
    /// already running replaces the previous timer; exactly one timer is
    /// live afterwards.
    pub fn start(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.take() {
            previous.abort();
        }

        let api = Arc::clone(&self.api);
        let feed = Arc::clone(&self.feed);
        let interval = self.interval;
        *timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                Self::refresh_into(&api, &feed).await;
            }
        }));
        tracing::debug!(
            interval_secs = self.interval.as_secs(),
            "Notification polling started"
        );
    }

    /// Cancel the timer. A no-op when already stopped. In-flight
    /// refreshes are not awaited; a response that still lands is applied
    /// under last-write-wins, which is acceptable for an idempotent read.
    pub fn stop(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = timer.take() {
            handle.abort();
            tracing::debug!("Notification polling stopped");
        }
    }

    /// Pull the notification list once, replace the local copy, and
    /// recompute the unread count. On error the previous list is kept
    /// untouched and the failure is logged.
    pub async fn refresh(&self) {
        Self::refresh_into(&self.api, &self.feed).await;
    }

    async fn refresh_into(api: &ApiClient, feed: &RwLock<NotificationFeed>) {
        match api.list_notifications().await {
            Ok(items) => {
                let unread = items.iter().filter(|n| !n.is_read).count();
                let mut guard = feed.write().unwrap_or_else(PoisonError::into_inner);
                *guard = NotificationFeed { items, unread };
            }
            Err(e) => {
                tracing::warn!(error = %e, "Notification refresh failed, keeping previous list");
            }
        }
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
