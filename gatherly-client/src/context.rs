//! Application composition root.
//!
//! Services are constructed once here and handed to consumers
//! explicitly; there are no ambient singletons. Screens receive the
//! context (or the individual services) by reference.

use crate::config::Settings;
use crate::services::api_client::ApiClient;
use crate::services::credentials::{CredentialStore, KeyringStore};
use crate::services::notifications::NotificationPoller;
use crate::services::session::SessionController;
use std::sync::Arc;
use std::time::Duration;

pub struct AppContext {
    pub api: Arc<ApiClient>,
    pub session: Arc<SessionController>,
    pub notifications: Arc<NotificationPoller>,
}

impl AppContext {
    /// Wire the services for a deployment described by `settings`,
    /// storing the credential in the OS keychain.
    pub fn new(settings: &Settings) -> Self {
        let store = Arc::new(KeyringStore::new(
            settings.credentials.keychain_service.clone(),
        ));
        Self::with_store(settings, store)
    }

    /// Same wiring with a caller-provided credential store. Used by
    /// tests and by hosts without a platform keychain.
    pub fn with_store(settings: &Settings, store: Arc<dyn CredentialStore>) -> Self {
        let api = Arc::new(ApiClient::new(settings.api.base_url.clone()));
        let session = Arc::new(SessionController::new(Arc::clone(&api), store));
        let notifications = Arc::new(NotificationPoller::new(
            Arc::clone(&api),
            Duration::from_secs(settings.notifications.poll_interval_secs),
        ));

        Self {
            api,
            session,
            notifications,
        }
    }

    /// Launch sequence: restore the previous session, then begin polling
    /// notifications if a user is signed in.
    pub async fn start(&self) {
        self.session.restore_session().await;
        if self.session.is_authenticated() {
            self.notifications.start();
        }
    }

    /// Background/teardown sequence: stop polling. Session state is kept;
    /// the stored credential survives process restart.
    pub fn stop(&self) {
        self.notifications.stop();
    }
}
