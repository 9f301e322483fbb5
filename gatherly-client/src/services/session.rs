//! Owner of the authenticated-identity state and the token lifecycle.
//!
//! The controller is the only writer of the API client's auth token and
//! of the credential store; screens read session state and call the
//! coarse operations below, each of which fully succeeds or fully fails.

use crate::error::ApiError;
use crate::models::auth::{LoginRequest, SignupRequest};
use crate::models::user::User;
use crate::services::api_client::ApiClient;
use crate::services::credentials::CredentialStore;
use secrecy::Secret;
use std::sync::{Arc, PoisonError, RwLock};

/// Authentication phase of the app session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Initial state, before the first restore attempt.
    Unknown,
    /// A login, signup, or restore is in flight.
    Authenticating,
    Authenticated(User),
    Unauthenticated,
}

pub struct SessionController {
    api: Arc<ApiClient>,
    store: Arc<dyn CredentialStore>,
    state: RwLock<SessionState>,
    // Error side channel: surfaced for display alongside the state,
    // cleared explicitly via clear_error.
    error_message: RwLock<Option<String>>,
}

impl SessionController {
    pub fn new(api: Arc<ApiClient>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            api,
            store,
            state: RwLock::new(SessionState::Unknown),
            error_message: RwLock::new(None),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_user(&self) -> Option<User> {
        match self.state() {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state(), SessionState::Authenticated(_))
    }

    pub fn error_message(&self) -> Option<String> {
        self.error_message
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove any attached error message without altering the
    /// authentication state.
    pub fn clear_error(&self) {
        self.set_error(None);
    }

    /// Attempt to resume the previous session from the stored token.
    ///
    /// No stored token means straight to `Unauthenticated` with no
    /// network call. A stored token is attached and validated against
    /// `/auth/me`; any failure drops it silently since this runs
    /// automatically at launch. A decode failure takes the same path but
    /// is logged with its own kind so contract skew stays visible.
    pub async fn restore_session(&self) {
        let Some(token) = self.store.load() else {
            self.set_state(SessionState::Unauthenticated);
            return;
        };

        self.set_state(SessionState::Authenticating);
        self.api.set_auth_token(token);

        match self.api.current_user().await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Session restored");
                self.set_state(SessionState::Authenticated(user));
            }
            Err(e) => {
                if matches!(e, ApiError::Decode(_)) {
                    tracing::warn!(error = %e, "Session restore response did not decode");
                } else {
                    tracing::info!(error = %e, "Stored token rejected, clearing session");
                }
                self.api.clear_auth_token();
                self.store.clear();
                self.set_state(SessionState::Unauthenticated);
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        self.set_state(SessionState::Authenticating);
        match self.api.login(&request).await {
            Ok(auth) => {
                tracing::info!(user_id = %auth.user.id, "Logged in");
                Ok(self.complete_sign_in(auth.user, auth.token))
            }
            Err(e) => Err(self.fail_sign_in(e)),
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<User, ApiError> {
        self.set_state(SessionState::Authenticating);
        match self.api.signup(&request).await {
            Ok(auth) => {
                tracing::info!(user_id = %auth.user.id, "Account created");
                Ok(self.complete_sign_in(auth.user, auth.token))
            }
            Err(e) => Err(self.fail_sign_in(e)),
        }
    }

    /// Best-effort synchronous cleanup; cannot fail.
    pub fn logout(&self) {
        self.api.clear_auth_token();
        self.store.clear();
        self.set_error(None);
        self.set_state(SessionState::Unauthenticated);
        tracing::info!("Logged out");
    }

    fn complete_sign_in(&self, user: User, token: String) -> User {
        let token = Secret::new(token);
        self.store.save(&token);
        self.api.set_auth_token(token);
        self.set_error(None);
        self.set_state(SessionState::Authenticated(user.clone()));
        user
    }

    fn fail_sign_in(&self, error: ApiError) -> ApiError {
        self.set_error(Some(error.to_string()));
        self.set_state(SessionState::Unauthenticated);
        error
    }

    fn set_state(&self, state: SessionState) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *guard = state;
    }

    fn set_error(&self, message: Option<String>) {
        let mut guard = self
            .error_message
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = message;
    }
}
