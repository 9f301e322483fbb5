//! Single point of HTTP access to the Gatherly API.
//!
//! Every endpoint wrapper is a straight pass-through to the `request_*`
//! primitives: one URL template, one method, one request type, one
//! response type. Business rules (capacity, waitlist ordering, approvals)
//! live server-side and are never re-implemented here. The one exception
//! is [`ApiClient::move_to_waitlist`], which issues two sequential calls
//! because the backend lacks a direct going-to-waitlist transition.

use crate::error::ApiError;
use crate::models::auth::{
    AuthData, LoginRequest, PasswordResetRequest, ResetPasswordRequest, SignupRequest,
};
use crate::models::event::{
    AttendeeRequest, CreateEventRequest, EmailAttendeesRequest, Event, EventData, EventListData,
    UpdateEventRequest,
};
use crate::models::group::{
    CreateGroupRequest, Group, GroupData, GroupListData, InviteData, JoinGroupData,
    JoinGroupRequest,
};
use crate::models::notification::{Notification, NotificationListData};
use crate::models::user::{UpdateUserRequest, User, UserData, UserListData};
use crate::models::{Ack, ApiResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{PoisonError, RwLock};
use validator::Validate;

/// Fixed path prefix every endpoint is nested under.
const API_PREFIX: &str = "/api";

/// Marker for calls that carry no request body.
const NO_BODY: Option<&()> = None;

pub struct ApiClient {
    http: Client,
    base_url: String,
    auth_token: RwLock<Option<Secret<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
            auth_token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach a bearer token to all subsequent requests. Takes effect
    /// immediately; requests already under construction keep whatever
    /// token they were built with. Token mutation is routed through the
    /// session controller, never exposed to arbitrary callers.
    pub(crate) fn set_auth_token(&self, token: Secret<String>) {
        let mut guard = self
            .auth_token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token);
    }

    pub(crate) fn clear_auth_token(&self) {
        let mut guard = self
            .auth_token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{}{}", self.base_url, API_PREFIX, path);
        Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw))
    }

    /// Issue one HTTP call and return the raw status and body. Transport
    /// failures are logged and surfaced as [`ApiError::Network`]; nothing
    /// is retried.
    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(StatusCode, Vec<u8>), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json");

        let token = {
            let guard = self
                .auth_token
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            guard.as_ref().map(|t| t.expose_secret().clone())
        };
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(method = %method, url = %url, error = %e, "HTTP request failed");
            ApiError::Network(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::Network)?;
        Ok((status, bytes.to_vec()))
    }

    /// Map a non-2xx status to its error kind. 401 and 403 are
    /// non-body-driven signals; anything else gets a best-effort message
    /// out of the error envelope.
    fn classify(status: StatusCode, body: &[u8]) -> Result<(), ApiError> {
        match status {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
            s => {
                let message = serde_json::from_slice::<Ack>(body)
                    .ok()
                    .and_then(|envelope| envelope.message)
                    .unwrap_or_else(|| format!("HTTP {}", s.as_u16()));
                Err(ApiError::Server(message))
            }
        }
    }

    /// Canonical primitive for endpoints returning `{success, message?,
    /// data}`. A 2xx body with `success = false` is an error; a schema
    /// mismatch raises [`ApiError::Decode`] and the body is discarded,
    /// never partially applied.
    async fn request_data<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (status, bytes) = self.send(method, path, body).await?;
        Self::classify(status, &bytes)?;

        let envelope: ApiResponse<T> =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))?;
        if !envelope.success {
            return Err(ApiError::Server(
                envelope
                    .message
                    .unwrap_or_else(|| "Request failed".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| ApiError::Decode("response envelope has no data field".to_string()))
    }

    /// Primitive for acknowledgement-only endpoints: `{success, message?}`.
    async fn request_ack<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Ack, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let (status, bytes) = self.send(method, path, body).await?;
        Self::classify(status, &bytes)?;

        let ack: Ack =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))?;
        if !ack.success {
            return Err(ApiError::Server(
                ack.message.unwrap_or_else(|| "Request failed".to_string()),
            ));
        }
        Ok(ack)
    }

    // --- auth ---

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthData, ApiError> {
        request.validate()?;
        self.request_data(Method::POST, "/auth/login", Some(request))
            .await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthData, ApiError> {
        request.validate()?;
        self.request_data(Method::POST, "/auth/signup", Some(request))
            .await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        let data: UserData = self.request_data(Method::GET, "/auth/me", NO_BODY).await?;
        Ok(data.user)
    }

    // --- events ---

    pub async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        let data: EventListData = self.request_data(Method::GET, "/events", NO_BODY).await?;
        Ok(data.events)
    }

    pub async fn get_event(&self, event_id: &str) -> Result<Event, ApiError> {
        let data: EventData = self
            .request_data(Method::GET, &format!("/events/{event_id}"), NO_BODY)
            .await?;
        Ok(data.event)
    }

    pub async fn create_event(
        &self,
        group_id: &str,
        request: &CreateEventRequest,
    ) -> Result<Event, ApiError> {
        request.validate()?;
        let data: EventData = self
            .request_data(
                Method::POST,
                &format!("/groups/{group_id}/events"),
                Some(request),
            )
            .await?;
        Ok(data.event)
    }

    pub async fn update_event(
        &self,
        event_id: &str,
        request: &UpdateEventRequest,
    ) -> Result<Event, ApiError> {
        request.validate()?;
        let data: EventData = self
            .request_data(Method::PUT, &format!("/events/{event_id}"), Some(request))
            .await?;
        Ok(data.event)
    }

    pub async fn delete_event(&self, event_id: &str) -> Result<Ack, ApiError> {
        self.request_ack(Method::DELETE, &format!("/events/{event_id}"), NO_BODY)
            .await
    }

    // --- attendance ---

    pub async fn join_waitlist(&self, event_id: &str) -> Result<Ack, ApiError> {
        self.request_ack(Method::POST, &format!("/events/{event_id}/join"), NO_BODY)
            .await
    }

    pub async fn mark_not_going(&self, event_id: &str) -> Result<Ack, ApiError> {
        self.request_ack(Method::POST, &format!("/events/{event_id}/nogo"), NO_BODY)
            .await
    }

    pub async fn approve_attendee(&self, event_id: &str, user_id: &str) -> Result<Ack, ApiError> {
        let body = AttendeeRequest {
            user_id: user_id.to_string(),
        };
        self.request_ack(
            Method::POST,
            &format!("/events/{event_id}/approve"),
            Some(&body),
        )
        .await
    }

    pub async fn reject_attendee(&self, event_id: &str, user_id: &str) -> Result<Ack, ApiError> {
        let body = AttendeeRequest {
            user_id: user_id.to_string(),
        };
        self.request_ack(
            Method::POST,
            &format!("/events/{event_id}/reject"),
            Some(&body),
        )
        .await
    }

    /// Move an attendee from the going list onto the waitlist.
    ///
    /// The backend has no direct going-to-waitlist transition, so this is
    /// two sequential calls: mark the user not-going, then move them onto
    /// the waitlist. The second call is only issued once the first has
    /// succeeded; a first-call failure is reported as-is and leaves the
    /// user wherever the server left them.
    pub async fn move_to_waitlist(&self, event_id: &str, user_id: &str) -> Result<Ack, ApiError> {
        let body = AttendeeRequest {
            user_id: user_id.to_string(),
        };
        self.request_ack(
            Method::POST,
            &format!("/events/{event_id}/nogo"),
            Some(&body),
        )
        .await?;
        self.request_ack(
            Method::POST,
            &format!("/events/{event_id}/move-to-waitlist"),
            Some(&body),
        )
        .await
    }

    pub async fn email_attendees(
        &self,
        event_id: &str,
        request: &EmailAttendeesRequest,
    ) -> Result<Ack, ApiError> {
        request.validate()?;
        self.request_ack(
            Method::POST,
            &format!("/events/{event_id}/email"),
            Some(request),
        )
        .await
    }

    // --- groups ---

    pub async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        let data: GroupListData = self.request_data(Method::GET, "/groups", NO_BODY).await?;
        Ok(data.groups)
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group, ApiError> {
        let data: GroupData = self
            .request_data(Method::GET, &format!("/groups/{group_id}"), NO_BODY)
            .await?;
        Ok(data.group)
    }

    pub async fn create_group(&self, request: &CreateGroupRequest) -> Result<Group, ApiError> {
        request.validate()?;
        let data: GroupData = self
            .request_data(Method::POST, "/groups", Some(request))
            .await?;
        Ok(data.group)
    }

    pub async fn join_group(
        &self,
        group_id: &str,
        invite_token: &str,
    ) -> Result<JoinGroupData, ApiError> {
        let body = JoinGroupRequest {
            invite_token: invite_token.to_string(),
        };
        self.request_data(Method::POST, &format!("/groups/{group_id}/join"), Some(&body))
            .await
    }

    pub async fn create_invite(&self, group_id: &str) -> Result<String, ApiError> {
        let data: InviteData = self
            .request_data(
                Method::POST,
                &format!("/groups/{group_id}/invite"),
                NO_BODY,
            )
            .await?;
        Ok(data.invite_token)
    }

    pub async fn remove_member(&self, group_id: &str, user_id: &str) -> Result<Ack, ApiError> {
        self.request_ack(
            Method::DELETE,
            &format!("/groups/{group_id}/members/{user_id}"),
            NO_BODY,
        )
        .await
    }

    // --- users ---

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let data: UserListData = self.request_data(Method::GET, "/users", NO_BODY).await?;
        Ok(data.users)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, ApiError> {
        let data: UserData = self
            .request_data(Method::GET, &format!("/users/{user_id}"), NO_BODY)
            .await?;
        Ok(data.user)
    }

    pub async fn update_user(
        &self,
        user_id: &str,
        request: &UpdateUserRequest,
    ) -> Result<User, ApiError> {
        request.validate()?;
        let data: UserData = self
            .request_data(Method::PUT, &format!("/users/{user_id}"), Some(request))
            .await?;
        Ok(data.user)
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<Ack, ApiError> {
        self.request_ack(Method::DELETE, &format!("/users/{user_id}"), NO_BODY)
            .await
    }

    // --- notifications ---

    pub async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let data: NotificationListData = self
            .request_data(Method::GET, "/notifications", NO_BODY)
            .await?;
        Ok(data.notifications)
    }

    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<Ack, ApiError> {
        self.request_ack(
            Method::PUT,
            &format!("/notifications/{notification_id}/read"),
            NO_BODY,
        )
        .await
    }

    // --- password reset ---

    pub async fn request_password_reset(&self, email: &str) -> Result<Ack, ApiError> {
        let body = PasswordResetRequest {
            email: email.to_string(),
        };
        body.validate()?;
        self.request_ack(Method::POST, "/password-reset/request", Some(&body))
            .await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Ack, ApiError> {
        request.validate()?;
        self.request_ack(Method::POST, "/password-reset/reset", Some(request))
            .await
    }
}
