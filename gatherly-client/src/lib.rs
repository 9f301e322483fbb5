//! Typed client SDK for the Gatherly event and group-management API.
//!
//! The crate is organized around four services:
//!
//! - [`services::api_client::ApiClient`] — the single point of HTTP
//!   access with a uniform request/response/error contract,
//! - [`services::session::SessionController`] — owner of the
//!   authenticated-identity state and the token lifecycle,
//! - [`services::credentials::CredentialStore`] — durable single-slot
//!   storage for the bearer token,
//! - [`services::notifications::NotificationPoller`] — timer-driven
//!   notification refresh.
//!
//! [`AppContext`] wires them together for a deployment target selected
//! by [`config::Settings`]. UI concerns (rendering, navigation, retry
//! affordances) are outside this crate; screens consume the typed
//! results and display [`ApiError`] descriptions as plain text.

pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;

pub use context::AppContext;
pub use error::ApiError;
