//! Wire-level data transfer types for the Gatherly REST API.

pub mod auth;
pub mod dates;
pub mod event;
pub mod group;
pub mod notification;
pub mod user;

use serde::Deserialize;

/// Standard response envelope: `{ success, message?, data }`.
///
/// `success = false` is an error even under a 2xx status; the envelope is
/// checked before `data` is handed to callers.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// Acknowledgement-only envelope: `{ success, message? }`.
///
/// Also used to extract a human-readable message from failure responses.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
