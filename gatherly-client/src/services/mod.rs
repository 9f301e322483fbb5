pub mod api_client;
pub mod credentials;
pub mod notifications;
pub mod session;
