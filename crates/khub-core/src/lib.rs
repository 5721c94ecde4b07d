pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod tracing_setup;

pub use api::{HttpHubApi, HubApi};
pub use config::ClientConfig;
pub use error::ApiError;
