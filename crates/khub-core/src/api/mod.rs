//! Backend REST client.
//!
//! Four operations against the `/api/v1` surface: list hubs, create a hub,
//! upload a document into a hub, and ask a hub a question. The [`HubApi`]
//! trait is the seam the interaction contracts in [`crate::session`] are
//! written against; [`HttpHubApi`] is the reqwest implementation.

mod client;

pub use client::HttpHubApi;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{ChatReply, Hub, Upload, UploadReceipt};

#[async_trait]
pub trait HubApi: Send + Sync {
    /// `GET /hubs`
    async fn list_hubs(&self) -> ApiResult<Vec<Hub>>;

    /// `POST /hubs`. Returns the backend's confirmation text when it sends one.
    async fn create_hub(&self, name: &str) -> ApiResult<Option<String>>;

    /// `POST /upload` as multipart (`hub_name`, `file`)
    async fn upload(&self, upload: &Upload) -> ApiResult<UploadReceipt>;

    /// `POST /chat`
    async fn chat(&self, hub_name: &str, message: &str) -> ApiResult<ChatReply>;
}
