//! Interaction contracts for the two screens.
//!
//! Each state type is split into a synchronous `begin_*` step (validates,
//! mutates local state, hands back the request to issue) and a `finish_*` /
//! `complete` step (applies the resolved result). The TUI runs the request
//! on a spawned task between the two; the `async` convenience methods run
//! both halves inline against any [`HubApi`](crate::api::HubApi).

pub mod chat;
pub mod hubs;
pub mod upload;

pub use chat::{ChatSession, PendingChat, SendRejected};
pub use hubs::{CreateOutcome, HubListState};
pub use upload::{UploadAck, UploadState};
