use std::sync::Arc;

use khub_core::error::ApiResult;
use khub_core::models::{ChatReply, Hub, Upload, UploadReceipt};
use khub_core::session::PendingChat;
use khub_core::HubApi;
use tokio::sync::mpsc;
use tracing::debug;

/// Network work requested by the UI. Produced by key handling and by
/// follow-ups to resolved calls; executed by [`Backend::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `generation` comes from `HubListState::begin_refresh` and is echoed back
    RefreshHubs { generation: u64 },
    CreateHub(String),
    SendChat(PendingChat),
    Upload { session_id: u64, upload: Upload },
}

/// A resolved backend call on its way back to the event loop.
#[derive(Debug)]
pub enum BackendEvent {
    HubsLoaded {
        generation: u64,
        result: ApiResult<Vec<Hub>>,
    },
    HubCreated {
        name: String,
        result: ApiResult<Option<String>>,
    },
    ChatReplied {
        session_id: u64,
        result: ApiResult<ChatReply>,
    },
    UploadFinished {
        session_id: u64,
        result: ApiResult<UploadReceipt>,
    },
}

/// Runs each [`Command`] on its own task so the UI never blocks on the network.
#[derive(Clone)]
pub struct Backend {
    api: Arc<dyn HubApi>,
    event_tx: mpsc::Sender<BackendEvent>,
}

impl Backend {
    pub fn new(api: Arc<dyn HubApi>, event_tx: mpsc::Sender<BackendEvent>) -> Self {
        Self { api, event_tx }
    }

    /// Fire one request. Exactly one [`BackendEvent`] is sent back per call.
    pub fn dispatch(&self, command: Command) {
        let api = self.api.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = execute(api.as_ref(), command).await;
            if event_tx.send(event).await.is_err() {
                debug!("event loop gone; dropping backend result");
            }
        });
    }
}

async fn execute(api: &dyn HubApi, command: Command) -> BackendEvent {
    match command {
        Command::RefreshHubs { generation } => BackendEvent::HubsLoaded {
            generation,
            result: api.list_hubs().await,
        },
        Command::CreateHub(name) => {
            let result = api.create_hub(&name).await;
            BackendEvent::HubCreated { name, result }
        }
        Command::SendChat(pending) => BackendEvent::ChatReplied {
            session_id: pending.session_id,
            result: api.chat(&pending.hub_name, &pending.message).await,
        },
        Command::Upload { session_id, upload } => BackendEvent::UploadFinished {
            session_id,
            result: api.upload(&upload).await,
        },
    }
}
