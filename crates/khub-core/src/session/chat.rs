use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::api::HubApi;
use crate::error::ApiResult;
use crate::models::message::CHAT_FALLBACK_REPLY;
use crate::models::{ChatReply, Hub, Message, Transcript};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Why a submission was refused before any request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRejected {
    /// Input was empty after trimming
    Empty,
    /// A previous submission has not resolved yet
    Pending,
}

/// A chat request that has been recorded in the transcript and must now be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChat {
    pub session_id: u64,
    pub hub_name: String,
    pub message: String,
}

/// Conversation state for one hub, alive for as long as its chat screen is.
#[derive(Debug)]
pub struct ChatSession {
    id: u64,
    hub: Hub,
    transcript: Transcript,
    input: String,
    pending: bool,
}

impl ChatSession {
    pub fn new(hub: Hub) -> Self {
        Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            hub,
            transcript: Transcript::new(),
            input: String::new(),
            pending: false,
        }
    }

    /// Process-unique id, used to drop results that arrive after the screen closed
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.input.trim().is_empty()
    }

    /// Submit whatever is in the input field.
    pub fn submit(&mut self) -> Result<PendingChat, SendRejected> {
        let text = self.input.clone();
        self.begin_send(&text)
    }

    /// Record the user turn and enter the pending state.
    ///
    /// On rejection nothing changes: no transcript entry, input untouched.
    pub fn begin_send(&mut self, text: &str) -> Result<PendingChat, SendRejected> {
        if text.trim().is_empty() {
            return Err(SendRejected::Empty);
        }
        if self.pending {
            debug!(hub = %self.hub, "chat submission rejected while a reply is pending");
            return Err(SendRejected::Pending);
        }

        self.transcript.push(Message::user(text));
        self.input.clear();
        self.pending = true;

        Ok(PendingChat {
            session_id: self.id,
            hub_name: self.hub.name.clone(),
            message: text.to_string(),
        })
    }

    /// Apply the resolved chat call: exactly one assistant turn per submission.
    ///
    /// Returns `None` if nothing was pending (duplicate or stale result).
    pub fn complete(&mut self, result: ApiResult<ChatReply>) -> Option<&Message> {
        if !self.pending {
            warn!(hub = %self.hub, "chat result arrived with no submission pending; ignoring");
            return None;
        }

        let reply = match result {
            Ok(reply) => reply.into_message(),
            Err(e) => {
                warn!(hub = %self.hub, error = %e, "chat request failed");
                Message::assistant(CHAT_FALLBACK_REPLY)
            }
        };
        self.transcript.push(reply);
        self.pending = false;
        self.transcript.last()
    }

    /// Run a full exchange inline.
    pub async fn send_message(
        &mut self,
        api: &dyn HubApi,
        text: &str,
    ) -> Result<&Message, SendRejected> {
        let pending = self.begin_send(text)?;
        let result = api.chat(&pending.hub_name, &pending.message).await;
        self.complete(result).ok_or(SendRejected::Pending)
    }
}
