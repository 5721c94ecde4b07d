use serde::{Deserialize, Serialize};

/// Text shown in place of an assistant reply when the chat call fails.
pub const CHAT_FALLBACK_REPLY: &str = "Sorry, I encountered an error processing your request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn of a hub conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Document excerpts the backend retrieved for this answer (assistant turns only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            sources: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            sources: Vec::new(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Append-only, insertion-ordered list of turns for one chat session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Request body of `POST /chat`
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub hub_name: &'a str,
    pub message: &'a str,
}

/// Response body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub context: Vec<String>,
}

impl ChatReply {
    pub fn into_message(self) -> Message {
        Message::assistant(self.response).with_sources(self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }

    #[test]
    fn test_reply_without_context() {
        let reply: ChatReply = serde_json::from_str(r#"{"response": "42"}"#).unwrap();
        assert!(reply.context.is_empty());
        assert_eq!(reply.into_message(), Message::assistant("42"));
    }

    #[test]
    fn test_reply_context_becomes_sources() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response": "a", "context": ["chunk 1", "chunk 2"]}"#).unwrap();
        let msg = reply.into_message();
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.sources.len(), 2);
    }

    #[test]
    fn test_transcript_keeps_insertion_order() {
        let mut t = Transcript::new();
        t.push(Message::user("one"));
        t.push(Message::assistant("two"));
        t.push(Message::user("three"));
        let contents: Vec<&str> = t.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
        assert_eq!(t.last().map(|m| m.role), Some(Role::User));
    }
}
