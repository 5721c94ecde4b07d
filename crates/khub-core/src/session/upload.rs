use std::path::PathBuf;

use tracing::{info, warn};

use crate::api::HubApi;
use crate::error::ApiResult;
use crate::models::{Upload, UploadReceipt};

pub const UPLOAD_SUCCESS_ACK: &str = "File uploaded and processed successfully!";
pub const UPLOAD_FAILURE_ACK: &str = "Failed to upload file.";

/// User-visible result of one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadAck {
    pub success: bool,
    pub message: &'static str,
}

impl UploadAck {
    /// Acknowledgment for a resolved upload; logs the detail the user never sees.
    pub fn for_result(result: &ApiResult<UploadReceipt>) -> Self {
        match result {
            Ok(receipt) => {
                info!(
                    chunks = receipt.chunks.unwrap_or_default(),
                    message = receipt.message.as_deref().unwrap_or(""),
                    "document ingested"
                );
                Self {
                    success: true,
                    message: UPLOAD_SUCCESS_ACK,
                }
            }
            Err(e) => {
                warn!(error = %e, "upload failed");
                Self {
                    success: false,
                    message: UPLOAD_FAILURE_ACK,
                }
            }
        }
    }
}

/// The chat screen's document-upload control: a file selection plus an
/// in-progress flag that blocks re-invocation.
#[derive(Debug, Default)]
pub struct UploadState {
    selection: String,
    in_progress: bool,
}

impl UploadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &str {
        &self.selection
    }

    pub fn set_selection(&mut self, text: impl Into<String>) {
        self.selection = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.selection.push(c);
    }

    pub fn backspace(&mut self) {
        self.selection.pop();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// The selected file as a path, if one is selected.
    pub fn selected_path(&self) -> Option<PathBuf> {
        normalize_selected_path(&self.selection)
    }

    /// Start an upload of the selected file into `hub_name`.
    ///
    /// Returns `None` (and issues nothing) when no file is selected or an
    /// upload is already running.
    pub fn begin(&mut self, hub_name: &str) -> Option<Upload> {
        if self.in_progress {
            return None;
        }
        let path = self.selected_path()?;
        self.in_progress = true;
        Some(Upload::new(hub_name, path))
    }

    /// Apply the resolved upload. The selection is reset whatever the outcome.
    pub fn finish(&mut self, result: ApiResult<UploadReceipt>) -> UploadAck {
        self.in_progress = false;
        self.selection.clear();
        UploadAck::for_result(&result)
    }

    /// Run a full upload inline. `None` means nothing was sent.
    pub async fn upload_document(&mut self, api: &dyn HubApi, hub_name: &str) -> Option<UploadAck> {
        let upload = self.begin(hub_name)?;
        let result = api.upload(&upload).await;
        Some(self.finish(result))
    }
}

/// Turn typed or pasted text into a path.
///
/// Accepts `file://` URLs (percent-decoded) and backslash-escaped spaces,
/// which is what terminals produce on drag and drop.
pub fn normalize_selected_path(text: &str) -> Option<PathBuf> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let path = if let Some(stripped) = text.strip_prefix("file://") {
        percent_decode(stripped)
    } else {
        text.replace("\\ ", " ")
    };

    let path = path.trim_matches(|c| c == '\'' || c == '"');
    if path.is_empty() {
        return None;
    }
    Some(PathBuf::from(path))
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::{ChatReply, Hub};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingApi {
        uploads: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl HubApi for CountingApi {
        async fn list_hubs(&self) -> ApiResult<Vec<Hub>> {
            Ok(Vec::new())
        }

        async fn create_hub(&self, _name: &str) -> ApiResult<Option<String>> {
            Ok(None)
        }

        async fn upload(&self, _upload: &Upload) -> ApiResult<UploadReceipt> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ApiError::Backend("Unsupported file type: png".to_string()))
            } else {
                Ok(UploadReceipt {
                    message: Some("ok".to_string()),
                    chunks: Some(4),
                })
            }
        }

        async fn chat(&self, _hub_name: &str, _message: &str) -> ApiResult<ChatReply> {
            unreachable!("upload tests never chat")
        }
    }

    #[test]
    fn test_no_selection_issues_nothing() {
        let mut state = UploadState::new();
        assert!(state.begin("Finance").is_none());
        state.set_selection("   ");
        assert!(state.begin("Finance").is_none());
        assert!(!state.is_in_progress());
    }

    #[test]
    fn test_in_progress_blocks_reinvocation() {
        let mut state = UploadState::new();
        state.set_selection("/tmp/a.pdf");
        let upload = state.begin("Finance").unwrap();
        assert_eq!(upload, Upload::new("Finance", "/tmp/a.pdf"));
        assert!(state.is_in_progress());

        assert!(state.begin("Finance").is_none());
    }

    #[test]
    fn test_finish_resets_selection_on_both_outcomes() {
        let mut state = UploadState::new();
        state.set_selection("/tmp/a.pdf");
        state.begin("Finance").unwrap();
        let ack = state.finish(Ok(UploadReceipt::default()));
        assert!(ack.success);
        assert_eq!(ack.message, "File uploaded and processed successfully!");
        assert_eq!(state.selection(), "");
        assert!(!state.is_in_progress());

        state.set_selection("/tmp/a.pdf");
        state.begin("Finance").unwrap();
        let ack = state.finish(Err(ApiError::Backend("nope".to_string())));
        assert!(!ack.success);
        assert_eq!(ack.message, "Failed to upload file.");
        assert_eq!(state.selection(), "");

        // Same file can be picked again right away
        state.set_selection("/tmp/a.pdf");
        assert!(state.begin("Finance").is_some());
    }

    #[test]
    fn test_normalize_selected_path() {
        assert_eq!(
            normalize_selected_path("  /tmp/My\\ Docs/a.pdf "),
            Some(PathBuf::from("/tmp/My Docs/a.pdf"))
        );
        assert_eq!(
            normalize_selected_path("file:///tmp/My%20Docs/a.pdf"),
            Some(PathBuf::from("/tmp/My Docs/a.pdf"))
        );
        assert_eq!(
            normalize_selected_path("'/tmp/quoted.txt'"),
            Some(PathBuf::from("/tmp/quoted.txt"))
        );
        assert_eq!(normalize_selected_path("file://%zz"), Some(PathBuf::from("%zz")));
        assert_eq!(normalize_selected_path(""), None);
    }

    #[tokio::test]
    async fn test_upload_document_counts_one_request_per_attempt() {
        let api = CountingApi {
            uploads: AtomicUsize::new(0),
            fail: false,
        };
        let mut state = UploadState::new();

        assert!(state.upload_document(&api, "Finance").await.is_none());
        assert_eq!(api.uploads.load(Ordering::SeqCst), 0);

        state.set_selection("/tmp/report.pdf");
        let ack = state.upload_document(&api, "Finance").await.unwrap();
        assert!(ack.success);
        assert_eq!(api.uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_upload_document_failure_ack() {
        let api = CountingApi {
            uploads: AtomicUsize::new(0),
            fail: true,
        };
        let mut state = UploadState::new();
        state.set_selection("/tmp/photo.png");

        let ack = state.upload_document(&api, "Finance").await.unwrap();
        assert_eq!(ack.message, UPLOAD_FAILURE_ACK);
        assert!(!state.is_in_progress());
    }
}
