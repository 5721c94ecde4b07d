use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File types the backend knows how to ingest. Advisory only: the client
/// never refuses to send a file because of its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    Text,
    Csv,
    Spreadsheet,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Pdf,
        DocumentKind::Word,
        DocumentKind::Text,
        DocumentKind::Csv,
        DocumentKind::Spreadsheet,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Word => "docx",
            DocumentKind::Text => "txt",
            DocumentKind::Csv => "csv",
            DocumentKind::Spreadsheet => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentKind::Text => "text/plain",
            DocumentKind::Csv => "text/csv",
            DocumentKind::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        Self::ALL.into_iter().find(|k| k.extension() == ext)
    }

    /// Human-readable list for prompts, e.g. ".pdf, .docx, .txt, .csv, .xlsx"
    pub fn accepted_list() -> String {
        Self::ALL
            .iter()
            .map(|k| format!(".{}", k.extension()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A file queued for ingestion into one hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub hub_name: String,
    pub path: PathBuf,
}

impl Upload {
    pub fn new(hub_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            hub_name: hub_name.into(),
            path: path.into(),
        }
    }

    /// Name sent in the multipart `file` part
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string())
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_path(&self.path)
    }
}

/// Successful ingestion summary returned by `POST /upload`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub chunks: Option<u64>,
}

/// Raw `POST /upload` body. The backend answers unsupported files with a
/// 200 carrying only an `error` key.
#[derive(Debug, Deserialize)]
pub(crate) struct UploadBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub receipt: UploadReceipt,
}
