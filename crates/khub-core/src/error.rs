use thiserror::Error;

/// Failure of a single backend operation.
///
/// The interaction contracts collapse every variant into one "operation
/// failed" outcome; the variants only exist so the log says what happened.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, TLS, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the backend
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// 2xx response whose body carries an `error` field
    #[error("backend reported an error: {0}")]
    Backend(String),

    /// Local file could not be read for upload
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid backend URL '{0}'")]
    InvalidUrl(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
