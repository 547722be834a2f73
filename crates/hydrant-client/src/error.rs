use thiserror::Error;

/// How much of an error body travels with a [`FetchError::Status`].
const BODY_EXCERPT_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the remote source. Aborts the whole
    /// retrieval; no partial results survive.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload had no list-valued top-level field to hold result rows.
    #[error("response has no list-valued field holding result rows")]
    MissingRecordList,
}

impl FetchError {
    /// Status error with the body truncated to a diagnostic excerpt.
    pub(crate) fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: body.chars().take(BODY_EXCERPT_CHARS).collect(),
        }
    }
}
