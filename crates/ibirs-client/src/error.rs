//! Client error kinds.
//!
//! Two of these are the recoverable failures a schema fetch can surface
//! (`Transport`, `Parse`); `Api` covers wire-level rejections on the
//! returncode-checked operations (sign-on, resource listing). Missing
//! *optional* response fields are never errors anywhere in this crate;
//! they resolve to empty strings/lists at the extraction layer.

/// Errors surfaced by [`IbfsClient`](crate::IbfsClient) operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request did not complete with a success status (connection
    /// failure, timeout, or a non-2xx response).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be parsed as well-formed XML.
    #[error("malformed XML response: {0}")]
    Parse(String),

    /// The service answered, but with a failure returncode.
    #[error("IBFS error {code}: {message}")]
    Api { code: String, message: String },

    /// Client construction or configuration failure.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// True for failures worth retrying at the caller's discretion
    /// (the client itself never retries).
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}
