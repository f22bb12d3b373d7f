//! Error types for the Outline API client.

use uuid::Uuid;

/// Error from Outline API operations.
#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    /// HTTP request failed (network error, timeout, malformed response).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// The attachment redirect lookup answered without a `Location` header.
    #[error("attachment {id} redirect response (status {status}) has no Location header")]
    MissingLocation {
        /// Attachment id.
        id: Uuid,
        /// HTTP status of the redirect response.
        status: u16,
    },

    /// An attachment fetch response carried no `Content-Type` header.
    #[error("attachment {id} response has no Content-Type header")]
    MissingContentType {
        /// Attachment id.
        id: Uuid,
    },
}
