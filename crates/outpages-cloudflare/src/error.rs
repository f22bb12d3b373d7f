//! Error types for Cloudflare Pages deployment.

/// Error from a deployment operation.
///
/// Every variant is fatal to the build; failed uploads and failed publishes
/// leave no new deployment live.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// HTTP request failed (network error, timeout, malformed response).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// JSON serialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Upload token request was rejected.
    #[error("upload token request failed: {status} - {body}")]
    UploadToken {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// An asset batch upload was rejected.
    #[error("asset upload failed for batch {batch}: {status} - {body}")]
    BatchUpload {
        /// Zero-based index of the failed batch.
        batch: usize,
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Deployment creation was rejected.
    #[error("deployment creation failed: {status} - {body}")]
    Deployment {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },
}
