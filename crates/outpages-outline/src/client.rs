//! Outline REST API client.

use std::time::Duration;

use outpages_site::{AttachmentError, AttachmentStore, Document, ResolvedAttachment};
use tracing::{debug, info};
use ureq::Agent;
use uuid::Uuid;

use crate::error::OutlineError;
use crate::types::{AttachmentRedirectRequest, DocumentsListRequest, DocumentsListResponse};

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Page size for `documents.list`; 100 is the Outline API maximum.
const LIST_LIMIT: u32 = 100;

/// Cap on attachment body size.
const MAX_ATTACHMENT_BYTES: u64 = 64 * 1024 * 1024;

/// Sent on every request.
const USER_AGENT: &str = concat!("outpages/", env!("CARGO_PKG_VERSION"));

/// Outline REST API client.
///
/// Redirects are never followed: the attachment redirect lookup needs the
/// 3xx response itself, and presigned attachment URLs answer directly.
pub struct OutlineClient {
    agent: Agent,
    base_url: String,
    api_token: String,
}

impl OutlineClient {
    /// Create a client for the Outline instance at `base_url`.
    ///
    /// `base_url` is the instance root, not including `/api`.
    #[must_use]
    pub fn new(base_url: &str, api_token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .max_redirects(0)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_token: api_token.to_owned(),
        }
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/api", self.base_url)
    }

    /// List all documents of a collection.
    pub fn list_documents(&self, collection_id: Uuid) -> Result<Vec<Document>, OutlineError> {
        let url = format!("{}/documents.list", self.api_url());

        let response = self
            .agent
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .header("Authorization", &format!("Bearer {}", self.api_token))
            .header("Accept", "application/json")
            .send_json(DocumentsListRequest {
                collection_id,
                limit: LIST_LIMIT,
            })?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(OutlineError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let response: DocumentsListResponse = body_reader.read_json()?;
        info!(
            collection = %collection_id,
            documents = response.data.len(),
            "loaded documents from Outline"
        );
        Ok(response.data)
    }

    /// Resolve an attachment id to its presigned download location.
    ///
    /// The lookup succeeds whenever the response carries a `Location` header,
    /// regardless of status class.
    fn attachment_location(&self, id: Uuid) -> Result<String, OutlineError> {
        let url = format!("{}/attachments.redirect", self.api_url());

        let response = self
            .agent
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .header("Authorization", &format!("Bearer {}", self.api_token))
            .send_json(AttachmentRedirectRequest { id })?;

        let status = response.status().as_u16();
        if let Some(location) = response
            .headers()
            .get("Location")
            .and_then(|value| value.to_str().ok())
        {
            return Ok(location.to_owned());
        }

        if status >= 400 {
            let body = response
                .into_body()
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(OutlineError::HttpResponse { status, body });
        }
        Err(OutlineError::MissingLocation { id, status })
    }

    /// Fetch an attachment: redirect lookup, then presigned download.
    fn fetch_attachment(&self, id: Uuid) -> Result<ResolvedAttachment, OutlineError> {
        let location = self.attachment_location(id)?;
        debug!(attachment = %id, "fetching attachment");

        // Presigned URL; no Outline auth.
        let response = self
            .agent
            .get(&location)
            .header("User-Agent", USER_AGENT)
            .call()?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response
                .into_body()
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(OutlineError::HttpResponse { status, body });
        }

        let mime_type = response
            .headers()
            .get("Content-Type")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .ok_or(OutlineError::MissingContentType { id })?;

        let bytes = response
            .into_body()
            .with_config()
            .limit(MAX_ATTACHMENT_BYTES)
            .read_to_vec()?;

        debug!(attachment = %id, bytes = bytes.len(), mime = %mime_type, "attachment fetched");
        Ok(ResolvedAttachment { bytes, mime_type })
    }
}

impl AttachmentStore for OutlineClient {
    fn resolve(&self, id: Uuid) -> Result<ResolvedAttachment, AttachmentError> {
        self.fetch_attachment(id)
            .map_err(|err| AttachmentError::new(id, err))
    }
}
