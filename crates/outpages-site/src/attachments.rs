//! Attachment resolution seam.
//!
//! Rendering discovers attachment references in document bodies but never
//! talks to the network itself; an [`AttachmentStore`] implementation (the
//! Outline client in production, a mock in tests) supplies the bytes.

use uuid::Uuid;

use crate::error::SiteError;
use crate::page::{Format, Page};

/// Image destination prefix marking an embedded attachment reference.
pub const ATTACHMENT_PREFIX: &str = "/api/attachments.redirect?id=";

/// A fetched attachment: raw bytes plus the MIME type reported upstream.
#[derive(Debug, Clone)]
pub struct ResolvedAttachment {
    /// Attachment bytes.
    pub bytes: Vec<u8>,
    /// MIME type from the fetch response.
    pub mime_type: String,
}

/// Resolves attachment ids to their bytes.
pub trait AttachmentStore {
    /// Fetch the attachment with the given id.
    fn resolve(&self, id: Uuid) -> Result<ResolvedAttachment, AttachmentError>;
}

/// Error resolving an attachment through an [`AttachmentStore`].
#[derive(Debug, thiserror::Error)]
#[error("attachment {id} could not be resolved: {source}")]
pub struct AttachmentError {
    /// Id of the attachment that failed.
    pub id: Uuid,
    /// Backend-specific cause.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl AttachmentError {
    /// Wrap a backend error with the failing attachment id.
    pub fn new(
        id: Uuid,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            id,
            source: source.into(),
        }
    }
}

/// Parse the attachment id out of a reference destination.
pub(crate) fn parse_attachment_id(destination: &str, raw_id: &str) -> Result<Uuid, SiteError> {
    Uuid::parse_str(raw_id).map_err(|_| SiteError::InvalidAttachmentRef {
        reference: destination.to_owned(),
    })
}

/// Fetch an attachment and turn it into a flat, id-addressed page.
///
/// The page path is the attachment id plus the extension derived from the
/// reported MIME type; no ancestor prefix applies to attachments.
pub(crate) fn attachment_page(
    id: Uuid,
    store: &dyn AttachmentStore,
) -> Result<Page, SiteError> {
    let resolved = store.resolve(id)?;
    let format = Format::from_mime(&resolved.mime_type)
        .ok_or_else(|| SiteError::UnknownMimeType(resolved.mime_type.clone()))?;
    Ok(Page {
        format,
        id,
        path: format!("{id}{}", format.extension()),
        title: String::new(),
        content: resolved.bytes,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use super::*;

    /// In-memory attachment store for tests.
    #[derive(Default)]
    pub(crate) struct MockAttachments {
        entries: HashMap<Uuid, ResolvedAttachment>,
    }

    impl MockAttachments {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with(mut self, id: Uuid, mime_type: &str, bytes: &[u8]) -> Self {
            self.entries.insert(
                id,
                ResolvedAttachment {
                    bytes: bytes.to_vec(),
                    mime_type: mime_type.to_owned(),
                },
            );
            self
        }
    }

    impl AttachmentStore for MockAttachments {
        fn resolve(&self, id: Uuid) -> Result<ResolvedAttachment, AttachmentError> {
            self.entries
                .get(&id)
                .cloned()
                .ok_or_else(|| AttachmentError::new(id, "not found"))
        }
    }
}
