//! Error types for the site build pipeline.

use uuid::Uuid;

use crate::attachments::AttachmentError;

/// Error from site building or rendering.
///
/// Any variant aborts the whole build; there is no partial-success mode.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// A document references a parent absent from the collection.
    #[error("document {id} references missing parent {parent}")]
    MissingParent {
        /// Document whose ancestor walk failed.
        id: Uuid,
        /// The parent id that was not found.
        parent: Uuid,
    },

    /// A cycle was detected while walking a document's ancestors.
    #[error("cycle in parent chain of document {id}")]
    ParentCycle {
        /// Document whose ancestor walk failed.
        id: Uuid,
    },

    /// A document is missing the fenced code block its format requires.
    #[error("document '{title}' has no fenced `{language}` code block")]
    MissingCodeBlock {
        /// Title of the offending document.
        title: String,
        /// Expected fence language tag.
        language: String,
    },

    /// A binary-format document contains no attachment reference.
    #[error("document '{title}' contains no attachment reference")]
    MissingAttachment {
        /// Title of the offending document.
        title: String,
    },

    /// An attachment reference does not carry a valid id.
    #[error("invalid attachment reference: {reference}")]
    InvalidAttachmentRef {
        /// The raw image destination.
        reference: String,
    },

    /// A fetched attachment's MIME type is not in the format table.
    #[error("unrecognized attachment MIME type: {0}")]
    UnknownMimeType(String),

    /// Two primary pages resolved to the same site path.
    #[error("duplicate page path: {0}")]
    DuplicatePath(String),

    /// Attachment resolution failed upstream.
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
}
