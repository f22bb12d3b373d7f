//! Site building: documents in, ordered pages out.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::attachments::AttachmentStore;
use crate::error::SiteError;
use crate::page::{Document, Format, Page};
use crate::paths::resolve_path;
use crate::renderer::render_document;
use crate::template::{TEMPLATE_DOCUMENT_TITLE, Template};

/// Builds the full page set for one document collection.
///
/// Isolates the template document, derives each remaining document's format
/// and path, renders it, and flattens primary and attachment pages into one
/// ordered collection. Output order is stable with respect to the input
/// document order (primary page first, that document's attachments after it).
pub struct SiteBuilder<'a> {
    attachments: &'a dyn AttachmentStore,
}

impl<'a> SiteBuilder<'a> {
    /// Create a builder that resolves attachments through `attachments`.
    #[must_use]
    pub fn new(attachments: &'a dyn AttachmentStore) -> Self {
        Self { attachments }
    }

    /// Build all pages for `documents`.
    ///
    /// Page paths are unique across the result: a repeated attachment
    /// (same id, same bytes) is emitted once, while two primary pages
    /// resolving to the same path are a configuration error.
    pub fn build(&self, documents: &[Document]) -> Result<Vec<Page>, SiteError> {
        let mut template = None;
        let mut index = HashMap::new();
        for document in documents {
            if document.title == TEMPLATE_DOCUMENT_TITLE {
                template = Some(Template::from_document(document)?);
            } else {
                index.insert(document.id, document.clone());
            }
        }

        if template.is_none() {
            debug!("no template document; using built-in fallback");
        }
        let template = template.unwrap_or_default();

        info!(documents = index.len(), "building site");

        let mut pages = Vec::new();
        let mut used_paths = HashSet::new();
        for document in documents
            .iter()
            .filter(|d| d.title != TEMPLATE_DOCUMENT_TITLE)
        {
            let format = Format::from_title(&document.title);
            let path = resolve_path(document, &index)?;
            debug!(title = %document.title, ?format, path = %path, "rendering document");

            let rendered =
                render_document(document, format, path, &template, self.attachments)?;

            if !used_paths.insert(rendered.primary.path.clone()) {
                return Err(SiteError::DuplicatePath(rendered.primary.path));
            }
            pages.push(rendered.primary);

            for attachment in rendered.attachments {
                // Same attachment id means same path and same bytes.
                if used_paths.insert(attachment.path.clone()) {
                    pages.push(attachment);
                }
            }
        }

        info!(pages = pages.len(), "site built");
        Ok(pages)
    }
}
