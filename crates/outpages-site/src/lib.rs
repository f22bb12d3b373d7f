//! Site build pipeline: wiki documents in, deployable pages out.
//!
//! Turns a flat collection of [`Document`]s (a parent-pointer forest) into an
//! ordered set of [`Page`]s ready for content-addressed upload:
//!
//! - [`Format`] is derived from the document title's suffix; markdown is the
//!   suffixless default.
//! - Paths come from slugified ancestor titles plus the document's own title.
//! - The document titled `template.html` supplies the HTML shell for rendered
//!   pages; a built-in fallback is used when it is absent.
//! - Embedded binary attachments are fetched through the [`AttachmentStore`]
//!   seam and become flat, id-addressed pages of their own.
//!
//! The crate performs no network I/O itself; callers supply an
//! [`AttachmentStore`] implementation (see `outpages-outline`).

mod attachments;
mod builder;
mod error;
mod markdown;
mod page;
mod paths;
mod renderer;
mod template;

pub use attachments::{ATTACHMENT_PREFIX, AttachmentError, AttachmentStore, ResolvedAttachment};
pub use builder::SiteBuilder;
pub use error::SiteError;
pub use page::{Document, Format, Page};
pub use paths::{ancestor_prefix, resolve_path, slugify};
pub use template::{TEMPLATE_DOCUMENT_TITLE, Template};
