//! HTML page template.
//!
//! The template is user-supplied through the document set itself: the one
//! document titled `template.html` carries it in a fenced `markup` block.
//! Without such a document a minimal built-in shell is used.

use crate::error::SiteError;
use crate::markdown::extract_code;
use crate::page::Document;

/// Title of the document that carries the site template.
pub const TEMPLATE_DOCUMENT_TITLE: &str = "template.html";

/// Built-in shell used when the collection has no template document.
const FALLBACK_TEMPLATE: &str = "<!doctype html>\n\
<html>\n\
<head>\n\
<title>{title}</title>\n\
</head>\n\
<body>\n\
{content}\n\
</body>\n\
</html>\n";

/// HTML shell with `{title}` and `{content}` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    html: String,
}

impl Template {
    /// The built-in fallback template.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            html: FALLBACK_TEMPLATE.to_owned(),
        }
    }

    /// Extract the template from the `template.html` document's fenced
    /// `markup` block.
    pub fn from_document(document: &Document) -> Result<Self, SiteError> {
        let html = extract_code(&document.text, "markup").ok_or_else(|| {
            SiteError::MissingCodeBlock {
                title: document.title.clone(),
                language: "markup".to_owned(),
            }
        })?;
        Ok(Self { html })
    }

    /// Substitute `{content}` only, leaving `{title}` untouched.
    ///
    /// Used for pages whose content is a literal HTML fragment.
    #[must_use]
    pub fn fill_content(&self, content: &str) -> String {
        self.html.replace("{content}", content)
    }

    /// Substitute `{content}`, then `{title}`.
    #[must_use]
    pub fn fill(&self, title: &str, content: &str) -> String {
        self.html
            .replace("{content}", content)
            .replace("{title}", title)
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::fallback()
    }
}
