//! Page and document model.

use serde::Deserialize;
use uuid::Uuid;

/// A document as returned by the source wiki.
///
/// Documents form a forest via `parent_document_id`; the id-keyed index built
/// by the site builder is the only representation of that hierarchy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document id.
    pub id: Uuid,
    /// Document title. The suffix encodes the intended page format.
    pub title: String,
    /// Raw markup body.
    #[serde(default)]
    pub text: String,
    /// Parent document id, if this document is nested.
    #[serde(default)]
    pub parent_document_id: Option<Uuid>,
}

/// Output format of a page.
///
/// Derived from a document title's suffix ([`Format::from_title`]) or from a
/// fetched attachment's MIME type ([`Format::from_mime`]). Markdown has no
/// suffix and is the fallback; it renders to HTML and therefore serves the
/// HTML content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Html,
    Css,
    Javascript,
    Jpeg,
    Png,
    Webp,
    Text,
    Woff2,
    Markdown,
}

impl Format {
    /// All formats in suffix-probe order. Markdown's empty extension matches
    /// every title, so it must stay last.
    const ALL: [Self; 9] = [
        Self::Html,
        Self::Css,
        Self::Javascript,
        Self::Jpeg,
        Self::Png,
        Self::Webp,
        Self::Text,
        Self::Woff2,
        Self::Markdown,
    ];

    /// Canonical file extension, including the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => ".html",
            Self::Css => ".css",
            Self::Javascript => ".js",
            Self::Jpeg => ".jpg",
            Self::Png => ".png",
            Self::Webp => ".webp",
            Self::Text => ".txt",
            Self::Woff2 => ".woff2",
            Self::Markdown => "",
        }
    }

    /// MIME type served for this format.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Html | Self::Markdown => "text/html",
            Self::Css => "text/css",
            Self::Javascript => "text/javascript",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Text => "text/plain",
            Self::Woff2 => "font/woff2",
        }
    }

    /// Derive the format from a document title's suffix.
    ///
    /// Titles without a recognized suffix are markdown.
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|format| title.ends_with(format.extension()))
            .unwrap_or(Self::Markdown)
    }

    /// Derive the format from a MIME type, or `None` if unrecognized.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.mime_type() == mime)
    }
}

/// One unit of final site output.
///
/// Either a primary page (one per qualifying document) or a derived
/// attachment page (one per distinct embedded binary). `path` is
/// slash-separated without a leading slash and unique across a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Output format.
    pub format: Format,
    /// Id of the originating document or attachment.
    pub id: Uuid,
    /// Public site path, without leading slash.
    pub path: String,
    /// Page title; empty for attachment pages.
    pub title: String,
    /// Final page bytes.
    pub content: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_title_by_suffix() {
        assert_eq!(Format::from_title("style.css"), Format::Css);
        assert_eq!(Format::from_title("index.html"), Format::Html);
        assert_eq!(Format::from_title("app.js"), Format::Javascript);
        assert_eq!(Format::from_title("font.woff2"), Format::Woff2);
    }

    #[test]
    fn format_from_title_falls_back_to_markdown() {
        assert_eq!(Format::from_title("Getting Started"), Format::Markdown);
        assert_eq!(Format::from_title("notes.markdown"), Format::Markdown);
    }

    #[test]
    fn format_from_mime_matches_table() {
        assert_eq!(Format::from_mime("image/png"), Some(Format::Png));
        assert_eq!(Format::from_mime("font/woff2"), Some(Format::Woff2));
        assert_eq!(Format::from_mime("application/pdf"), None);
    }

    #[test]
    fn markdown_serves_html() {
        assert_eq!(Format::Markdown.mime_type(), "text/html");
        assert_eq!(Format::Markdown.extension(), "");
    }

    #[test]
    fn html_mime_resolves_to_html_not_markdown() {
        // Html and Markdown share a MIME type; the table probe must prefer Html.
        assert_eq!(Format::from_mime("text/html"), Some(Format::Html));
    }

    #[test]
    fn document_deserializes_from_wire_names() {
        let doc: Document = serde_json::from_str(
            r##"{
                "id": "a6b0e7d4-3f70-4df0-b57f-7e2a5cf60a54",
                "title": "Child",
                "text": "# Hi",
                "parentDocumentId": "0adf1ac7-4b9d-4d4c-b9e2-3a478a1f9cb2"
            }"##,
        )
        .unwrap();
        assert_eq!(doc.title, "Child");
        assert!(doc.parent_document_id.is_some());
    }
}
