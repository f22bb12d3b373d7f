//! Per-format content rendering.
//!
//! One closed dispatch over [`Format`]: code-bearing documents (HTML, CSS,
//! JavaScript) contribute the literal text of a fenced block, markdown is
//! rendered through the template, and every other format passes an embedded
//! attachment's bytes straight through.

use crate::attachments::{AttachmentStore, attachment_page};
use crate::error::SiteError;
use crate::markdown::{extract_code, first_attachment_id, render_markdown};
use crate::page::{Document, Format, Page};
use crate::template::Template;

/// Pages produced by rendering one document.
#[derive(Debug)]
pub(crate) struct RenderedPages {
    /// The document's own page.
    pub primary: Page,
    /// Attachment pages discovered while rendering, in reference order.
    pub attachments: Vec<Page>,
}

/// Render one document into its primary page plus attachment pages.
pub(crate) fn render_document(
    document: &Document,
    format: Format,
    path: String,
    template: &Template,
    store: &dyn AttachmentStore,
) -> Result<RenderedPages, SiteError> {
    let mut attachments = Vec::new();

    let content = match format {
        Format::Html => {
            let markup = require_code(document, "markup")?;
            template.fill_content(&markup).into_bytes()
        }
        Format::Css => require_code(document, "css")?.into_bytes(),
        Format::Javascript => require_code(document, "javascript")?.into_bytes(),
        Format::Markdown => {
            let rendered = render_markdown(document, store)?;
            attachments = rendered.attachments;
            let html = template.fill(rendered.title.as_deref().unwrap_or(""), &rendered.html);
            // Artifact of a backslash-only paragraph in the source wiki's
            // export; stripped literally. Confirm against real content before
            // generalizing.
            html.replace("<p>\\</p>", "").into_bytes()
        }
        Format::Jpeg | Format::Png | Format::Webp | Format::Text | Format::Woff2 => {
            let id = first_attachment_id(&document.text)?.ok_or_else(|| {
                SiteError::MissingAttachment {
                    title: document.title.clone(),
                }
            })?;
            attachment_page(id, store)?.content
        }
    };

    Ok(RenderedPages {
        primary: Page {
            format,
            id: document.id,
            path,
            title: document.title.clone(),
            content,
        },
        attachments,
    })
}

fn require_code(document: &Document, language: &str) -> Result<String, SiteError> {
    extract_code(&document.text, language).ok_or_else(|| SiteError::MissingCodeBlock {
        title: document.title.clone(),
        language: language.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use super::*;
    use crate::attachments::ATTACHMENT_PREFIX;
    use crate::attachments::testing::MockAttachments;

    fn doc(title: &str, text: &str) -> Document {
        Document {
            id: Uuid::new_v4(),
            title: title.to_owned(),
            text: text.to_owned(),
            parent_document_id: None,
        }
    }

    fn render(
        document: &Document,
        format: Format,
        store: &MockAttachments,
    ) -> Result<RenderedPages, SiteError> {
        render_document(
            document,
            format,
            "some/path".to_owned(),
            &Template::fallback(),
            store,
        )
    }

    #[test]
    fn html_page_wraps_markup_block_without_title() {
        let document = doc("index.html", "```markup\n<h1>P</h1>\n```\n");
        let pages = render(&document, Format::Html, &MockAttachments::new()).unwrap();

        let html = String::from_utf8(pages.primary.content).unwrap();
        assert!(html.contains("<h1>P</h1>"));
        // HTML pages substitute {content} only.
        assert!(html.contains("{title}"));
        assert!(pages.attachments.is_empty());
    }

    #[test]
    fn css_page_is_verbatim_block_text() {
        let document = doc("main.css", "```css\nbody { margin: 0 }\n```\n");
        let pages = render(&document, Format::Css, &MockAttachments::new()).unwrap();

        assert_eq!(pages.primary.content, b"body { margin: 0 }\n");
    }

    #[test]
    fn javascript_page_is_verbatim_block_text() {
        let document = doc("app.js", "```javascript\nconsole.log(1);\n```\n");
        let pages = render(&document, Format::Javascript, &MockAttachments::new()).unwrap();

        assert_eq!(pages.primary.content, b"console.log(1);\n");
    }

    #[test]
    fn missing_code_block_fails_the_build() {
        let document = doc("main.css", "no fence at all");
        let err = render(&document, Format::Css, &MockAttachments::new()).unwrap_err();
        assert!(matches!(
            err,
            SiteError::MissingCodeBlock { language, .. } if language == "css"
        ));
    }

    #[test]
    fn markdown_page_substitutes_title_and_content() {
        let document = doc("Intro", "# Hello\n\nBody text.\n");
        let pages = render(&document, Format::Markdown, &MockAttachments::new()).unwrap();

        let html = String::from_utf8(pages.primary.content).unwrap();
        assert!(html.contains("<title>Hello</title>"));
        assert!(html.contains("<p>Body text.</p>"));
    }

    #[test]
    fn markdown_without_h1_gets_empty_title() {
        let document = doc("Intro", "just a paragraph\n");
        let pages = render(&document, Format::Markdown, &MockAttachments::new()).unwrap();

        let html = String::from_utf8(pages.primary.content).unwrap();
        assert!(html.contains("<title></title>"));
    }

    #[test]
    fn backslash_paragraph_artifact_is_stripped() {
        let document = doc("Intro", "before\n\n\\\n\nafter\n");
        let pages = render(&document, Format::Markdown, &MockAttachments::new()).unwrap();

        let html = String::from_utf8(pages.primary.content).unwrap();
        assert!(!html.contains("<p>\\</p>"));
        assert!(html.contains("<p>before</p>"));
        assert!(html.contains("<p>after</p>"));
    }

    #[test]
    fn markdown_round_trip_with_attachment() {
        let id = Uuid::new_v4();
        let store = MockAttachments::new().with(id, "image/png", b"png-bytes");
        let document = doc(
            "Gallery",
            &format!("# Hello\n\n![shot]({ATTACHMENT_PREFIX}{id})\n"),
        );

        let pages = render(&document, Format::Markdown, &store).unwrap();

        assert_eq!(pages.attachments.len(), 1);
        assert_eq!(pages.attachments[0].path, format!("{id}.png"));
        let html = String::from_utf8(pages.primary.content).unwrap();
        assert!(html.contains("<title>Hello</title>"));
        assert!(html.contains(&format!(r#"src="/{id}.png""#)));
    }

    #[test]
    fn binary_page_is_the_attachment_itself() {
        let id = Uuid::new_v4();
        let store = MockAttachments::new().with(id, "font/woff2", b"woff2-bytes");
        let document = doc(
            "body-font.woff2",
            &format!("![font]({ATTACHMENT_PREFIX}{id})\n"),
        );

        let pages = render(&document, Format::Woff2, &store).unwrap();

        assert_eq!(pages.primary.content, b"woff2-bytes");
        assert_eq!(pages.primary.id, document.id);
        assert_eq!(pages.primary.path, "some/path");
        // The attachment *is* the page; no extra page is emitted.
        assert!(pages.attachments.is_empty());
    }

    #[test]
    fn binary_page_without_reference_fails() {
        let document = doc("photo.jpg", "nothing embedded");
        let err = render(&document, Format::Jpeg, &MockAttachments::new()).unwrap_err();
        assert!(matches!(err, SiteError::MissingAttachment { .. }));
    }
}
