//! Markdown parsing helpers.
//!
//! Everything here works on the `pulldown-cmark` event stream: fenced-block
//! extraction, H1 title extraction, and attachment-image rewriting ahead of
//! HTML rendering.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use uuid::Uuid;

use crate::attachments::{ATTACHMENT_PREFIX, AttachmentStore, attachment_page, parse_attachment_id};
use crate::error::SiteError;
use crate::page::{Document, Page};

/// Parser options used for every document body. Tables are the one extension
/// the source wiki emits.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
}

/// Literal text of the first fenced code block tagged `language`.
pub(crate) fn extract_code(text: &str, language: &str) -> Option<String> {
    let mut inside = false;
    let mut code = String::new();
    for event in Parser::new_ext(text, parser_options()) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                if info.trim() == language =>
            {
                inside = true;
            }
            Event::End(TagEnd::CodeBlock) if inside => return Some(code),
            Event::Text(chunk) if inside => code.push_str(&chunk),
            _ => {}
        }
    }
    None
}

/// Plain text of the first level-1 heading, if any.
fn first_h1_text(events: &[Event<'_>]) -> Option<String> {
    let mut inside = false;
    let mut title = String::new();
    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => inside = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) if inside => return Some(title),
            Event::Text(chunk) | Event::Code(chunk) if inside => title.push_str(chunk),
            _ => {}
        }
    }
    None
}

/// Id of the first attachment reference in a document body, if any.
///
/// Used for binary-format documents whose whole content is one attachment.
pub(crate) fn first_attachment_id(text: &str) -> Result<Option<Uuid>, SiteError> {
    for event in Parser::new_ext(text, parser_options()) {
        if let Event::Start(Tag::Image { dest_url, .. }) = event {
            if let Some(raw_id) = dest_url.strip_prefix(ATTACHMENT_PREFIX) {
                return parse_attachment_id(&dest_url, raw_id).map(Some);
            }
        }
    }
    Ok(None)
}

/// A rendered markdown body.
pub(crate) struct RenderedMarkdown {
    /// HTML for the document body (not yet template-wrapped).
    pub html: String,
    /// Title from the first H1, if present.
    pub title: Option<String>,
    /// Pages for attachments discovered in the body, in reference order.
    pub attachments: Vec<Page>,
}

/// Render a markdown body to HTML, resolving embedded attachments.
///
/// Attachment-referencing images are fetched through `store`, emitted as
/// flat pages, and their destinations rewritten in place to the attachment
/// page's absolute path before rendering.
pub(crate) fn render_markdown(
    document: &Document,
    store: &dyn AttachmentStore,
) -> Result<RenderedMarkdown, SiteError> {
    let mut events: Vec<Event<'_>> =
        Parser::new_ext(&document.text, parser_options()).collect();

    let mut attachments = Vec::new();
    for event in &mut events {
        if let Event::Start(Tag::Image { dest_url, .. }) = event {
            if let Some(raw_id) = dest_url.strip_prefix(ATTACHMENT_PREFIX) {
                let id = parse_attachment_id(dest_url, raw_id)?;
                let page = attachment_page(id, store)?;
                *dest_url = format!("/{}", page.path).into();
                attachments.push(page);
            }
        }
    }

    let title = first_h1_text(&events);

    let mut body = String::new();
    html::push_html(&mut body, events.into_iter());

    Ok(RenderedMarkdown {
        html: body,
        title,
        attachments,
    })
}
