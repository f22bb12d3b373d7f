//! Site path resolution.
//!
//! A document's path is the slugified titles of its ancestors (root first)
//! followed by its own slugified title, joined with `/`. The walk is a pure
//! lookup over the id-keyed document index and is bounded by a visited set
//! so malformed parent chains fail instead of looping.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::error::SiteError;
use crate::page::{Document, Format};

/// Slugify a title: lowercase, spaces to hyphens. Nothing else changes.
#[must_use]
pub fn slugify(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// Strip a title's recognized format extension.
///
/// Ancestor titles contribute directory-style segments, so `Parent.html`
/// becomes the segment `parent`. Markdown's empty extension strips nothing.
fn strip_extension(title: &str) -> &str {
    let extension = Format::from_title(title).extension();
    title.strip_suffix(extension).unwrap_or(title)
}

/// Collect a document's slugified ancestor titles in root-to-parent order.
///
/// The document's own title is not included.
pub fn ancestor_prefix(
    document: &Document,
    index: &HashMap<Uuid, Document>,
) -> Result<Vec<String>, SiteError> {
    let mut segments = Vec::new();
    let mut visited = HashSet::new();
    let mut parent = document.parent_document_id;

    while let Some(parent_id) = parent {
        if !visited.insert(parent_id) {
            return Err(SiteError::ParentCycle { id: document.id });
        }
        let ancestor = index.get(&parent_id).ok_or(SiteError::MissingParent {
            id: document.id,
            parent: parent_id,
        })?;
        segments.push(slugify(strip_extension(&ancestor.title)));
        parent = ancestor.parent_document_id;
    }

    segments.reverse();
    Ok(segments)
}

/// Resolve a document's full site path: ancestor prefix plus its own slug.
pub fn resolve_path(
    document: &Document,
    index: &HashMap<Uuid, Document>,
) -> Result<String, SiteError> {
    let mut segments = ancestor_prefix(document, index)?;
    segments.push(slugify(&document.title));
    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn doc(title: &str, parent: Option<Uuid>) -> Document {
        Document {
            id: Uuid::new_v4(),
            title: title.to_owned(),
            text: String::new(),
            parent_document_id: parent,
        }
    }

    fn index_of(docs: &[Document]) -> HashMap<Uuid, Document> {
        docs.iter().map(|d| (d.id, d.clone())).collect()
    }

    #[test]
    fn slugify_lowercases_and_hyphenates_spaces() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("API_Reference.html"), "api_reference.html");
    }

    #[test]
    fn slugify_is_idempotent() {
        let once = slugify("My First Page");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn root_document_has_no_prefix() {
        let root = doc("Parent.html", None);
        let index = index_of(std::slice::from_ref(&root));

        assert_eq!(ancestor_prefix(&root, &index).unwrap(), Vec::<String>::new());
        assert_eq!(resolve_path(&root, &index).unwrap(), "parent.html");
    }

    #[test]
    fn prefix_has_one_segment_per_ancestor_in_root_order() {
        let grandparent = doc("Top Level", None);
        let parent = doc("Middle", Some(grandparent.id));
        let child = doc("Leaf", Some(parent.id));
        let index = index_of(&[grandparent, parent, child.clone()]);

        assert_eq!(
            ancestor_prefix(&child, &index).unwrap(),
            vec!["top-level".to_owned(), "middle".to_owned()]
        );
        assert_eq!(resolve_path(&child, &index).unwrap(), "top-level/middle/leaf");
    }

    #[test]
    fn ancestor_segment_drops_format_extension() {
        let parent = doc("Parent.html", None);
        let child = doc("Child", Some(parent.id));
        let index = index_of(&[parent.clone(), child.clone()]);

        // The parent keeps its extension on its own page but contributes a
        // directory-style segment to descendants.
        assert_eq!(resolve_path(&parent, &index).unwrap(), "parent.html");
        assert_eq!(resolve_path(&child, &index).unwrap(), "parent/child");
    }

    #[test]
    fn missing_parent_is_an_error() {
        let orphan = doc("Orphan", Some(Uuid::new_v4()));
        let index = index_of(std::slice::from_ref(&orphan));

        let err = resolve_path(&orphan, &index).unwrap_err();
        assert!(matches!(err, SiteError::MissingParent { id, .. } if id == orphan.id));
    }

    #[test]
    fn parent_cycle_is_detected() {
        let mut a = doc("A", None);
        let mut b = doc("B", None);
        a.parent_document_id = Some(b.id);
        b.parent_document_id = Some(a.id);
        let index = index_of(&[a.clone(), b]);

        let err = resolve_path(&a, &index).unwrap_err();
        assert!(matches!(err, SiteError::ParentCycle { id } if id == a.id));
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let mut a = doc("A", None);
        a.parent_document_id = Some(a.id);
        let index = index_of(std::slice::from_ref(&a));

        assert!(matches!(
            resolve_path(&a, &index),
            Err(SiteError::ParentCycle { .. })
        ));
    }
}
