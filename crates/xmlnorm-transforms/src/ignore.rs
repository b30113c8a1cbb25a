#![forbid(unsafe_code)]

//! Ignore filter.
//!
//! Removes every element whose local name is in the ignore set, together
//! with its descendants, wherever it occurs in the document. Text left on
//! either side of a removed element is merged, and a parent left holding
//! only whitespace ends up empty, so a document with ignored elements
//! matches the same document written without them.

use crate::pipeline::{Transform, TransformData};
use crate::structural::tidy_text;
use std::collections::HashSet;
use xmlnorm_core::Error;
use xmlnorm_xml::{Element, XmlNode};

pub struct IgnoreTransform {
    names: HashSet<String>,
}

impl IgnoreTransform {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    fn is_ignored(&self, element: &Element) -> bool {
        self.names.contains(&element.name)
    }
}

impl Transform for IgnoreTransform {
    fn kind(&self) -> &'static str {
        "ignore"
    }

    fn execute(&self, input: TransformData) -> Result<TransformData, Error> {
        let mut doc = input.into_tree()?;
        if self.is_ignored(&doc.root) {
            return Err(Error::Transform(format!(
                "ignore filter would remove the document element <{}>",
                doc.root.name
            )));
        }
        let removed = remove_subtrees(&mut doc.root, self);
        tracing::trace!(removed, "ignore filter applied");
        Ok(TransformData::Tree(doc))
    }
}

/// Drop ignored children of `element`, recursing into the ones kept.
/// Returns how many subtrees were removed.
fn remove_subtrees(element: &mut Element, filter: &IgnoreTransform) -> usize {
    let before = element.children.len();
    element
        .children
        .retain(|child| !matches!(child, XmlNode::Element(e) if filter.is_ignored(e)));
    let mut removed = before - element.children.len();
    if removed > 0 {
        tidy_text(&mut element.children);
    }
    for child in &mut element.children {
        if let XmlNode::Element(e) = child {
            removed += remove_subtrees(e, filter);
        }
    }
    removed
}
