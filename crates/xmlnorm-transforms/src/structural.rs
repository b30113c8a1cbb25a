#![forbid(unsafe_code)]

//! Baseline structural normalization.
//!
//! Applied to every document regardless of configuration:
//! - attributes are ordered by (namespace URI, local name), unqualified
//!   attributes first
//! - namespace declarations are ordered by prefix, default namespace first
//! - adjacent text nodes are merged
//! - text nodes made only of whitespace are dropped, wherever they occur
//!
//! The result does not depend on the input's attribute order or
//! indentation, and running it twice changes nothing. `<a>  </a>` and
//! `<a/>` come out the same. In mixed content a space standing alone
//! between two elements is lost too: `<p><b>x</b> <i>y</i></p>` is written
//! as `<p><b>x</b><i>y</i></p>`.

use crate::pipeline::{Transform, TransformData};
use std::cmp::Ordering;
use xmlnorm_core::Error;
use xmlnorm_xml::{Attribute, Element, NsDecl, XmlNode};

pub struct StructuralSortTransform;

impl Transform for StructuralSortTransform {
    fn kind(&self) -> &'static str {
        "structural-sort"
    }

    fn execute(&self, input: TransformData) -> Result<TransformData, Error> {
        let mut doc = input.into_tree()?;
        doc.root.walk_post_order_mut(&mut normalize_element);
        Ok(TransformData::Tree(doc))
    }
}

fn normalize_element(element: &mut Element) {
    element.attributes.sort_by(compare_attributes);
    element.namespaces.sort_by(compare_ns_decls);

    tidy_text(&mut element.children);
}

/// Merge adjacent text nodes, then drop the ones that are only whitespace.
pub(crate) fn tidy_text(children: &mut Vec<XmlNode>) {
    merge_text(children);
    children.retain(|child| !child.is_whitespace());
}

fn merge_text(children: &mut Vec<XmlNode>) {
    let mut merged: Vec<XmlNode> = Vec::with_capacity(children.len());
    for child in children.drain(..) {
        if let XmlNode::Text(t) = &child {
            if t.is_empty() {
                continue;
            }
            if let Some(XmlNode::Text(prev)) = merged.last_mut() {
                prev.push_str(t);
                continue;
            }
        }
        merged.push(child);
    }
    *children = merged;
}

fn compare_attributes(a: &Attribute, b: &Attribute) -> Ordering {
    match (a.namespace.as_deref(), b.namespace.as_deref()) {
        (None, None) => a.name.cmp(&b.name),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(y).then_with(|| a.name.cmp(&b.name)),
    }
}

fn compare_ns_decls(a: &NsDecl, b: &NsDecl) -> Ordering {
    match (a.prefix.as_deref(), b.prefix.as_deref()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(y),
    }
}
