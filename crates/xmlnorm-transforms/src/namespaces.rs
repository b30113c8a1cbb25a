#![forbid(unsafe_code)]

//! Namespace removal.
//!
//! Drops every namespace declaration and binds every element and attribute
//! to its local name, so later stages can match on plain names.

use crate::pipeline::{Transform, TransformData};
use std::collections::HashSet;
use xmlnorm_core::Error;
use xmlnorm_xml::{Element, XmlNode};

pub struct RemoveNamespacesTransform;

impl Transform for RemoveNamespacesTransform {
    fn kind(&self) -> &'static str {
        "remove-namespaces"
    }

    fn execute(&self, input: TransformData) -> Result<TransformData, Error> {
        let mut doc = input.into_tree()?;
        strip(&mut doc.root);
        Ok(TransformData::Tree(doc))
    }
}

fn strip(element: &mut Element) {
    element.prefix = None;
    element.namespace = None;
    element.namespaces.clear();

    // `a:id` and `b:id` both become `id`; the first one wins.
    let mut seen = HashSet::new();
    element.attributes.retain_mut(|attr| {
        attr.prefix = None;
        attr.namespace = None;
        seen.insert(attr.name.clone())
    });

    for child in &mut element.children {
        if let XmlNode::Element(e) = child {
            strip(e);
        }
    }
}
