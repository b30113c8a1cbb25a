#![forbid(unsafe_code)]

//! List sorting.
//!
//! Beneath every element named `parent`, each run of adjacent list-item
//! children is put into canonical order: by tag name, then by the item's
//! serialized content, keeping document order among equal items.
//! Whitespace-only text between items does not end a run; any other node
//! does, and stays where it is.

use crate::pipeline::{Transform, TransformData};
use std::collections::HashSet;
use xmlnorm_core::Error;
use xmlnorm_xml::{writer, Element, XmlNode};

pub struct SortListTransform {
    parent: String,
    items: HashSet<String>,
}

impl SortListTransform {
    pub fn new<I, S>(parent: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parent: parent.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    fn is_item(&self, node: &XmlNode) -> bool {
        node.as_element().is_some_and(|e| self.items.contains(&e.name))
    }

    fn sort_runs(&self, element: &mut Element) -> usize {
        let children = &mut element.children;
        let mut runs = 0;
        let mut i = 0;
        while i < children.len() {
            if !self.is_item(&children[i]) {
                i += 1;
                continue;
            }
            let mut slots = vec![i];
            let mut j = i + 1;
            while j < children.len() {
                if self.is_item(&children[j]) {
                    slots.push(j);
                } else if !children[j].is_whitespace() {
                    break;
                }
                j += 1;
            }
            if slots.len() > 1 {
                reorder(children, &slots);
                runs += 1;
            }
            i = j;
        }
        runs
    }
}

impl Transform for SortListTransform {
    fn kind(&self) -> &'static str {
        "sort-list"
    }

    fn execute(&self, input: TransformData) -> Result<TransformData, Error> {
        let mut doc = input.into_tree()?;
        // Post-order: a list nested inside a same-named parent is sorted
        // before the outer one compares its items.
        let mut runs = 0;
        doc.root.walk_post_order_mut(&mut |element| {
            if element.name == self.parent {
                runs += self.sort_runs(element);
            }
        });
        tracing::trace!(parent = %self.parent, runs, "list sort applied");
        Ok(TransformData::Tree(doc))
    }
}

/// Sort the nodes at `slots` (all elements) among themselves.
fn reorder(children: &mut [XmlNode], slots: &[usize]) {
    let mut items: Vec<XmlNode> = slots
        .iter()
        .map(|&s| std::mem::replace(&mut children[s], XmlNode::Text(String::new())))
        .collect();
    items.sort_by_cached_key(|node| match node {
        XmlNode::Element(e) => (e.name.clone(), writer::element_to_string(e)),
        _ => (String::new(), String::new()),
    });
    for (&slot, item) in slots.iter().zip(items) {
        children[slot] = item;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(parent: &str, items: &[&str], xml: &str) -> String {
        SortListTransform::new(parent, items.iter().copied())
            .execute(TransformData::Text(xml.into()))
            .unwrap()
            .into_text()
    }

    #[test]
    fn test_sorts_by_content() {
        assert_eq!(
            run(
                "size",
                &["color_swatch"],
                "<size><color_swatch>Red</color_swatch><color_swatch>Blue</color_swatch></size>"
            ),
            "<size><color_swatch>Blue</color_swatch><color_swatch>Red</color_swatch></size>"
        );
    }

    #[test]
    fn test_sorts_by_name_before_content() {
        assert_eq!(
            run("l", &["b", "a"], "<l><b>1</b><a>2</a><b>0</b></l>"),
            "<l><a>2</a><b>0</b><b>1</b></l>"
        );
    }

    #[test]
    fn test_other_siblings_stay_put() {
        assert_eq!(
            run("l", &["i"], "<l><head/><i>2</i><i>1</i><mid/><i>4</i><i>3</i></l>"),
            "<l><head/><i>1</i><i>2</i><mid/><i>3</i><i>4</i></l>"
        );
    }

    #[test]
    fn test_whitespace_does_not_split_runs() {
        assert_eq!(
            run("l", &["i"], "<l>\n <i>b</i>\n <i>a</i>\n</l>"),
            "<l>\n <i>a</i>\n <i>b</i>\n</l>"
        );
    }

    #[test]
    fn test_equal_items_keep_document_order() {
        let xml = r#"<l><i/><i/><i/></l>"#;
        assert_eq!(run("l", &["i"], xml), xml);
    }

    #[test]
    fn test_only_named_parents_are_touched() {
        let xml = "<r><other><i>2</i><i>1</i></other><l><i>2</i><i>1</i></l></r>";
        assert_eq!(
            run("l", &["i"], xml),
            "<r><other><i>2</i><i>1</i></other><l><i>1</i><i>2</i></l></r>"
        );
    }

    #[test]
    fn test_nested_same_named_parents_sort_inside_out() {
        let xml = "<f><f><n>b</n><n>a</n></f><f><n>a</n></f></f>";
        assert_eq!(
            run("f", &["f", "n"], xml),
            "<f><f><n>a</n></f><f><n>a</n><n>b</n></f></f>"
        );
    }
}
