#![forbid(unsafe_code)]

//! Normalization profiles.

use crate::node::ElementNode;
use std::fmt;

/// An ignore set plus a forest of sort specifications.
///
/// A configuration is plain data. It is checked when it is compiled, so
/// it can be built freely and compiled any number of times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    ignore: Vec<ElementNode>,
    sort: Vec<ElementNode>,
}

impl Configuration {
    pub fn new(ignore: Vec<ElementNode>, sort: Vec<ElementNode>) -> Self {
        Self { ignore, sort }
    }

    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// Elements dropped (with their subtrees) from every document.
    pub fn ignores(&self) -> &[ElementNode] {
        &self.ignore
    }

    /// List parents and the child names reordered beneath them.
    pub fn sorts(&self) -> &[ElementNode] {
        &self.sort
    }

    pub fn is_empty(&self) -> bool {
        self.ignore.is_empty() && self.sort.is_empty()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Configuration(ignore=[{}], sort=[{}])",
            join_nodes(&self.ignore),
            join_nodes(&self.sort)
        )
    }
}

fn join_nodes(nodes: &[ElementNode]) -> String {
    nodes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Incremental construction of a [`Configuration`].
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    ignore: Vec<ElementNode>,
    sort: Vec<ElementNode>,
}

impl ConfigurationBuilder {
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignore.push(ElementNode::new(name));
        self
    }

    /// Add a sort specification: `parent` with the given list-item names.
    pub fn sort<I, S>(mut self, parent: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort.push(ElementNode::with_children(parent, items));
        self
    }

    pub fn build(self) -> Configuration {
        Configuration::new(self.ignore, self.sort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_matches_constructor() {
        let built = Configuration::builder()
            .ignore("price")
            .sort("size", ["color_swatch"])
            .build();
        let direct = Configuration::new(
            vec![ElementNode::new("price")],
            vec![ElementNode::new("size").with_child(ElementNode::new("color_swatch"))],
        );
        assert_eq!(built, direct);
        assert_eq!(
            built.to_string(),
            "Configuration(ignore=[price], sort=[size[color_swatch]])"
        );
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Configuration::default().is_empty());
    }
}
