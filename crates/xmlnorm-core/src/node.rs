#![forbid(unsafe_code)]

//! Element specification trees.

use std::fmt;

/// One named element type inside an ignore or sort specification.
///
/// For a sort specification the node names the list parent and its
/// children name the list items. Children keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    name: String,
    children: Vec<ElementNode>,
}

impl ElementNode {
    /// Create a node with no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Create a parent node whose children are leaves with the given names.
    pub fn with_children<I, S>(name: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            children: children.into_iter().map(ElementNode::new).collect(),
        }
    }

    /// Append a child and return the node, for chained construction.
    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[ElementNode] {
        &self.children
    }

    /// Names of the direct children, in insertion order.
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|c| c.name.as_str())
    }
}

impl fmt::Display for ElementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.children.is_empty() {
            f.write_str("[")?;
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{child}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chained_construction_keeps_order() {
        let node = ElementNode::new("product")
            .with_child(ElementNode::new("b"))
            .with_child(ElementNode::new("a"));
        assert_eq!(node.child_names().collect::<Vec<_>>(), ["b", "a"]);
    }

    #[test]
    fn test_display_nests() {
        let node = ElementNode::new("a")
            .with_child(ElementNode::with_children("b", ["c", "d"]));
        assert_eq!(node.to_string(), "a[b[c, d]]");
    }
}
