#![forbid(unsafe_code)]

//! Stage descriptors: the compiled form of a normalization profile.

use crate::ns::NAME_DELIMITER;
use std::fmt;

/// Default indentation used by [`StageDescriptor::PrettyPrint`].
pub const DEFAULT_INDENT: usize = 2;

/// One step of a normalization pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageDescriptor {
    /// Strip namespace declarations and prefixes.
    RemoveNamespaces,
    /// Configuration-independent baseline normalization.
    StructuralSort,
    /// Drop elements with these names, at any depth.
    IgnoreFilter(Vec<String>),
    /// Reorder runs of `children` beneath every `parent`.
    SortList { parent: String, children: Vec<String> },
    /// Render the final tree with the given indentation.
    PrettyPrint { indent: usize },
}

impl StageDescriptor {
    /// Short, stable identifier of the stage kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RemoveNamespaces => "remove-namespaces",
            Self::StructuralSort => "structural-sort",
            Self::IgnoreFilter(_) => "ignore",
            Self::SortList { .. } => "sort-list",
            Self::PrettyPrint { .. } => "pretty-print",
        }
    }

    /// Every element name the stage refers to.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::IgnoreFilter(names) => names.iter().map(String::as_str).collect(),
            Self::SortList { parent, children } => std::iter::once(parent.as_str())
                .chain(children.iter().map(String::as_str))
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn join_names(names: &[String]) -> String {
    let mut out = String::new();
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            out.push(NAME_DELIMITER);
        }
        out.push_str(name);
    }
    out
}

impl fmt::Display for StageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoveNamespaces | Self::StructuralSort => f.write_str(self.kind()),
            Self::IgnoreFilter(names) => write!(f, "{}({})", self.kind(), join_names(names)),
            Self::SortList { parent, children } => {
                write!(f, "{}({parent}: {})", self.kind(), join_names(children))
            }
            Self::PrettyPrint { indent } => write!(f, "{}(indent={indent})", self.kind()),
        }
    }
}
