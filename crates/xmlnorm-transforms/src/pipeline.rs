#![forbid(unsafe_code)]

//! Transform pipeline and trait definitions.

use xmlnorm_core::Error;
use xmlnorm_xml::{writer, XmlDocument};

/// Data flowing through the transform pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformData {
    /// A parsed tree (for tree-rewriting stages).
    Tree(XmlDocument),
    /// Serialized XML text.
    Text(String),
}

impl TransformData {
    /// Get the tree, parsing text input if needed.
    pub fn into_tree(self) -> Result<XmlDocument, Error> {
        match self {
            TransformData::Tree(doc) => Ok(doc),
            TransformData::Text(text) => XmlDocument::parse(&text),
        }
    }

    /// Get the text, serializing a tree compactly if needed.
    pub fn into_text(self) -> String {
        match self {
            TransformData::Tree(doc) => writer::to_compact_string(&doc),
            TransformData::Text(text) => text,
        }
    }
}

/// Trait for individual transforms.
pub trait Transform: Send {
    /// Stable identifier of the stage kind this transform implements.
    fn kind(&self) -> &'static str;

    /// Execute the transform on the given data.
    fn execute(&self, input: TransformData) -> Result<TransformData, Error>;
}

/// A pipeline of transforms executed in sequence.
pub struct TransformPipeline {
    transforms: Vec<Box<dyn Transform>>,
}

impl TransformPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Add a transform to the pipeline.
    pub fn push(&mut self, transform: Box<dyn Transform>) {
        self.transforms.push(transform);
    }

    /// Execute all transforms in order.
    ///
    /// The first failing stage aborts the run; its error is returned
    /// unchanged and no later stage sees the document.
    pub fn execute(&self, input: TransformData) -> Result<TransformData, Error> {
        let mut data = input;
        for (index, transform) in self.transforms.iter().enumerate() {
            tracing::trace!(stage = index, kind = transform.kind(), "running stage");
            data = transform.execute(data)?;
        }
        Ok(data)
    }

    /// Number of transforms in the pipeline.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Check if pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Box<dyn Transform>> for TransformPipeline {
    fn from_iter<I: IntoIterator<Item = Box<dyn Transform>>>(iter: I) -> Self {
        Self {
            transforms: iter.into_iter().collect(),
        }
    }
}
