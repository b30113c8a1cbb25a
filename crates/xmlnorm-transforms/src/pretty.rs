#![forbid(unsafe_code)]

//! Final rendering stage.

use crate::pipeline::{Transform, TransformData};
use xmlnorm_core::Error;
use xmlnorm_xml::writer;

/// Renders the tree as indented text. Output of this stage is text, so
/// it normally comes last.
pub struct PrettyPrintTransform {
    indent: usize,
}

impl PrettyPrintTransform {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }
}

impl Transform for PrettyPrintTransform {
    fn kind(&self) -> &'static str {
        "pretty-print"
    }

    fn execute(&self, input: TransformData) -> Result<TransformData, Error> {
        let doc = input.into_tree()?;
        Ok(TransformData::Text(writer::to_pretty_string(&doc, self.indent)))
    }
}
