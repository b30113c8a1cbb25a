#![forbid(unsafe_code)]

//! XML document model for xmlnorm.
//!
//! Provides an owned, editable tree parsed with `roxmltree`, plus compact
//! and indented serialization.

pub mod document;
pub mod writer;

pub use document::{Attribute, Element, NsDecl, XmlDocument, XmlNode};
pub use writer::XmlWriter;

/// Return roxmltree parsing options that allow DTD.
///
/// DTD is allowed because roxmltree does not expand external entities or
/// perform entity substitution beyond the five predefined XML entities,
/// so it is safe.
pub fn parsing_options() -> roxmltree::ParsingOptions {
    roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    }
}
