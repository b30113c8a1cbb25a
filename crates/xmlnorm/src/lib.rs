#![forbid(unsafe_code)]

//! xmlnorm: canonical text for semantically equal XML documents.
//!
//! Re-exports the workspace crates and the most common entry points.

pub use xmlnorm_core as core;
pub use xmlnorm_normalize as normalize;
pub use xmlnorm_transforms as transforms;
pub use xmlnorm_xml as xml;

pub use xmlnorm_core::{Configuration, ElementNode, Error, Result, StageDescriptor};
pub use xmlnorm_normalize::{compile, Baseline, CompiledPipeline, XmlNormalizer};
