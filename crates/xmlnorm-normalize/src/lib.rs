#![forbid(unsafe_code)]

//! Compiling normalization profiles into stage pipelines and running
//! documents through them.
//!
//! ```text
//! Configuration ─▶ order::dependency_order ─▶ StageCompiler ─▶ CompiledPipeline
//!                                                                   │
//!                               XmlNormalizer::normalize_* ◀────────┘
//! ```

pub mod compiler;
pub mod normalizer;
pub mod order;

pub use compiler::{compile, Baseline, CompiledPipeline, StageCompiler};
pub use normalizer::XmlNormalizer;
pub use order::{dependency_order, DependencyEntry, SortGraph};
