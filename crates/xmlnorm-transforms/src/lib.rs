#![forbid(unsafe_code)]

//! Tree transform engine for xmlnorm.
//!
//! Each normalization stage is a [`Transform`] over [`TransformData`];
//! the [`StandardEngine`] maps stage descriptors onto them and a
//! [`TransformPipeline`] runs them in order.

pub mod engine;
pub mod ignore;
pub mod namespaces;
pub mod pipeline;
pub mod pretty;
pub mod sort_list;
pub mod structural;

pub use engine::{StandardEngine, TransformEngine};
pub use pipeline::{Transform, TransformData, TransformPipeline};
