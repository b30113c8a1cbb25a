#![forbid(unsafe_code)]

//! Core types for xmlnorm: the configuration model, stage descriptors and
//! the error type shared by every crate in the workspace.

pub mod config;
pub mod error;
pub mod node;
pub mod ns;
pub mod stage;

pub use config::{Configuration, ConfigurationBuilder};
pub use error::{Error, Result};
pub use node::ElementNode;
pub use stage::StageDescriptor;
