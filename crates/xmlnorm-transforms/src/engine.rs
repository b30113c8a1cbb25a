#![forbid(unsafe_code)]

//! Turning stage descriptors into executable transforms.

use crate::ignore::IgnoreTransform;
use crate::namespaces::RemoveNamespacesTransform;
use crate::pipeline::{Transform, TransformPipeline};
use crate::pretty::PrettyPrintTransform;
use crate::sort_list::SortListTransform;
use crate::structural::StructuralSortTransform;
use xmlnorm_core::{ns, Error, StageDescriptor};

/// Something that can execute stage descriptors.
///
/// Instances returned by [`instantiate`](TransformEngine::instantiate) may
/// hold per-run state and are never shared between documents; the engine
/// itself is shared.
pub trait TransformEngine: Send + Sync {
    /// Build an executable transform for one stage, or reject the stage
    /// with [`Error::StageCompilation`].
    fn instantiate(&self, stage: &StageDescriptor) -> Result<Box<dyn Transform>, Error>;

    /// Build a fresh pipeline for a whole stage sequence.
    fn pipeline(&self, stages: &[StageDescriptor]) -> Result<TransformPipeline, Error> {
        stages.iter().map(|stage| self.instantiate(stage)).collect()
    }
}

/// The built-in engine backed by the transforms in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEngine;

impl TransformEngine for StandardEngine {
    fn instantiate(&self, stage: &StageDescriptor) -> Result<Box<dyn Transform>, Error> {
        if let Some(bad) = stage.names().into_iter().find(|n| !ns::is_xml_name(n)) {
            return Err(Error::StageCompilation(format!(
                "{}: {bad:?} is not a valid element name",
                stage.kind()
            )));
        }

        let transform: Box<dyn Transform> = match stage {
            StageDescriptor::RemoveNamespaces => Box::new(RemoveNamespacesTransform),
            StageDescriptor::StructuralSort => Box::new(StructuralSortTransform),
            StageDescriptor::IgnoreFilter(names) => {
                if names.is_empty() {
                    return Err(Error::StageCompilation(
                        "ignore stage without element names".into(),
                    ));
                }
                Box::new(IgnoreTransform::new(names.iter().cloned()))
            }
            StageDescriptor::SortList { parent, children } => {
                if children.is_empty() {
                    return Err(Error::StageCompilation(format!(
                        "sort-list({parent}) has no list item names"
                    )));
                }
                Box::new(SortListTransform::new(parent.clone(), children.iter().cloned()))
            }
            StageDescriptor::PrettyPrint { indent } => Box::new(PrettyPrintTransform::new(*indent)),
        };
        Ok(transform)
    }
}
