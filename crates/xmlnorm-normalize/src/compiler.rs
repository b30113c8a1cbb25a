#![forbid(unsafe_code)]

//! Stage compiler: configuration in, ordered stage descriptors out.
//!
//! The compiled sequence is always
//!
//! 1. the baseline's leading stages (namespace removal, structural sort),
//! 2. an ignore filter, when the ignore set is non-empty,
//! 3. one list sort per sort specification, innermost first,
//! 4. the baseline's trailing stages (pretty printing).
//!
//! Every check runs before anything is returned; a configuration either
//! compiles completely or not at all.

use crate::order::{self, DependencyEntry};
use std::fmt;
use xmlnorm_core::ns::NAME_DELIMITER;
use xmlnorm_core::stage::DEFAULT_INDENT;
use xmlnorm_core::{Configuration, Error, StageDescriptor};
use xmlnorm_transforms::{StandardEngine, TransformEngine};

/// The fixed stages around the configured ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub leading: Vec<StageDescriptor>,
    pub trailing: Vec<StageDescriptor>,
}

impl Baseline {
    /// Namespace removal and structural sort first, pretty printing last.
    pub fn standard() -> Self {
        Self::with_indent(DEFAULT_INDENT)
    }

    /// The standard baseline with a different indentation width.
    pub fn with_indent(indent: usize) -> Self {
        Self {
            leading: vec![
                StageDescriptor::RemoveNamespaces,
                StageDescriptor::StructuralSort,
            ],
            trailing: vec![StageDescriptor::PrettyPrint { indent }],
        }
    }
}

impl Default for Baseline {
    fn default() -> Self {
        Self::standard()
    }
}

/// An ordered, validated stage sequence. Immutable and freely shareable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPipeline {
    stages: Vec<StageDescriptor>,
}

impl CompiledPipeline {
    pub fn stages(&self) -> &[StageDescriptor] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Parents of the list-sort stages, in execution order.
    pub fn sort_parents(&self) -> Vec<&str> {
        self.stages
            .iter()
            .filter_map(|stage| match stage {
                StageDescriptor::SortList { parent, .. } => Some(parent.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for CompiledPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}

/// Compiles configurations against a baseline, validating every stage with
/// the engine that will later run it.
pub struct StageCompiler<'a> {
    baseline: &'a Baseline,
    engine: &'a dyn TransformEngine,
}

impl<'a> StageCompiler<'a> {
    pub fn new(baseline: &'a Baseline, engine: &'a dyn TransformEngine) -> Self {
        Self { baseline, engine }
    }

    pub fn compile(&self, config: &Configuration) -> Result<CompiledPipeline, Error> {
        check_names(config)?;
        let ordered = order::dependency_order(config.sorts())?;

        let mut stages = self.baseline.leading.clone();
        let ignored = ignore_names(config);
        if !ignored.is_empty() {
            stages.push(StageDescriptor::IgnoreFilter(ignored));
        }
        stages.extend(ordered.into_iter().map(
            |DependencyEntry { parent, children }| StageDescriptor::SortList { parent, children },
        ));
        stages.extend(self.baseline.trailing.iter().cloned());

        for stage in &stages {
            self.engine.instantiate(stage)?;
        }

        let pipeline = CompiledPipeline { stages };
        tracing::debug!(stages = pipeline.len(), pipeline = %pipeline, "compiled normalization pipeline");
        Ok(pipeline)
    }
}

/// Compile with the standard baseline and engine.
pub fn compile(config: &Configuration) -> Result<CompiledPipeline, Error> {
    StageCompiler::new(&Baseline::standard(), &StandardEngine).compile(config)
}

/// Ignore names in configured order, without repeats.
fn ignore_names(config: &Configuration) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for node in config.ignores() {
        if !names.iter().any(|n| n == node.name()) {
            names.push(node.name().to_owned());
        }
    }
    names
}

/// Reject empty names and names that would collide with the delimiter used
/// in a stage's textual form.
fn check_names(config: &Configuration) -> Result<(), Error> {
    let ignore = config.ignores().iter().map(|n| ("ignore set", n.name()));
    let sort = config.sorts().iter().flat_map(|parent| {
        std::iter::once(("sort specification", parent.name()))
            .chain(parent.child_names().map(|c| ("sort specification", c)))
    });
    for (place, name) in ignore.chain(sort) {
        if name.is_empty() {
            return Err(Error::Config(format!("empty element name in {place}")));
        }
        if name.contains(NAME_DELIMITER) {
            return Err(Error::TemplateInjection {
                name: name.to_owned(),
                delimiter: NAME_DELIMITER,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmlnorm_core::ElementNode;
    use xmlnorm_transforms::Transform;

    fn example_config() -> Configuration {
        Configuration::new(
            vec![ElementNode::new("item_number"), ElementNode::new("price")],
            vec![
                ElementNode::new("product").with_child(ElementNode::new("catalog_item")),
                ElementNode::new("catalog_item").with_child(ElementNode::new("size")),
                ElementNode::new("size").with_child(ElementNode::new("color_swatch")),
            ],
        )
    }

    #[test]
    fn test_empty_configuration() {
        let pipeline = compile(&Configuration::default()).unwrap();
        assert_eq!(
            pipeline.stages(),
            [
                StageDescriptor::RemoveNamespaces,
                StageDescriptor::StructuralSort,
                StageDescriptor::PrettyPrint { indent: 2 },
            ]
        );
    }

    #[test]
    fn test_example_stage_order() {
        let pipeline = compile(&example_config()).unwrap();
        assert_eq!(pipeline.len(), 7);
        assert_eq!(pipeline.stages()[0], StageDescriptor::RemoveNamespaces);
        assert_eq!(pipeline.stages()[1], StageDescriptor::StructuralSort);
        assert_eq!(
            pipeline.stages()[2],
            StageDescriptor::IgnoreFilter(vec!["item_number".into(), "price".into()])
        );
        assert_eq!(pipeline.sort_parents(), ["size", "catalog_item", "product"]);
        assert_eq!(
            pipeline.stages().last(),
            Some(&StageDescriptor::PrettyPrint { indent: 2 })
        );
        assert_eq!(
            pipeline.to_string(),
            "remove-namespaces -> structural-sort -> ignore(item_number|price) -> \
             sort-list(size: color_swatch) -> sort-list(catalog_item: size) -> \
             sort-list(product: catalog_item) -> pretty-print(indent=2)"
        );
    }

    #[test]
    fn test_ignore_filter_only_when_needed() {
        let config = Configuration::builder().sort("l", ["i"]).build();
        let pipeline = compile(&config).unwrap();
        assert!(!pipeline
            .stages()
            .iter()
            .any(|s| matches!(s, StageDescriptor::IgnoreFilter(_))));
    }

    #[test]
    fn test_repeated_ignore_names_collapse() {
        let config = Configuration::builder().ignore("a").ignore("b").ignore("a").build();
        let pipeline = compile(&config).unwrap();
        assert_eq!(
            pipeline.stages()[2],
            StageDescriptor::IgnoreFilter(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn test_duplicate_parent_is_config_error() {
        let config = Configuration::builder()
            .sort("size", ["a"])
            .sort("size", ["b"])
            .build();
        let err = compile(&config).unwrap_err();
        assert!(err.is_config_error());
        assert!(matches!(err, Error::DuplicateSortParent(ref n) if n == "size"));
    }

    #[test]
    fn test_delimiter_in_names_rejected() {
        let as_child = Configuration::builder().sort("size", ["|"]).build();
        assert!(matches!(
            compile(&as_child),
            Err(Error::TemplateInjection { ref name, delimiter: '|' }) if name == "|"
        ));

        let in_ignore = Configuration::builder().ignore("price|cost").build();
        assert!(matches!(
            compile(&in_ignore),
            Err(Error::TemplateInjection { .. })
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let config = Configuration::builder().ignore("").build();
        assert!(matches!(compile(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_engine_rejection_aborts() {
        let config = Configuration::builder().sort("list", ["two words"]).build();
        assert!(matches!(compile(&config), Err(Error::StageCompilation(_))));

        let no_items = Configuration::new(vec![], vec![ElementNode::new("list")]);
        assert!(matches!(compile(&no_items), Err(Error::StageCompilation(_))));
    }

    #[test]
    fn test_cycle_aborts_compilation() {
        let config = Configuration::builder()
            .sort("a", ["b"])
            .sort("b", ["a"])
            .build();
        let err = compile(&config).unwrap_err();
        assert!(matches!(err, Error::CycleDetected(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_alternate_baseline() {
        let baseline = Baseline {
            leading: vec![StageDescriptor::RemoveNamespaces],
            trailing: vec![],
        };
        let config = Configuration::builder().sort("l", ["i"]).build();
        let pipeline = StageCompiler::new(&baseline, &StandardEngine)
            .compile(&config)
            .unwrap();
        assert_eq!(
            pipeline.stages(),
            [
                StageDescriptor::RemoveNamespaces,
                StageDescriptor::SortList {
                    parent: "l".into(),
                    children: vec!["i".into()],
                },
            ]
        );
        assert_eq!(
            compile(&config).unwrap().stages().last(),
            Some(&StageDescriptor::PrettyPrint { indent: 2 })
        );
        assert_eq!(
            Baseline::with_indent(4).trailing,
            [StageDescriptor::PrettyPrint { indent: 4 }]
        );
    }

    struct RejectSorts;

    impl TransformEngine for RejectSorts {
        fn instantiate(&self, stage: &StageDescriptor) -> Result<Box<dyn Transform>, Error> {
            match stage {
                StageDescriptor::SortList { .. } => {
                    Err(Error::StageCompilation("sorting disabled".into()))
                }
                other => StandardEngine.instantiate(other),
            }
        }
    }

    #[test]
    fn test_custom_engine_validates_stages() {
        let baseline = Baseline::standard();
        let compiler = StageCompiler::new(&baseline, &RejectSorts);
        assert!(compiler.compile(&Configuration::default()).is_ok());
        assert!(matches!(
            compiler.compile(&example_config()),
            Err(Error::StageCompilation(_))
        ));
    }

    #[test]
    fn test_compile_from_many_threads() {
        let config = &example_config();
        let expected = compile(config).unwrap();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(move || compile(config).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
