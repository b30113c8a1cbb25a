#![forbid(unsafe_code)]

//! Dependency ordering of sort specifications.
//!
//! A sort specification whose list items are themselves list parents must
//! run after those nested specifications, so inner lists are already in
//! canonical order when the outer list compares its items.

use std::collections::HashMap;
use xmlnorm_core::{ElementNode, Error};

/// One sort specification: a list parent and the names of its list items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    pub parent: String,
    /// List item names, first occurrence order, without duplicates.
    pub children: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// The directed graph between sort specifications: an edge runs from a
/// parent to every list item name that is itself a parent.
#[derive(Debug, Clone)]
pub struct SortGraph {
    entries: Vec<DependencyEntry>,
    index: HashMap<String, usize>,
}

impl SortGraph {
    /// Build the graph from a sort forest, rejecting duplicate parents.
    pub fn from_specs(specs: &[ElementNode]) -> Result<Self, Error> {
        let mut entries = Vec::with_capacity(specs.len());
        let mut index = HashMap::with_capacity(specs.len());
        for spec in specs {
            if index.insert(spec.name().to_owned(), entries.len()).is_some() {
                return Err(Error::DuplicateSortParent(spec.name().to_owned()));
            }
            let mut children: Vec<String> = Vec::new();
            for name in spec.child_names() {
                if !children.iter().any(|c| c == name) {
                    children.push(name.to_owned());
                }
            }
            entries.push(DependencyEntry {
                parent: spec.name().to_owned(),
                children,
            });
        }
        Ok(Self { entries, index })
    }

    /// Indices of the parents entry `i` depends on. A parent listing
    /// itself is not a dependency: nested same-named lists are handled by
    /// a single stage.
    fn dependencies(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.entries[i]
            .children
            .iter()
            .filter_map(|c| self.index.get(c).copied())
            .filter(move |&d| d != i)
    }

    /// Order the entries so every nested specification precedes the
    /// specifications that list it. Roots are visited in original order,
    /// which makes the result deterministic.
    pub fn into_order(self) -> Result<Vec<DependencyEntry>, Error> {
        let n = self.entries.len();
        let mut marks = vec![Mark::Unvisited; n];
        let mut path = Vec::new();
        let mut order = Vec::with_capacity(n);
        for i in 0..n {
            if marks[i] == Mark::Unvisited {
                self.visit(i, &mut marks, &mut path, &mut order)?;
            }
        }

        let mut slots: Vec<Option<DependencyEntry>> = self.entries.into_iter().map(Some).collect();
        Ok(order.into_iter().filter_map(|i| slots[i].take()).collect())
    }

    fn visit(
        &self,
        i: usize,
        marks: &mut [Mark],
        path: &mut Vec<usize>,
        order: &mut Vec<usize>,
    ) -> Result<(), Error> {
        marks[i] = Mark::InProgress;
        path.push(i);
        for dep in self.dependencies(i) {
            match marks[dep] {
                Mark::Unvisited => self.visit(dep, marks, path, order)?,
                Mark::InProgress => return Err(Error::CycleDetected(self.cycle_names(path, dep))),
                Mark::Done => {}
            }
        }
        path.pop();
        marks[i] = Mark::Done;
        order.push(i);
        Ok(())
    }

    /// Names along the cycle closing at `dep`, starting and ending with it.
    fn cycle_names(&self, path: &[usize], dep: usize) -> Vec<String> {
        let start = path.iter().position(|&p| p == dep).unwrap_or(0);
        path[start..]
            .iter()
            .chain(std::iter::once(&dep))
            .map(|&p| self.entries[p].parent.clone())
            .collect()
    }
}

/// Build and order the sort forest in one step.
pub fn dependency_order(specs: &[ElementNode]) -> Result<Vec<DependencyEntry>, Error> {
    SortGraph::from_specs(specs)?.into_order()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parents(order: &[DependencyEntry]) -> Vec<&str> {
        order.iter().map(|e| e.parent.as_str()).collect()
    }

    #[test]
    fn test_innermost_first() {
        let specs = [
            ElementNode::with_children("product", ["catalog_item"]),
            ElementNode::with_children("catalog_item", ["size"]),
            ElementNode::with_children("size", ["color_swatch"]),
        ];
        let order = dependency_order(&specs).unwrap();
        assert_eq!(parents(&order), ["size", "catalog_item", "product"]);
        assert_eq!(order[0].children, ["color_swatch"]);
    }

    #[test]
    fn test_independent_entries_keep_original_order() {
        let specs = [
            ElementNode::with_children("b", ["x"]),
            ElementNode::with_children("a", ["y"]),
            ElementNode::with_children("c", ["z"]),
        ];
        assert_eq!(parents(&dependency_order(&specs).unwrap()), ["b", "a", "c"]);
    }

    #[test]
    fn test_shared_dependency_emitted_once() {
        let specs = [
            ElementNode::with_children("left", ["leaf"]),
            ElementNode::with_children("right", ["leaf"]),
            ElementNode::with_children("leaf", ["item"]),
        ];
        assert_eq!(
            parents(&dependency_order(&specs).unwrap()),
            ["leaf", "left", "right"]
        );
    }

    #[test]
    fn test_duplicate_children_collapse() {
        let specs = [ElementNode::with_children("l", ["i", "j", "i"])];
        assert_eq!(dependency_order(&specs).unwrap()[0].children, ["i", "j"]);
    }

    #[test]
    fn test_duplicate_parent_rejected() {
        let specs = [
            ElementNode::with_children("size", ["a"]),
            ElementNode::with_children("size", ["b"]),
        ];
        let err = dependency_order(&specs).unwrap_err();
        assert!(matches!(err, Error::DuplicateSortParent(ref name) if name == "size"));
    }

    #[test]
    fn test_cycle_reported_with_path() {
        let specs = [
            ElementNode::with_children("a", ["b"]),
            ElementNode::with_children("b", ["c"]),
            ElementNode::with_children("c", ["a"]),
        ];
        match dependency_order(&specs) {
            Err(Error::CycleDetected(cycle)) => assert_eq!(cycle, ["a", "b", "c", "a"]),
            other => panic!("expected a cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_self_reference_is_not_a_cycle() {
        let specs = [
            ElementNode::with_children("folder", ["folder", "file"]),
            ElementNode::with_children("file", ["tag"]),
        ];
        assert_eq!(
            parents(&dependency_order(&specs).unwrap()),
            ["file", "folder"]
        );
    }

    fn acyclic_forest() -> impl Strategy<Value = Vec<ElementNode>> {
        (1usize..10)
            .prop_flat_map(|n| prop::collection::vec(prop::collection::vec(any::<bool>(), n), n))
            .prop_map(|edges| {
                (0..edges.len())
                    .map(|i| {
                        let mut node = ElementNode::new(format!("p{i}"));
                        for j in (0..i).filter(|&j| edges[i][j]) {
                            node = node.with_child(ElementNode::new(format!("p{j}")));
                        }
                        node.with_child(ElementNode::new(format!("item{i}")))
                    })
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    }

    proptest! {
        #[test]
        fn nested_parents_always_precede_their_users(specs in acyclic_forest()) {
            let order = dependency_order(&specs).unwrap();
            prop_assert_eq!(order.len(), specs.len());

            let position: HashMap<&str, usize> = order
                .iter()
                .enumerate()
                .map(|(i, e)| (e.parent.as_str(), i))
                .collect();
            prop_assert_eq!(position.len(), specs.len());
            for entry in &order {
                for child in &entry.children {
                    if let Some(&c) = position.get(child.as_str()) {
                        prop_assert!(c < position[entry.parent.as_str()]);
                    }
                }
            }
        }

        #[test]
        fn ordering_is_deterministic(specs in acyclic_forest()) {
            prop_assert_eq!(dependency_order(&specs).unwrap(), dependency_order(&specs).unwrap());
        }
    }
}
