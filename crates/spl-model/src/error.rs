use thiserror::Error;

use crate::kind::{EntityKind, HierarchyKind};

/// A defect in the shape of the document graph.
///
/// Fatal to the document: a forest with dangling or cyclic edges has no safe
/// partial interpretation, so nothing built from it is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("{kind} {id}: {field} references missing {target} {target_id}")]
    DanglingReference {
        kind: EntityKind,
        id: i64,
        field: &'static str,
        target: EntityKind,
        target_id: i64,
    },

    #[error("cycle detected in {hierarchy} hierarchy at node {node}")]
    CycleDetected { hierarchy: HierarchyKind, node: i64 },

    #[error("{hierarchy} node {child} has more than one parent ({first}, {second})")]
    MultipleParents {
        hierarchy: HierarchyKind,
        child: i64,
        first: i64,
        second: i64,
    },
}

impl StructuralError {
    pub fn hierarchy(&self) -> Option<HierarchyKind> {
        match self {
            Self::DanglingReference { .. } => None,
            Self::CycleDetected { hierarchy, .. } | Self::MultipleParents { hierarchy, .. } => {
                Some(*hierarchy)
            }
        }
    }
}

/// A violated precondition of the engine itself, not a data problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("duplicate {kind} identity {id} in snapshot")]
    DuplicateIdentity { kind: EntityKind, id: i64 },

    #[error("expected exactly one Document record, found {found}")]
    DocumentCount { found: usize },

    #[error("rule {name} is registered more than once")]
    DuplicateRule { name: &'static str },
}
