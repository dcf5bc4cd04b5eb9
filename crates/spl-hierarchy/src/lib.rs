//! Hierarchy reconstruction for labeling documents.
//!
//! A document carries several independent hierarchies (section nesting, text
//! block nesting, packaging containment, lot genealogy, pharmacologic-class
//! taxonomy), each stored as join rows. This crate assembles them into
//! ordered, acyclic structures:
//!
//! - siblings are ordered by sequence number, unnumbered siblings last, ties
//!   broken on id
//! - roots are ordered by id
//! - dangling edges, cycles, and second parents in a forest are fatal

pub mod dimensions;
pub mod hierarchy;

pub use dimensions::{ContentForest, DocumentHierarchies, SectionForest};
pub use hierarchy::{EdgeSpec, Hierarchy, Link, Shape, Visit, sibling_order};
