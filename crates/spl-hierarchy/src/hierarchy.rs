//! Generic adjacency-list assembly.
//!
//! Every hierarchy dimension of a document is stored the same way: a node
//! table plus edge rows naming a parent id, a child id and an optional
//! sequence number. [`Hierarchy::assemble`] turns those rows into an ordered,
//! acyclic structure or fails with a [`StructuralError`].

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::Serialize;
use tracing::debug;

use spl_model::{EntityId, HierarchyKind, StructuralError};

/// Whether a node may have more than one parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Shape {
    Forest,
    Dag,
}

/// One edge row as read from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSpec<K> {
    /// Id of the record carrying the edge, used in error reports.
    pub edge_id: i64,
    pub parent: K,
    pub child: K,
    pub sequence: Option<i32>,
}

/// A child reference with the sequence number of its edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link<K> {
    pub id: K,
    pub sequence: Option<i32>,
}

/// One step of a preorder walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visit<K> {
    pub id: K,
    pub depth: usize,
    pub parent: Option<K>,
}

/// Sibling order: numbered siblings first by number, then unnumbered ones,
/// ties broken on id.
pub fn sibling_order<K: Ord>(a: (Option<i32>, K), b: (Option<i32>, K)) -> Ordering {
    (a.0.is_none(), a.0, a.1).cmp(&(b.0.is_none(), b.0, b.1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnPath,
    Done,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hierarchy<K: EntityId> {
    kind: HierarchyKind,
    shape: Shape,
    nodes: BTreeSet<K>,
    children: BTreeMap<K, Vec<Link<K>>>,
    parents: BTreeMap<K, Vec<K>>,
    roots: Vec<K>,
}

impl<K: EntityId> Hierarchy<K> {
    /// Build a hierarchy from node ids and edge rows.
    ///
    /// Edges are checked in ascending `edge_id` order, so the reported error
    /// does not depend on input order. Identical `(parent, child)` rows are
    /// collapsed to the lowest sequence number.
    pub fn assemble(
        kind: HierarchyKind,
        shape: Shape,
        nodes: impl IntoIterator<Item = K>,
        edges: impl IntoIterator<Item = EdgeSpec<K>>,
    ) -> Result<Self, StructuralError> {
        let nodes: BTreeSet<K> = nodes.into_iter().collect();
        let mut edges: Vec<EdgeSpec<K>> = edges.into_iter().collect();
        edges.sort_by_key(|edge| (edge.edge_id, edge.parent, edge.child));

        let mut unique: BTreeMap<(K, K), Option<i32>> = BTreeMap::new();
        for edge in &edges {
            for (endpoint, field) in [
                (edge.parent, kind.parent_field()),
                (edge.child, kind.child_field()),
            ] {
                if !nodes.contains(&endpoint) {
                    return Err(StructuralError::DanglingReference {
                        kind: kind.edge_kind(),
                        id: edge.edge_id,
                        field,
                        target: kind.node_kind(),
                        target_id: endpoint.raw(),
                    });
                }
            }
            if edge.parent == edge.child {
                return Err(StructuralError::CycleDetected {
                    hierarchy: kind,
                    node: edge.child.raw(),
                });
            }
            unique
                .entry((edge.parent, edge.child))
                .and_modify(|sequence| {
                    if sibling_order((edge.sequence, edge.child), (*sequence, edge.child))
                        == Ordering::Less
                    {
                        *sequence = edge.sequence;
                    }
                })
                .or_insert(edge.sequence);
        }

        let mut children: BTreeMap<K, Vec<Link<K>>> = BTreeMap::new();
        let mut parents: BTreeMap<K, Vec<K>> = BTreeMap::new();
        for (&(parent, child), &sequence) in &unique {
            children.entry(parent).or_default().push(Link {
                id: child,
                sequence,
            });
            parents.entry(child).or_default().push(parent);
        }
        for links in children.values_mut() {
            links.sort_by(|a, b| sibling_order((a.sequence, a.id), (b.sequence, b.id)));
        }
        for list in parents.values_mut() {
            list.sort();
        }

        if shape == Shape::Forest {
            for (child, list) in &parents {
                if let [first, second, ..] = list.as_slice() {
                    return Err(StructuralError::MultipleParents {
                        hierarchy: kind,
                        child: child.raw(),
                        first: first.raw(),
                        second: second.raw(),
                    });
                }
            }
        }

        let roots: Vec<K> = nodes
            .iter()
            .copied()
            .filter(|node| !parents.contains_key(node))
            .collect();

        let hierarchy = Self {
            kind,
            shape,
            nodes,
            children,
            parents,
            roots,
        };
        hierarchy.check_acyclic()?;

        debug!(
            hierarchy = %kind,
            nodes = hierarchy.nodes.len(),
            edges = unique.len(),
            roots = hierarchy.roots.len(),
            "Assembled hierarchy"
        );
        Ok(hierarchy)
    }

    /// Iterative depth-first search over every node.
    ///
    /// Reports the first node reached twice on the same path.
    fn check_acyclic(&self) -> Result<(), StructuralError> {
        let mut marks: BTreeMap<K, Mark> = BTreeMap::new();
        let limit = self.nodes.len() + 1;

        for &start in &self.nodes {
            if marks.contains_key(&start) {
                continue;
            }
            let mut stack: Vec<(K, usize)> = vec![(start, 0)];
            marks.insert(start, Mark::OnPath);

            while let Some((node, next)) = stack.last().copied() {
                let links = self.children(node);
                if let Some(link) = links.get(next) {
                    if let Some(top) = stack.last_mut() {
                        top.1 += 1;
                    }
                    match marks.get(&link.id) {
                        Some(Mark::OnPath) => {
                            return Err(StructuralError::CycleDetected {
                                hierarchy: self.kind,
                                node: link.id.raw(),
                            });
                        }
                        Some(Mark::Done) => {}
                        None => {
                            if stack.len() >= limit {
                                return Err(StructuralError::CycleDetected {
                                    hierarchy: self.kind,
                                    node: link.id.raw(),
                                });
                            }
                            marks.insert(link.id, Mark::OnPath);
                            stack.push((link.id, 0));
                        }
                    }
                } else {
                    marks.insert(node, Mark::Done);
                    stack.pop();
                }
            }
        }
        Ok(())
    }

    pub fn kind(&self) -> HierarchyKind {
        self.kind
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn contains(&self, id: K) -> bool {
        self.nodes.contains(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.children.values().map(Vec::len).sum()
    }

    /// Nodes without a parent, ascending by id.
    pub fn roots(&self) -> &[K] {
        &self.roots
    }

    /// Children in sibling order.
    pub fn children(&self, id: K) -> &[Link<K>] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn child_ids(&self, id: K) -> Vec<K> {
        self.children(id).iter().map(|link| link.id).collect()
    }

    /// Parents ascending by id. At most one in a forest.
    pub fn parents(&self, id: K) -> &[K] {
        self.parents.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parent(&self, id: K) -> Option<K> {
        self.parents(id).first().copied()
    }

    /// Every node below `id`, each once, in preorder.
    pub fn descendants(&self, id: K) -> Vec<K> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        let mut stack: Vec<K> = self.child_ids(id).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            if !seen.insert(node) {
                continue;
            }
            out.push(node);
            stack.extend(self.children(node).iter().rev().map(|link| link.id));
        }
        out
    }

    /// Every node above `id`, each once, nearest first.
    pub fn ancestors(&self, id: K) -> Vec<K> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        let mut queue: VecDeque<K> = self.parents(id).iter().copied().collect();
        while let Some(node) = queue.pop_front() {
            if !seen.insert(node) {
                continue;
            }
            out.push(node);
            queue.extend(self.parents(node).iter().copied());
        }
        out
    }

    /// Preorder walk from every root.
    ///
    /// Each node is visited once. In a DAG a node with several parents is
    /// reported under the first path that reaches it; `parents` lists the rest.
    pub fn preorder(&self) -> Vec<Visit<K>> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            self.walk(root, &mut seen, &mut out);
        }
        out
    }

    /// Preorder walk of the subgraph below `id`, depths relative to it.
    pub fn preorder_from(&self, id: K) -> Vec<Visit<K>> {
        let mut out = Vec::new();
        if self.contains(id) {
            self.walk(id, &mut BTreeSet::new(), &mut out);
        }
        out
    }

    fn walk(&self, start: K, seen: &mut BTreeSet<K>, out: &mut Vec<Visit<K>>) {
        let mut stack = vec![Visit {
            id: start,
            depth: 0,
            parent: None,
        }];
        while let Some(visit) = stack.pop() {
            if !seen.insert(visit.id) {
                continue;
            }
            out.push(visit);
            stack.extend(
                self.children(visit.id)
                    .iter()
                    .rev()
                    .filter(|link| !seen.contains(&link.id))
                    .map(|link| Visit {
                        id: link.id,
                        depth: visit.depth + 1,
                        parent: Some(visit.id),
                    }),
            );
        }
    }

    /// Distance from the nearest root, or `None` for an unknown node.
    pub fn depth_of(&self, id: K) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        let mut depth = 0;
        let mut frontier: BTreeSet<K> = BTreeSet::from([id]);
        let mut seen = frontier.clone();
        loop {
            if frontier.iter().any(|node| self.parents(*node).is_empty()) {
                return Some(depth);
            }
            let next: BTreeSet<K> = frontier
                .iter()
                .flat_map(|node| self.parents(*node).iter().copied())
                .filter(|node| seen.insert(*node))
                .collect();
            if next.is_empty() {
                return None;
            }
            frontier = next;
            depth += 1;
        }
    }
}
