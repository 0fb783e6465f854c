//! Search nodes, and the arena which owns them during a run.
//!
//! Nodes refer to their parents by [NodeId] rather than by reference,
//! so the tree of explored nodes is a flat vector which a run can
//! grow, truncate, and finally hand back to the caller.

use std::cell::Cell;
use std::fmt::Debug;
use std::ops::Index;

/// Handle to a node stored in a [NodeArena].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of this node in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One position in the explored tree.
///
/// The `step`, `factor` and `level` never change once a node is built.
/// `previous` is fixed when the node is created from its parent, and
/// `next` is only filled in when a path through this node is walked
/// from its terminal node back to the root.
#[derive(Debug, Clone)]
pub struct Node<F, S> {
    step: S,
    factor: F,
    level: usize,
    previous: Option<NodeId>,
    next: Cell<Option<NodeId>>,
}

impl<F, S> Node<F, S> {
    /// Construct a root node, which has no parent.
    pub fn new(step: S, factor: F, level: usize) -> Self {
        Self {
            step,
            factor,
            level,
            previous: None,
            next: Cell::new(None),
        }
    }

    pub(crate) fn child_of(step: S, factor: F, parent: NodeId, parent_level: usize) -> Self {
        Self {
            step,
            factor,
            level: parent_level + 1,
            previous: Some(parent),
            next: Cell::new(None),
        }
    }

    /// The caller's domain value at this point in the search.
    pub fn step(&self) -> &S {
        &self.step
    }

    /// The value compared by the heuristic ordering.
    pub fn factor(&self) -> &F {
        &self.factor
    }

    /// Depth of this node from the start of the search.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Parent of this node, `None` for a node built from the start step.
    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    /// Child of this node along the most recently walked path.
    pub fn next(&self) -> Option<NodeId> {
        self.next.get()
    }

    pub fn is_root(&self) -> bool {
        self.previous.is_none()
    }
}

impl<F: Clone, S: Clone> Node<F, S> {
    /// A copy of this node cut loose from the tree.
    ///
    /// Used where only the ordering key of a node must outlive the
    /// part of the arena that holds it.
    pub(crate) fn detached(&self) -> Self {
        Self {
            step: self.step.clone(),
            factor: self.factor.clone(),
            level: self.level,
            previous: None,
            next: Cell::new(None),
        }
    }
}

/// Owns every node built during a single run.
#[derive(Debug, Clone)]
pub struct NodeArena<F, S> {
    nodes: Vec<Node<F, S>>,
}

impl<F, S> Default for NodeArena<F, S> {
    fn default() -> Self {
        NodeArena { nodes: Vec::new() }
    }
}

impl<F, S> NodeArena<F, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node<F, S>) -> NodeId {
        debug_assert!(node
            .previous
            .map(|p| self.nodes[p.0].level + 1 == node.level)
            .unwrap_or(true));
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<F, S>> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of every node, in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Drop every node allocated after the first `len`.
    ///
    /// Callers must not hold ids at or beyond `len` afterwards.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Iterate from a node back to the root of its tree.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, F, S> {
        Ancestors {
            arena: self,
            current: Some(id),
        }
    }

    /// Walk back from `terminal` to its root, pointing each parent's
    /// `next` at the child on this path. Returns the root.
    pub fn link(&self, terminal: NodeId) -> NodeId {
        let mut current = terminal;
        while let Some(previous) = self[current].previous {
            let parent = &self[previous];
            if parent.next.get() != Some(current) {
                parent.next.set(Some(current));
            }
            current = previous;
        }
        current
    }

    /// Iterate forward from `root` along the `next` pointers set by [NodeArena::link].
    pub fn forward(&self, root: NodeId) -> Forward<'_, F, S> {
        Forward {
            arena: self,
            current: Some(root),
        }
    }
}

impl<F, S> Index<NodeId> for NodeArena<F, S> {
    type Output = Node<F, S>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

/// Iterator over a node and its parents, ending at the root.
#[derive(Debug)]
pub struct Ancestors<'a, F, S> {
    arena: &'a NodeArena<F, S>,
    current: Option<NodeId>,
}

impl<'a, F, S> Iterator for Ancestors<'a, F, S> {
    type Item = &'a Node<F, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.arena[self.current?];
        self.current = node.previous;
        Some(node)
    }
}

/// Iterator over a linked path, from the root towards the terminal node.
#[derive(Debug)]
pub struct Forward<'a, F, S> {
    arena: &'a NodeArena<F, S>,
    current: Option<NodeId>,
}

impl<'a, F, S> Iterator for Forward<'a, F, S> {
    type Item = &'a Node<F, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.arena[self.current?];
        self.current = node.next.get();
        Some(node)
    }
}
