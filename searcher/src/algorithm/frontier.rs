//! Open lists and visited sets shared by the frontier-based algorithms.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::comparer::StepEquality;
use crate::node::NodeId;

/// Set of steps under a caller-supplied [StepEquality].
///
/// Steps are bucketed by [StepEquality::hash_step], and compared with
/// [StepEquality::equals] within a bucket.
pub(crate) struct StepSet<'e, S> {
    equality: &'e dyn StepEquality<S>,
    buckets: HashMap<u64, Vec<S>>,
    len: usize,
}

impl<'e, S> StepSet<'e, S> {
    pub(crate) fn new(equality: &'e dyn StepEquality<S>) -> Self {
        StepSet {
            equality,
            buckets: HashMap::new(),
            len: 0,
        }
    }

    pub(crate) fn contains(&self, step: &S) -> bool {
        self.buckets
            .get(&self.equality.hash_step(step))
            .map(|bucket| bucket.iter().any(|s| self.equality.equals(s, step)))
            .unwrap_or(false)
    }

    /// Add a step unless an equal step is already present.
    ///
    /// Returns `true` if the step was added.
    pub(crate) fn insert(&mut self, step: S) -> bool {
        let equality = self.equality;
        let bucket = self
            .buckets
            .entry(equality.hash_step(&step))
            .or_insert_with(Vec::new);
        if bucket.iter().any(|s| equality.equals(s, &step)) {
            return false;
        }
        bucket.push(step);
        self.len += 1;
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

impl<'e, S> fmt::Debug for StepSet<'e, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StepSet").field("len", &self.len).finish()
    }
}

/// An ordered open list which is consumed from the front.
///
/// Consumed entries stay in place and are skipped by advancing
/// `sort_at`, so taking the best node never shifts the list. Only the
/// unconsumed suffix is ever re-sorted, and only when an appended node
/// sorts before the node appended ahead of it.
#[derive(Debug, Default)]
pub(crate) struct OpenList {
    nodes: Vec<NodeId>,
    sort_at: usize,
    sort_all: bool,
}

impl OpenList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a node, noting whether the suffix needs re-sorting.
    pub(crate) fn push<C>(&mut self, id: NodeId, compare: C)
    where
        C: Fn(NodeId, NodeId) -> Ordering,
    {
        if let Some(&last) = self.nodes[self.sort_at..].last() {
            if compare(id, last) == Ordering::Less {
                self.sort_all = true;
            }
        }
        self.nodes.push(id);
    }

    /// Re-sort the unconsumed suffix, if any appended node requires it.
    pub(crate) fn settle<C>(&mut self, compare: C)
    where
        C: Fn(NodeId, NodeId) -> Ordering,
    {
        if self.sort_all {
            self.sort(compare);
        }
    }

    /// Unconditionally sort the unconsumed suffix.
    pub(crate) fn sort<C>(&mut self, compare: C)
    where
        C: Fn(NodeId, NodeId) -> Ordering,
    {
        self.nodes[self.sort_at..].sort_by(|&x, &y| compare(x, y));
        self.sort_all = false;
    }

    /// The best unconsumed node.
    pub(crate) fn peek(&self) -> Option<NodeId> {
        self.nodes.get(self.sort_at).copied()
    }

    /// Consume the best node.
    pub(crate) fn advance(&mut self) {
        if self.sort_at < self.nodes.len() {
            self.sort_at += 1;
        }
    }

    /// Unconsumed nodes, best first once settled.
    pub(crate) fn remaining(&self) -> &[NodeId] {
        &self.nodes[self.sort_at..]
    }

    /// Does any node ever added, consumed or not, satisfy `predicate`?
    pub(crate) fn any<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&NodeId) -> bool,
    {
        self.nodes.iter().any(predicate)
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.sort_at >= self.nodes.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::comparer::{DefaultEquality, KeyEquality};
    use crate::node::{Node, NodeArena};

    fn arena(keys: &[u32]) -> (NodeArena<u32, ()>, Vec<NodeId>) {
        let mut arena = NodeArena::new();
        let ids = keys
            .iter()
            .map(|&k| arena.push(Node::new((), k, 0)))
            .collect();
        (arena, ids)
    }

    #[test]
    fn in_order_appends_skip_sorting() {
        let (arena, ids) = arena(&[1, 2, 3]);
        let compare = |x: NodeId, y: NodeId| arena[x].factor().cmp(arena[y].factor());

        let mut open = OpenList::new();
        for &id in &ids {
            open.push(id, compare);
        }
        assert!(!open.sort_all);
        open.settle(compare);
        assert_eq!(open.remaining(), &ids[..]);
    }

    #[test]
    fn only_unconsumed_suffix_is_sorted() {
        let (arena, ids) = arena(&[5, 1, 4, 0]);
        let compare = |x: NodeId, y: NodeId| arena[x].factor().cmp(arena[y].factor());

        let mut open = OpenList::new();
        open.push(ids[0], compare);
        open.push(ids[1], compare);
        open.sort(compare);
        assert_eq!(open.peek(), Some(ids[1]));
        open.advance();

        open.push(ids[2], compare);
        assert!(open.sort_all);
        open.push(ids[3], compare);
        open.settle(compare);

        let keys: Vec<u32> = open.remaining().iter().map(|&id| *arena[id].factor()).collect();
        assert_eq!(keys, vec![0, 4, 5]);

        // The consumed node is still visible to membership scans.
        assert!(open.any(|&id| id == ids[1]));
    }

    #[test]
    fn advance_until_exhausted() {
        let (arena, ids) = arena(&[1]);
        let compare = |x: NodeId, y: NodeId| arena[x].factor().cmp(arena[y].factor());

        let mut open = OpenList::new();
        assert!(open.is_exhausted());
        open.push(ids[0], compare);
        assert!(!open.is_exhausted());
        open.advance();
        open.advance();
        assert!(open.is_exhausted());
        assert_eq!(open.peek(), None);
    }

    #[test]
    fn step_set_add_if_absent() {
        let equality = DefaultEquality;
        let mut set: StepSet<(i32, i32)> = StepSet::new(&equality);
        assert!(set.insert((0, 1)));
        assert!(!set.insert((0, 1)));
        assert!(set.insert((1, 0)));
        assert!(set.contains(&(1, 0)));
        assert!(!set.contains(&(1, 1)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn step_set_uses_caller_equality() {
        let equality = KeyEquality::new(|s: &(i32, i32)| s.0);
        let mut set: StepSet<(i32, i32)> = StepSet::new(&equality);
        assert!(set.insert((3, 1)));
        assert!(set.contains(&(3, 9)));
        assert!(!set.insert((3, 4)));
    }
}
