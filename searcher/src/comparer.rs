//! Orderings over search nodes, and equality over steps.
//!
//! A [NodeComparer] knows how to order bare factors, and by default
//! orders nodes by factor and then by ascending level, so shorter paths
//! win ties. Comparers compose: [Combined] breaks the ties of one
//! comparer with another, and [FactorOnly] drops the level tie-break
//! for algorithms where path length must never influence selection.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::node::Node;

/// Total ordering over nodes and over their factors.
///
/// Comparers which look at more of a node than its factor, such as an
/// estimate built from the level, override [NodeComparer::rank]. The
/// combinators below compose ranks, so that ordering survives
/// [Combined] and [Reversed].
pub trait NodeComparer<F, S> {
    /// Order two factors.
    fn compare_factor(&self, x: &F, y: &F) -> Ordering;

    /// Order two nodes, before any tie-break on level.
    fn rank(&self, x: &Node<F, S>, y: &Node<F, S>) -> Ordering {
        self.compare_factor(x.factor(), y.factor())
    }

    /// Order two nodes: by rank, then shallowest first.
    fn compare(&self, x: &Node<F, S>, y: &Node<F, S>) -> Ordering {
        self.rank(x, y).then_with(|| x.level().cmp(&y.level()))
    }
}

impl<F, S, C> NodeComparer<F, S> for Box<C>
where
    C: NodeComparer<F, S> + ?Sized,
{
    fn compare_factor(&self, x: &F, y: &F) -> Ordering {
        (**self).compare_factor(x, y)
    }

    fn rank(&self, x: &Node<F, S>, y: &Node<F, S>) -> Ordering {
        (**self).rank(x, y)
    }

    fn compare(&self, x: &Node<F, S>, y: &Node<F, S>) -> Ordering {
        (**self).compare(x, y)
    }
}

impl<'c, F, S, C> NodeComparer<F, S> for &'c C
where
    C: NodeComparer<F, S> + ?Sized,
{
    fn compare_factor(&self, x: &F, y: &F) -> Ordering {
        (**self).compare_factor(x, y)
    }

    fn rank(&self, x: &Node<F, S>, y: &Node<F, S>) -> Ordering {
        (**self).rank(x, y)
    }

    fn compare(&self, x: &Node<F, S>, y: &Node<F, S>) -> Ordering {
        (**self).compare(x, y)
    }
}

/// Orders factors by their own [Ord] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<F, S> NodeComparer<F, S> for NaturalOrder
where
    F: Ord,
{
    fn compare_factor(&self, x: &F, y: &F) -> Ordering {
        x.cmp(y)
    }
}

/// Orders factors by a key projected from each factor.
#[derive(Clone)]
pub struct KeyComparer<G> {
    key: G,
}

impl<G> KeyComparer<G> {
    pub fn new(key: G) -> Self {
        Self { key }
    }
}

impl<G> fmt::Debug for KeyComparer<G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("KeyComparer").finish()
    }
}

impl<F, S, K, G> NodeComparer<F, S> for KeyComparer<G>
where
    G: Fn(&F) -> K,
    K: Ord,
{
    fn compare_factor(&self, x: &F, y: &F) -> Ordering {
        (self.key)(x).cmp(&(self.key)(y))
    }
}

/// Orders factors with an arbitrary comparison function.
#[derive(Clone)]
pub struct FnComparer<G> {
    compare: G,
}

impl<G> FnComparer<G> {
    pub fn new(compare: G) -> Self {
        Self { compare }
    }
}

impl<G> fmt::Debug for FnComparer<G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FnComparer").finish()
    }
}

impl<F, S, G> NodeComparer<F, S> for FnComparer<G>
where
    G: Fn(&F, &F) -> Ordering,
{
    fn compare_factor(&self, x: &F, y: &F) -> Ordering {
        (self.compare)(x, y)
    }
}

/// Orders by the `primary` comparer, and uses `secondary` only to
/// break ties. Nodes equal under both are ordered by level.
#[derive(Debug, Clone)]
pub struct Combined<A, B> {
    primary: A,
    secondary: B,
}

impl<A, B> Combined<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }
}

impl<F, S, A, B> NodeComparer<F, S> for Combined<A, B>
where
    A: NodeComparer<F, S>,
    B: NodeComparer<F, S>,
{
    fn compare_factor(&self, x: &F, y: &F) -> Ordering {
        self.primary
            .compare_factor(x, y)
            .then_with(|| self.secondary.compare_factor(x, y))
    }

    fn rank(&self, x: &Node<F, S>, y: &Node<F, S>) -> Ordering {
        self.primary
            .rank(x, y)
            .then_with(|| self.secondary.rank(x, y))
    }
}

/// Orders nodes by factor alone, ignoring how deep they are.
#[derive(Debug, Clone)]
pub struct FactorOnly<C> {
    inner: C,
}

impl<C> FactorOnly<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<F, S, C> NodeComparer<F, S> for FactorOnly<C>
where
    C: NodeComparer<F, S>,
{
    fn compare_factor(&self, x: &F, y: &F) -> Ordering {
        self.inner.compare_factor(x, y)
    }

    fn compare(&self, x: &Node<F, S>, y: &Node<F, S>) -> Ordering {
        self.inner.compare_factor(x.factor(), y.factor())
    }
}

/// Reverses the ordering of a comparer. The level tie-break still
/// prefers shallower nodes.
#[derive(Debug, Clone)]
pub struct Reversed<C> {
    inner: C,
}

impl<C> Reversed<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<F, S, C> NodeComparer<F, S> for Reversed<C>
where
    C: NodeComparer<F, S>,
{
    fn compare_factor(&self, x: &F, y: &F) -> Ordering {
        self.inner.compare_factor(x, y).reverse()
    }

    fn rank(&self, x: &Node<F, S>, y: &Node<F, S>) -> Ordering {
        self.inner.rank(x, y).reverse()
    }
}

/// Combinators for the comparers in this module.
pub trait ComparerExt: Sized {
    /// Break ties in this ordering with `secondary`.
    fn then_by<B>(self, secondary: B) -> Combined<Self, B> {
        Combined::new(self, secondary)
    }

    /// Derive a comparer which ignores node level.
    fn factor_only(self) -> FactorOnly<Self> {
        FactorOnly::new(self)
    }

    fn reversed(self) -> Reversed<Self> {
        Reversed::new(self)
    }
}

impl ComparerExt for NaturalOrder {}
impl<G> ComparerExt for KeyComparer<G> {}
impl<G> ComparerExt for FnComparer<G> {}
impl<A, B> ComparerExt for Combined<A, B> {}
impl<C> ComparerExt for FactorOnly<C> {}
impl<C> ComparerExt for Reversed<C> {}

/// The lesser of two nodes under `comparer`, preferring `x` on ties.
pub fn min_node<'n, F, S, C>(comparer: &C, x: &'n Node<F, S>, y: &'n Node<F, S>) -> &'n Node<F, S>
where
    C: NodeComparer<F, S> + ?Sized,
{
    if comparer.compare(y, x) == Ordering::Less {
        y
    } else {
        x
    }
}

/// Equivalence relation over steps.
///
/// `hash_step` must agree with `equals`: equal steps hash equally.
pub trait StepEquality<S> {
    fn equals(&self, x: &S, y: &S) -> bool;

    fn hash_step(&self, step: &S) -> u64;
}

impl<S, E> StepEquality<S> for Box<E>
where
    E: StepEquality<S> + ?Sized,
{
    fn equals(&self, x: &S, y: &S) -> bool {
        (**self).equals(x, y)
    }

    fn hash_step(&self, step: &S) -> u64 {
        (**self).hash_step(step)
    }
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Compares steps with their own [Eq] and [Hash] implementations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEquality;

impl<S> StepEquality<S> for DefaultEquality
where
    S: Eq + Hash,
{
    fn equals(&self, x: &S, y: &S) -> bool {
        x == y
    }

    fn hash_step(&self, step: &S) -> u64 {
        hash_of(step)
    }
}

/// Treats steps as equal when a projected key is equal.
#[derive(Clone)]
pub struct KeyEquality<G> {
    key: G,
}

impl<G> KeyEquality<G> {
    pub fn new(key: G) -> Self {
        Self { key }
    }
}

impl<G> fmt::Debug for KeyEquality<G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("KeyEquality").finish()
    }
}

impl<S, K, G> StepEquality<S> for KeyEquality<G>
where
    G: Fn(&S) -> K,
    K: Eq + Hash,
{
    fn equals(&self, x: &S, y: &S) -> bool {
        (self.key)(x) == (self.key)(y)
    }

    fn hash_step(&self, step: &S) -> u64 {
        hash_of(&(self.key)(step))
    }
}
