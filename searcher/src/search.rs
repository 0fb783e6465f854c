//! Configuring a search, and the outcome of running one.

use std::fmt;
use std::hash::Hash;

use crate::algorithm::AlgorithmKind;
use crate::comparer::{Combined, DefaultEquality, NaturalOrder, NodeComparer, StepEquality};
use crate::errors::{Result, SearchError};
use crate::node::{Node, NodeArena, NodeId};
use crate::observer::{Observer, ObserverFactory};
use crate::registry;

type Expander<S> = Box<dyn Fn(&S, usize) -> Vec<S>>;
type Converter<S, F> = Box<dyn Fn(&S, usize) -> Vec<F>>;
type Filter<F> = Box<dyn Fn(&F) -> bool>;

/// Tunable limits and diagnostics for a run.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of deepening iterations for IDA*.
    pub max_iterations: usize,

    /// Emit a progress event every this many expansions.
    pub progress_interval: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            max_iterations: 1_000,
            progress_interval: None,
        }
    }
}

/// Collects the pieces of a search, and checks them before any
/// search work is done.
pub struct SearchBuilder<S, F> {
    from: S,
    to: S,
    expander: Option<Expander<S>>,
    converter: Converter<S, F>,
    filters: Vec<Filter<F>>,
    comparer: Option<Box<dyn NodeComparer<F, S>>>,
    /// Used when no ordering is configured.
    fallback: Option<Box<dyn NodeComparer<F, S>>>,
    equality: Box<dyn StepEquality<S>>,
    observer: Option<ObserverFactory<F, S>>,
    options: SearchOptions,
    error: Option<SearchError>,
}

impl<S> SearchBuilder<S, S>
where
    S: Clone + Eq + Hash + 'static,
{
    /// Start configuring a search from `from` to `to`.
    ///
    /// Each step is its own (single) factor until [SearchBuilder::convert]
    /// says otherwise.
    pub fn new(from: S, to: S) -> Self {
        SearchBuilder {
            from,
            to,
            expander: None,
            converter: Box::new(|step: &S, _level: usize| vec![step.clone()]),
            filters: Vec::new(),
            comparer: None,
            fallback: None,
            equality: Box::new(DefaultEquality),
            observer: None,
            options: SearchOptions::default(),
            error: None,
        }
    }
}

impl<S> SearchBuilder<S, S>
where
    S: Clone + Eq + Hash + Ord + 'static,
{
    /// Like [SearchBuilder::new], but steps are ordered naturally unless
    /// another ordering is given.
    pub fn ordered(from: S, to: S) -> Self {
        let mut builder = Self::new(from, to);
        builder.fallback = Some(Box::new(NaturalOrder));
        builder
    }
}

impl<S, F> SearchBuilder<S, F>
where
    S: 'static,
    F: 'static,
{
    /// Set the function producing the steps reachable from a step at a given level.
    pub fn expand<E>(mut self, expander: E) -> Self
    where
        E: Fn(&S, usize) -> Vec<S> + 'static,
    {
        self.expander = Some(Box::new(expander));
        self
    }

    /// Project each step onto the factors used for ordering.
    ///
    /// Orderings, filters and observers are typed on the factor, so they
    /// are reset here and must be configured afterwards.
    pub fn convert<G, C>(self, converter: C) -> SearchBuilder<S, G>
    where
        C: Fn(&S, usize) -> Vec<G> + 'static,
    {
        SearchBuilder {
            from: self.from,
            to: self.to,
            expander: self.expander,
            converter: Box::new(converter),
            filters: Vec::new(),
            comparer: None,
            fallback: None,
            equality: self.equality,
            observer: None,
            options: self.options,
            error: self.error,
        }
    }

    /// Like [SearchBuilder::convert], for factors which are ordered
    /// naturally unless another ordering is given.
    pub fn convert_ordered<G, C>(self, converter: C) -> SearchBuilder<S, G>
    where
        G: Ord + 'static,
        C: Fn(&S, usize) -> Vec<G> + 'static,
    {
        let mut builder = self.convert(converter);
        builder.fallback = Some(Box::new(NaturalOrder));
        builder
    }

    /// Exclude factors for which `predicate` is false. A step whose
    /// factors are all excluded is never visited.
    pub fn filter<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&F) -> bool + 'static,
    {
        self.filters.push(Box::new(predicate));
        self
    }

    /// Set the primary ordering, replacing any previous ordering.
    pub fn order_by<C>(mut self, comparer: C) -> Self
    where
        C: NodeComparer<F, S> + 'static,
    {
        self.comparer = Some(Box::new(comparer));
        self
    }

    /// Break ties in the current ordering with `comparer`.
    pub fn then_by<C>(mut self, comparer: C) -> Self
    where
        C: NodeComparer<F, S> + 'static,
    {
        match self.comparer.take() {
            Some(primary) => self.comparer = Some(Box::new(Combined::new(primary, comparer))),
            None => {
                self.error.get_or_insert(SearchError::ThenByWithoutOrderBy);
            }
        }
        self
    }

    /// Decide which steps are the same step.
    pub fn equality<E>(mut self, equality: E) -> Self
    where
        E: StepEquality<S> + 'static,
    {
        self.equality = Box::new(equality);
        self
    }

    /// Attach an observer factory, called once for each run.
    pub fn observe<G, O>(mut self, factory: G) -> Self
    where
        G: Fn() -> O + 'static,
        O: Observer<F, S> + 'static,
    {
        self.observer = Some(Box::new(move || Box::new(factory()) as Box<dyn Observer<F, S>>));
        self
    }

    pub fn options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Check the configuration and produce a runnable search.
    pub fn build(self) -> Result<HeuristicSearch<S, F>> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let expander = self.expander.ok_or(SearchError::MissingExpander)?;
        let comparer = self
            .comparer
            .or(self.fallback)
            .ok_or(SearchError::MissingComparer)?;
        if self.options.max_iterations == 0 {
            return Err(SearchError::ZeroIterations);
        }

        Ok(HeuristicSearch {
            from: self.from,
            to: self.to,
            expander,
            converter: self.converter,
            filters: self.filters,
            comparer,
            equality: self.equality,
            observer: self.observer,
            options: self.options,
        })
    }
}

impl<S, F> SearchBuilder<S, F>
where
    S: 'static,
    F: Ord + 'static,
{
    /// Order by the factor's own ordering, then by level.
    pub fn natural_order(self) -> Self {
        self.order_by(NaturalOrder)
    }
}

impl<S, F> fmt::Debug for SearchBuilder<S, F>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SearchBuilder")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("options", &self.options)
            .finish()
    }
}

/// A fully configured search, which can be run with any algorithm,
/// any number of times.
pub struct HeuristicSearch<S, F> {
    pub(crate) from: S,
    pub(crate) to: S,
    pub(crate) expander: Expander<S>,
    pub(crate) converter: Converter<S, F>,
    pub(crate) filters: Vec<Filter<F>>,
    pub(crate) comparer: Box<dyn NodeComparer<F, S>>,
    pub(crate) equality: Box<dyn StepEquality<S>>,
    pub(crate) observer: Option<ObserverFactory<F, S>>,
    pub(crate) options: SearchOptions,
}

impl<S, F> HeuristicSearch<S, F> {
    pub fn from(&self) -> &S {
        &self.from
    }

    pub fn to(&self) -> &S {
        &self.to
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }
}

impl<S, F> HeuristicSearch<S, F>
where
    S: Clone,
    F: Clone,
{
    pub fn run(&self, algorithm: AlgorithmKind) -> SearchOutcome<S, F> {
        algorithm.run(self)
    }

    /// Run the algorithm registered under `name`.
    pub fn run_named(&self, name: &str) -> Result<SearchOutcome<S, F>> {
        Ok(self.run(registry::lookup(name)?))
    }

    pub fn astar(&self) -> SearchOutcome<S, F> {
        self.run(AlgorithmKind::AStar)
    }

    pub fn best_first(&self) -> SearchOutcome<S, F> {
        self.run(AlgorithmKind::BestFirst)
    }

    pub fn idastar(&self) -> SearchOutcome<S, F> {
        self.run(AlgorithmKind::IterativeDeepeningAStar)
    }

    pub fn rbfs(&self) -> SearchOutcome<S, F> {
        self.run(AlgorithmKind::RecursiveBestFirst)
    }
}

impl<S, F> fmt::Debug for HeuristicSearch<S, F>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HeuristicSearch")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("options", &self.options)
            .finish()
    }
}

/// The result of a single run: either the node which reached the goal,
/// or nothing.
#[derive(Debug)]
pub struct SearchOutcome<S, F> {
    nodes: NodeArena<F, S>,
    goal: Option<NodeId>,
    algorithm: AlgorithmKind,
    expansions: usize,
}

impl<S, F> SearchOutcome<S, F> {
    pub(crate) fn new(
        nodes: NodeArena<F, S>,
        goal: Option<NodeId>,
        algorithm: AlgorithmKind,
        expansions: usize,
    ) -> Self {
        Self {
            nodes,
            goal,
            algorithm,
            expansions,
        }
    }

    pub fn is_found(&self) -> bool {
        self.goal.is_some()
    }

    /// The node which reached the goal.
    pub fn node(&self) -> Option<&Node<F, S>> {
        self.goal.map(|id| &self.nodes[id])
    }

    /// Nodes on the path from the start to the goal. Empty when no path was found.
    pub fn path(&self) -> Vec<&Node<F, S>> {
        match self.goal {
            Some(goal) => {
                let root = self.nodes.link(goal);
                self.nodes.forward(root).collect()
            }
            None => Vec::new(),
        }
    }

    /// Number of nodes on the path, counting both ends.
    pub fn len(&self) -> usize {
        self.node().map(|n| n.level() + 1).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.goal.is_none()
    }

    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    /// How many times the expansion function was called.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    pub fn nodes(&self) -> &NodeArena<F, S> {
        &self.nodes
    }
}

impl<S, F> SearchOutcome<S, F>
where
    S: Clone,
{
    /// The steps on the path from the start to the goal.
    pub fn steps(&self) -> Vec<S> {
        self.path().into_iter().map(|n| n.step().clone()).collect()
    }
}
