//! Generic minimax with fail-soft alpha-beta pruning.
//!
//! The solver knows nothing about chess. It walks any state graph exposed
//! through [`Successor`], alternating max and min nodes. Depth starts at 1 for
//! the root and grows by one per descent; the successor sees it in both
//! [`Successor::is_terminal`] and [`Successor::next`].

use std::fmt;

use tracing::trace;

use crate::error::{ExpansionKind, SearchError};

/// Values the solver can order and bound.
pub trait SearchValue: Copy + PartialOrd + fmt::Debug {
    /// A value no real outcome falls below.
    const NEG_INFINITY: Self;
    /// A value no real outcome exceeds.
    const INFINITY: Self;
}

macro_rules! impl_search_value {
    ($($ty:ty => $low:expr, $high:expr);* $(;)?) => {
        $(
            impl SearchValue for $ty {
                const NEG_INFINITY: Self = $low;
                const INFINITY: Self = $high;
            }
        )*
    };
}

impl_search_value! {
    i32 => i32::MIN, i32::MAX;
    i64 => i64::MIN, i64::MAX;
    f32 => f32::NEG_INFINITY, f32::INFINITY;
    f64 => f64::NEG_INFINITY, f64::INFINITY;
}

/// What a successor produces for a state.
#[derive(Debug, Clone, PartialEq)]
pub enum Expansion<V, I> {
    /// The state is a leaf with this value.
    Terminal(V),
    /// The state's children, in the order they should be searched.
    Expand(I),
}

impl<V, I> Expansion<V, I> {
    pub fn kind(&self) -> ExpansionKind {
        match self {
            Expansion::Terminal(_) => ExpansionKind::Terminal,
            Expansion::Expand(_) => ExpansionKind::Expand,
        }
    }
}

/// A searchable state graph.
///
/// For every state the solver first asks [`is_terminal`](Self::is_terminal),
/// then calls [`next`](Self::next) with the same state and depth. `next` must
/// return [`Expansion::Terminal`] exactly when `is_terminal` returned `true`.
///
/// [`enter`](Self::enter) and [`leave`](Self::leave) bracket every descent into
/// a child, in strict LIFO order, on every exit path including cutoffs and
/// errors. The root state is never entered.
pub trait Successor {
    type State;
    type Value: SearchValue;
    type Children: IntoIterator<Item = Self::State>;

    fn next(&mut self, state: &Self::State, depth: u32) -> Expansion<Self::Value, Self::Children>;

    fn is_terminal(&mut self, state: &Self::State, depth: u32) -> bool;

    fn enter(&mut self, _state: &Self::State) -> Result<(), SearchError> {
        Ok(())
    }

    fn leave(&mut self, _state: &Self::State) -> Result<(), SearchError> {
        Ok(())
    }
}

/// The result of searching a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome<V> {
    /// Minimax value, or a bound on it when the node was cut off.
    pub value: V,
    /// Whether the value came straight from a terminal state.
    pub terminal: bool,
}

impl<V> Outcome<V> {
    fn leaf(value: V) -> Outcome<V> {
        Outcome { value, terminal: true }
    }

    fn interior(value: V) -> Outcome<V> {
        Outcome { value, terminal: false }
    }
}

type Searched<S> = Result<Outcome<<S as Successor>::Value>, SearchError>;

/// Alpha-beta solver over a [`Successor`].
///
/// An expanded state with no children evaluates to the identity of its node
/// type: negative infinity at max nodes and positive infinity at min nodes.
pub struct AlphaBetaSolver<S: Successor> {
    successor: S,
    nodes: u64,
}

impl<S: Successor> AlphaBetaSolver<S> {
    pub fn new(successor: S) -> Self {
        Self { successor, nodes: 0 }
    }

    pub fn successor(&self) -> &S {
        &self.successor
    }

    pub fn successor_mut(&mut self) -> &mut S {
        &mut self.successor
    }

    pub fn into_inner(self) -> S {
        self.successor
    }

    /// States visited by the most recent search, the root included.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search with the root as a min node.
    pub fn minmax(&mut self, state: &S::State) -> Searched<S> {
        self.nodes = 0;
        self.min_node(state, S::Value::NEG_INFINITY, S::Value::INFINITY, 0)
    }

    /// Search with the root as a max node.
    pub fn maxmin(&mut self, state: &S::State) -> Searched<S> {
        self.nodes = 0;
        self.max_node(state, S::Value::NEG_INFINITY, S::Value::INFINITY, 0)
    }

    /// The root child with the highest value, searched as in [`maxmin`](Self::maxmin).
    ///
    /// Ties keep the earliest child. Returns `None` when the root is terminal
    /// or has no children.
    pub fn best_max(&mut self, state: &S::State) -> Result<Option<(S::State, Outcome<S::Value>)>, SearchError> {
        self.nodes = 0;
        self.best_child(state, true)
    }

    /// The root child with the lowest value, searched as in [`minmax`](Self::minmax).
    pub fn best_min(&mut self, state: &S::State) -> Result<Option<(S::State, Outcome<S::Value>)>, SearchError> {
        self.nodes = 0;
        self.best_child(state, false)
    }

    fn best_child(
        &mut self,
        state: &S::State,
        maximizing: bool,
    ) -> Result<Option<(S::State, Outcome<S::Value>)>, SearchError> {
        let depth = 1;
        self.nodes += 1;
        let children = match self.expand(state, depth)? {
            Expansion::Terminal(_) => return Ok(None),
            Expansion::Expand(children) => children,
        };

        let mut alpha = S::Value::NEG_INFINITY;
        let mut beta = S::Value::INFINITY;
        let mut best: Option<(S::State, Outcome<S::Value>)> = None;
        for child in children {
            let outcome = if maximizing {
                self.descend(&child, move |solver, child| solver.min_node(child, alpha, beta, depth))?
            } else {
                self.descend(&child, move |solver, child| solver.max_node(child, alpha, beta, depth))?
            };
            let improves = match &best {
                None => true,
                Some((_, current)) if maximizing => outcome.value > current.value,
                Some((_, current)) => outcome.value < current.value,
            };
            if improves {
                if maximizing {
                    alpha = outcome.value;
                } else {
                    beta = outcome.value;
                }
                best = Some((child, outcome));
            }
        }
        Ok(best)
    }

    fn max_node(&mut self, state: &S::State, mut alpha: S::Value, beta: S::Value, depth: u32) -> Searched<S> {
        let depth = depth + 1;
        self.nodes += 1;
        let children = match self.expand(state, depth)? {
            Expansion::Terminal(value) => return Ok(Outcome::leaf(value)),
            Expansion::Expand(children) => children,
        };

        let mut value = S::Value::NEG_INFINITY;
        for child in children {
            let outcome = self.descend(&child, move |solver, child| solver.min_node(child, alpha, beta, depth))?;
            if outcome.value > value {
                value = outcome.value;
            }
            if value >= beta {
                trace!(depth, ?value, ?beta, from_terminal = outcome.terminal, "max node cutoff");
                return Ok(Outcome::interior(value));
            }
            if value > alpha {
                alpha = value;
            }
        }
        Ok(Outcome::interior(value))
    }

    fn min_node(&mut self, state: &S::State, alpha: S::Value, mut beta: S::Value, depth: u32) -> Searched<S> {
        let depth = depth + 1;
        self.nodes += 1;
        let children = match self.expand(state, depth)? {
            Expansion::Terminal(value) => return Ok(Outcome::leaf(value)),
            Expansion::Expand(children) => children,
        };

        let mut value = S::Value::INFINITY;
        for child in children {
            let outcome = self.descend(&child, move |solver, child| solver.max_node(child, alpha, beta, depth))?;
            if outcome.value < value {
                value = outcome.value;
            }
            if value <= alpha {
                trace!(depth, ?value, ?alpha, from_terminal = outcome.terminal, "min node cutoff");
                return Ok(Outcome::interior(value));
            }
            if value < beta {
                beta = value;
            }
        }
        Ok(Outcome::interior(value))
    }

    /// Ask the successor for `state`'s expansion and check it against `is_terminal`.
    fn expand(&mut self, state: &S::State, depth: u32) -> Result<Expansion<S::Value, S::Children>, SearchError> {
        let terminal = self.successor.is_terminal(state, depth);
        let expansion = self.successor.next(state, depth);
        let expected = if terminal {
            ExpansionKind::Terminal
        } else {
            ExpansionKind::Expand
        };
        if expansion.kind() != expected {
            return Err(SearchError::MalformedSuccessor { depth, expected });
        }
        Ok(expansion)
    }

    /// Run `search` on `child` between `enter` and `leave`.
    ///
    /// `leave` runs even when the search fails; the search error wins.
    fn descend(
        &mut self,
        child: &S::State,
        search: impl FnOnce(&mut Self, &S::State) -> Searched<S>,
    ) -> Searched<S> {
        self.successor.enter(child)?;
        let searched = search(self, child);
        let left = self.successor.leave(child);
        let outcome = searched?;
        left?;
        Ok(outcome)
    }
}
