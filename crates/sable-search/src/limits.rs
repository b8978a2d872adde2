//! Search limits: ply depth, node budget and wall-clock deadline.

use std::fmt;
use std::time::{Duration, Instant};

/// Default maximum depth in plies.
pub const DEFAULT_MAX_PLIES: u32 = 4;

/// Which limit ended a line of search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitReason {
    Depth,
    Nodes,
    Time,
}

impl fmt::Display for LimitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitReason::Depth => f.write_str("depth"),
            LimitReason::Nodes => f.write_str("node budget"),
            LimitReason::Time => f.write_str("deadline"),
        }
    }
}

/// Bounds on how far a search may go.
///
/// Depth is the solver's depth, which is 1 at the root; a node at depth `d`
/// lies `d - 1` plies below the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    max_plies: u32,
    node_budget: Option<u64>,
    deadline: Option<Instant>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PLIES)
    }
}

impl SearchLimits {
    /// Limit the search to `max_plies` plies with no node or time budget.
    pub fn new(max_plies: u32) -> Self {
        Self {
            max_plies,
            node_budget: None,
            deadline: None,
        }
    }

    pub fn with_max_plies(mut self, max_plies: u32) -> Self {
        self.max_plies = max_plies;
        self
    }

    /// Stop expanding once `nodes` states have been visited.
    pub fn with_node_budget(mut self, nodes: u64) -> Self {
        self.node_budget = Some(nodes);
        self
    }

    /// Stop expanding once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stop expanding once `budget` has elapsed from now.
    pub fn with_time_budget(self, budget: Duration) -> Self {
        self.with_deadline(Instant::now() + budget)
    }

    pub fn max_plies(&self) -> u32 {
        self.max_plies
    }

    pub fn node_budget(&self) -> Option<u64> {
        self.node_budget
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The first limit reached by a node at `depth` after `visited` nodes, if any.
    ///
    /// The clock is read only when a deadline is set.
    pub fn exceeded(&self, depth: u32, visited: u64) -> Option<LimitReason> {
        if depth.saturating_sub(1) >= self.max_plies {
            return Some(LimitReason::Depth);
        }
        if self.node_budget.is_some_and(|budget| visited > budget) {
            return Some(LimitReason::Nodes);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some(LimitReason::Time);
        }
        None
    }
}
