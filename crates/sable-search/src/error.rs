//! Error types for sable-search.

use std::fmt;

use sable_core::BoardError;

/// The kind of expansion a [`Successor`](crate::Successor) was required to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpansionKind {
    /// A terminal value, because `is_terminal` held.
    Terminal,
    /// A set of children, because `is_terminal` did not hold.
    Expand,
}

impl fmt::Display for ExpansionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpansionKind::Terminal => f.write_str("a terminal value"),
            ExpansionKind::Expand => f.write_str("child states"),
        }
    }
}

/// Errors that abort a search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// `next` disagreed with `is_terminal` for the same state and depth.
    #[error("successor contract violated at depth {depth}: expected {expected}")]
    MalformedSuccessor { depth: u32, expected: ExpansionKind },

    /// Applying or reverting a move on the searched board failed.
    #[error("board error during search: {0}")]
    Board(#[from] BoardError),
}
