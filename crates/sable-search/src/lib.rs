//! Alpha-beta search for sable: a generic solver plus the chess board adapter.

mod board_successor;
mod error;
mod limits;
mod solver;

pub use board_successor::{BoardSuccessor, Evaluate, Node, NodeChildren, best_move};
pub use error::{ExpansionKind, SearchError};
pub use limits::{DEFAULT_MAX_PLIES, LimitReason, SearchLimits};
pub use solver::{AlphaBetaSolver, Expansion, Outcome, SearchValue, Successor};
