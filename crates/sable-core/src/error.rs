//! Error types for board manipulation, FEN parsing and attack-table construction.

use std::fmt;

use crate::attacks::SliderFamily;
use crate::square::Square;

/// Errors from board construction and move history.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// `revert_move` was called with no applied move to undo.
    #[error("no move to revert: history is empty")]
    HistoryUnderflow,
    /// A square index outside 0..64.
    #[error("square index {index} is off the board")]
    InvalidSquare {
        /// The rejected index.
        index: u8,
    },
    /// Two piece bitboards claim the same square.
    #[error("overlapping piece bitboards")]
    OverlappingPieces,
}

/// Raised when a sliding attack table disagrees with the ray-scan reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttackTableError {
    #[error("{family} attacks from {square} disagree with ray scan for occupancy {occupancy:#018x}")]
    Inconsistency {
        family: SliderFamily,
        square: Square,
        occupancy: u64,
    },
}

/// Errors that occur when parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// The input has no fields at all.
    Empty,
    /// The piece placement section does not have exactly 8 ranks.
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank in the piece placement describes more or fewer than 8 squares.
    BadRankLength {
        /// Zero-based rank index (0 = rank 8 in FEN, 7 = rank 1).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the piece placement.
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The active color field is not "w" or "b".
    InvalidColor {
        /// The invalid color string.
        found: String,
    },
    /// The parsed placement is rejected by the board.
    InvalidBoard {
        /// The underlying board error.
        source: BoardError,
    },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::Empty => write!(f, "empty FEN string"),
            FenError::WrongRankCount { found } => {
                write!(f, "expected 8 ranks in piece placement, found {found}")
            }
            FenError::BadRankLength { rank_index, length } => {
                write!(
                    f,
                    "rank {rank_index} describes {length} squares, expected 8"
                )
            }
            FenError::InvalidPieceChar { character } => {
                write!(f, "invalid piece character: '{character}'")
            }
            FenError::InvalidColor { found } => {
                write!(f, "invalid active color: \"{found}\"")
            }
            FenError::InvalidBoard { source } => {
                write!(f, "invalid board: {source}")
            }
        }
    }
}

impl std::error::Error for FenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FenError::InvalidBoard { source } => Some(source),
            _ => None,
        }
    }
}

impl From<BoardError> for FenError {
    fn from(source: BoardError) -> Self {
        FenError::InvalidBoard { source }
    }
}
