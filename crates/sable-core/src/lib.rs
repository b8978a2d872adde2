//! Core chess types: bitboards, board state with move history, sliding
//! attack tables, and lazy pseudo-legal move generation.

pub mod attacks;
mod bitboard;
mod board;
mod chess_move;
mod color;
mod direction;
mod error;
mod fen;
pub mod movegen;
mod perft;
mod piece;
mod piece_kind;
mod square;

pub use attacks::{SliderBackend, SliderFamily, SlidingAttackTable};
pub use bitboard::Bitboard;
pub use board::{Board, MoveGuard, PieceCounts, Placement, PrettyBoard};
pub use chess_move::{Move, Special};
pub use color::Color;
pub use direction::Direction;
pub use error::{AttackTableError, BoardError, FenError};
pub use fen::{FenPlacement, STARTING_FEN, parse_fen};
pub use movegen::{MoveGen, MoveGroup, MoveList, Origin, PieceMoves, generate_moves};
pub use perft::{divide, perft, perft_by_depth, perft_by_depth_with};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use square::Square;
