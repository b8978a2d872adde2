//! Pseudo-legal move generation.
//!
//! Moves may leave the mover's own king attacked; legality is the caller's
//! concern. Castling and promotion are not generated.

mod leapers;
mod list;
mod pawns;
mod sliders;

use crate::attacks::SliderBackend;
use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;

pub use self::leapers::{king_attacks, knight_attacks};
pub use self::list::{MoveGroup, MoveList, Origin, PieceMoves};

use self::leapers::leaper_moves;
use self::pawns::pawn_moves;
use self::sliders::slider_moves;

/// Move generator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveGen {
    /// Algorithm used for bishop, rook and queen attacks.
    pub sliders: SliderBackend,
}

impl MoveGen {
    pub fn new(sliders: SliderBackend) -> MoveGen {
        MoveGen { sliders }
    }

    /// Return a copy using `sliders` for sliding attacks.
    pub fn with_sliders(mut self, sliders: SliderBackend) -> MoveGen {
        self.sliders = sliders;
        self
    }

    /// Pseudo-legal moves of every piece matching `piece`.
    ///
    /// `previous` is the move that produced `board`; it only matters for pawns,
    /// which may capture en passant after an opposing double push.
    pub fn piece_moves(&self, board: &Board, piece: Piece, previous: Option<Move>) -> PieceMoves {
        match piece.kind() {
            PieceKind::Pawn => pawn_moves(board, piece.color(), previous),
            PieceKind::Knight => leaper_moves(board, piece, knight_attacks),
            PieceKind::King => leaper_moves(board, piece, king_attacks),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                slider_moves(board, piece, self.sliders)
            }
        }
    }

    /// Pseudo-legal moves of every piece of `color`, chained in piece-kind order.
    pub fn moves(&self, board: &Board, color: Color, previous: Option<Move>) -> MoveList {
        let pieces = PieceKind::ALL
            .into_iter()
            .map(|kind| self.piece_moves(board, Piece::new(kind, color), previous))
            .collect();
        MoveList::from_pieces(pieces)
    }
}

/// Pseudo-legal moves for `color` using the default generator.
pub fn generate_moves(board: &Board, color: Color, previous: Option<Move>) -> MoveList {
    MoveGen::default().moves(board, color, previous)
}
