//! Bishop, rook and queen move generation.

use crate::attacks::{SliderBackend, SliderFamily};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::list::{MoveGroup, Origin, PieceMoves};

fn slider_attacks(backend: SliderBackend, kind: PieceKind, sq: Square, occupied: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Bishop => backend.attacks(SliderFamily::Bishop, sq, occupied),
        PieceKind::Rook => backend.attacks(SliderFamily::Rook, sq, occupied),
        PieceKind::Queen => {
            backend.attacks(SliderFamily::Bishop, sq, occupied)
                | backend.attacks(SliderFamily::Rook, sq, occupied)
        }
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => Bitboard::EMPTY,
    }
}

/// Generate pseudo-legal moves for every bishop, rook or queen of `piece`'s identity.
pub(super) fn slider_moves(board: &Board, piece: Piece, backend: SliderBackend) -> PieceMoves {
    debug_assert!(piece.kind().is_slider());
    let occupied = board.occupancy(None);
    let empty = !occupied;
    let enemy = board.opponent_occupancy(piece.color());
    let mut moves = PieceMoves::new();

    for src in board.piece_bitboard(piece) {
        let targets = slider_attacks(backend, piece.kind(), src, occupied);
        let origin = Origin::Square(src);
        moves.push(MoveGroup::quiet(piece, origin, targets & empty));
        moves.push(MoveGroup::captures(piece, origin, targets & enemy));
    }

    moves
}
