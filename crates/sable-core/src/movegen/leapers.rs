//! Knight and king move generation.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::direction::Direction;
use crate::piece::Piece;

use super::list::{MoveGroup, Origin, PieceMoves};

const NOT_A: Bitboard = Bitboard::new(!Bitboard::FILE_A.inner());
const NOT_AB: Bitboard = Bitboard::new(!(Bitboard::FILE_A.inner() | Bitboard::FILE_B.inner()));
const NOT_H: Bitboard = Bitboard::new(!Bitboard::FILE_H.inner());
const NOT_GH: Bitboard = Bitboard::new(!(Bitboard::FILE_G.inner() | Bitboard::FILE_H.inner()));

/// Squares a knight on the given square attacks.
///
/// Each of the eight jumps is a raw shift; destinations that wrapped onto the
/// opposite edge are masked off by file.
pub fn knight_attacks(from: Bitboard) -> Bitboard {
    ((from << 17) & NOT_A)
        | ((from << 15) & NOT_H)
        | ((from << 10) & NOT_AB)
        | ((from << 6) & NOT_GH)
        | ((from >> 17) & NOT_H)
        | ((from >> 15) & NOT_A)
        | ((from >> 10) & NOT_GH)
        | ((from >> 6) & NOT_AB)
}

/// Squares a king on the given square attacks.
pub fn king_attacks(from: Bitboard) -> Bitboard {
    Direction::ALL
        .into_iter()
        .fold(Bitboard::EMPTY, |acc, dir| acc | from.shift(dir))
}

/// Generate pseudo-legal moves for every knight or king of `piece`'s identity.
pub(super) fn leaper_moves(board: &Board, piece: Piece, attacks: fn(Bitboard) -> Bitboard) -> PieceMoves {
    let empty = board.empty();
    let enemy = board.opponent_occupancy(piece.color());
    let mut moves = PieceMoves::new();

    for src in board.piece_bitboard(piece) {
        let targets = attacks(src.bitboard());
        let origin = Origin::Square(src);
        moves.push(MoveGroup::quiet(piece, origin, targets & empty));
        moves.push(MoveGroup::captures(piece, origin, targets & enemy));
    }

    moves
}
