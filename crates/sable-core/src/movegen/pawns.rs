//! Pawn move generation, set-wise over all pawns of one side.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::chess_move::{Move, Special};
use crate::color::Color;
use crate::direction::Direction;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;

use super::list::{MoveGroup, Origin, PieceMoves};

/// Diagonal capture directions for `color`.
const fn capture_directions(color: Color) -> [Direction; 2] {
    match color {
        Color::White => [Direction::NorthWest, Direction::NorthEast],
        Color::Black => [Direction::SouthWest, Direction::SouthEast],
    }
}

/// Generate pseudo-legal pawn moves for `color`.
///
/// `previous` is the move that led to this position; an opposing double push
/// there enables en passant, whether or not it carries [`Special::DoublePush`].
pub(super) fn pawn_moves(board: &Board, color: Color, previous: Option<Move>) -> PieceMoves {
    let piece = Piece::new(PieceKind::Pawn, color);
    let pawns = board.piece_bitboard(piece);
    let empty = board.empty();
    let enemy = board.opponent_occupancy(color);
    let forward = color.forward();
    let back = forward.opposite();
    let mut moves = PieceMoves::new();

    // Single pushes: pawns standing right behind an empty square.
    let single_sources = empty.shift(back) & pawns;
    moves.push(MoveGroup::quiet(
        piece,
        Origin::Offset(forward.offset()),
        single_sources.shift(forward),
    ));

    // Double pushes: both squares ahead empty, landing on the fourth (fifth) rank.
    let double_sources = ((color.double_push_rank() & empty).shift(back) & empty).shift(back) & pawns;
    moves.push(
        MoveGroup::quiet(
            piece,
            Origin::Offset(2 * forward.offset()),
            double_sources.shift(forward).shift(forward),
        )
        .with_special(Special::DoublePush),
    );

    // Diagonal captures. `shift` drops squares that would wrap across the a/h edge.
    for dir in capture_directions(color) {
        let sources = enemy.shift(dir.opposite()) & pawns;
        moves.push(MoveGroup::captures(
            piece,
            Origin::Offset(dir.offset()),
            sources.shift(dir),
        ));
    }

    if let Some(last) = previous {
        push_en_passant(&mut moves, piece, pawns, last);
    }

    moves
}

/// Captures onto the square an opposing pawn skipped with its double push.
fn push_en_passant(moves: &mut PieceMoves, piece: Piece, pawns: Bitboard, last: Move) {
    let victim = Piece::new(PieceKind::Pawn, !piece.color());
    let two_squares = last.source().index().abs_diff(last.dest().index()) == 16;
    if last.piece() != victim || !(last.is_double_push() || two_squares) {
        return;
    }

    let pushed = last.dest();
    let Some(target) = pushed.offset(piece.color().forward().offset()) else {
        return;
    };
    let beside = pushed.bitboard().shift(Direction::East) | pushed.bitboard().shift(Direction::West);
    for src in beside & pawns {
        moves.push(
            MoveGroup::captures(piece, Origin::Square(src), target.bitboard())
                .with_special(Special::EnPassant),
        );
    }
}
