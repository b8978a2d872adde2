//! The board: one bitboard per piece identity plus a history of snapshots.

use std::fmt;
use std::ops::{Deref, Index};

use crate::bitboard::Bitboard;
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::BoardError;
use crate::piece::Piece;
use crate::square::Square;

/// Raw piece placement, indexed by [`Piece::index()`].
pub type Placement = [Bitboard; Piece::COUNT];

/// Piece placement with make/unmake history.
///
/// The board knows nothing about whose turn it is or whether a move is legal.
/// It only guarantees that no square is claimed by two pieces and that every
/// [`apply_move`](Board::apply_move) can be undone exactly.
#[derive(Clone, Default)]
pub struct Board {
    pieces: Placement,
    history: Vec<Placement>,
}

impl Board {
    /// Return an empty board.
    pub fn new() -> Board {
        Board::default()
    }

    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        let mut pieces = [Bitboard::EMPTY; Piece::COUNT];
        let back_rank = |files: &[u8], rank: u8| -> Bitboard {
            files
                .iter()
                .filter_map(|&file| Square::from_file_rank(file, rank))
                .collect()
        };

        pieces[Piece::WHITE_PAWN.index()] = Bitboard::RANK_2;
        pieces[Piece::WHITE_KNIGHT.index()] = back_rank(&[2, 7], 1);
        pieces[Piece::WHITE_BISHOP.index()] = back_rank(&[3, 6], 1);
        pieces[Piece::WHITE_ROOK.index()] = back_rank(&[1, 8], 1);
        pieces[Piece::WHITE_QUEEN.index()] = Square::D1.bitboard();
        pieces[Piece::WHITE_KING.index()] = Square::E1.bitboard();

        pieces[Piece::BLACK_PAWN.index()] = Bitboard::RANK_7;
        pieces[Piece::BLACK_KNIGHT.index()] = back_rank(&[2, 7], 8);
        pieces[Piece::BLACK_BISHOP.index()] = back_rank(&[3, 6], 8);
        pieces[Piece::BLACK_ROOK.index()] = back_rank(&[1, 8], 8);
        pieces[Piece::BLACK_QUEEN.index()] = Square::D8.bitboard();
        pieces[Piece::BLACK_KING.index()] = Square::E8.bitboard();

        Board {
            pieces,
            history: Vec::new(),
        }
    }

    /// Build a board from raw bitboards, rejecting any square claimed twice.
    pub fn from_bitboards(pieces: Placement) -> Result<Board, BoardError> {
        let board = Board {
            pieces,
            history: Vec::new(),
        };
        board.validate()?;
        Ok(board)
    }

    /// Return the raw placement.
    #[inline]
    pub fn bitboards(&self) -> &Placement {
        &self.pieces
    }

    /// Return the bitboard of a single piece identity.
    #[inline]
    pub fn piece_bitboard(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    /// Union of every piece bitboard, optionally restricted to one side.
    pub fn occupancy(&self, player: Option<Color>) -> Bitboard {
        Piece::ALL
            .into_iter()
            .filter(|piece| player.is_none_or(|color| piece.color() == color))
            .fold(Bitboard::EMPTY, |acc, piece| acc | self.pieces[piece.index()])
    }

    /// Squares held by the side opposing `player`.
    #[inline]
    pub fn opponent_occupancy(&self, player: Color) -> Bitboard {
        self.occupancy(Some(!player))
    }

    /// Squares holding no piece.
    #[inline]
    pub fn empty(&self) -> Bitboard {
        !self.occupancy(None)
    }

    /// Return the piece on the given square, if any.
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[piece.index()].contains(sq))
    }

    /// Population count of every piece identity.
    pub fn piece_counts(&self) -> PieceCounts {
        PieceCounts(self.pieces.map(Bitboard::count))
    }

    /// Place `piece` on `sq`, evicting whatever stood there.
    pub fn put_piece(&mut self, piece: Piece, sq: Square) {
        self.clear_square(sq);
        self.pieces[piece.index()] = self.pieces[piece.index()].with(sq);
    }

    /// Remove and return the piece on `sq`.
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.piece_on(sq)?;
        self.pieces[piece.index()] = self.pieces[piece.index()].without(sq);
        Some(piece)
    }

    fn clear_square(&mut self, sq: Square) {
        for bb in &mut self.pieces {
            *bb = bb.without(sq);
        }
    }

    /// Apply a move, recording the previous placement so it can be reverted.
    ///
    /// The destination is cleared on every bitboard before the mover's source
    /// and destination bits are toggled. An en passant move also clears the
    /// pawn standing behind the destination.
    pub fn apply_move(&mut self, mv: Move) {
        self.history.push(self.pieces);

        self.clear_square(mv.dest());
        if let Some(victim) = mv.en_passant_victim() {
            self.clear_square(victim);
        }

        let idx = mv.piece().index();
        self.pieces[idx] = self.pieces[idx].toggle(mv.source()).toggle(mv.dest());
    }

    /// Restore the placement from before the most recent [`apply_move`](Board::apply_move).
    pub fn revert_move(&mut self) -> Result<(), BoardError> {
        let previous = self.history.pop().ok_or(BoardError::HistoryUnderflow)?;
        self.pieces = previous;
        Ok(())
    }

    /// Apply a move that is reverted when the returned guard is dropped.
    pub fn apply_scoped(&mut self, mv: Move) -> MoveGuard<'_> {
        let base = self.history.len();
        self.apply_move(mv);
        MoveGuard { board: self, base }
    }

    /// Apply `mv`, run `f` on the resulting board, then restore the position.
    ///
    /// Moves applied by `f` and left unreverted are unwound as well.
    pub fn with_move<R>(&mut self, mv: Move, f: impl FnOnce(&mut Board) -> R) -> R {
        let base = self.history.len();
        self.apply_move(mv);
        let result = f(self);
        self.unwind_to(base);
        result
    }

    /// Restore the placement recorded when the history had `len` entries.
    fn unwind_to(&mut self, len: usize) {
        if let Some(&placement) = self.history.get(len) {
            self.pieces = placement;
            self.history.truncate(len);
        }
    }

    /// Number of applied moves that can still be reverted.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Check that no square is set on more than one piece bitboard.
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut seen = Bitboard::EMPTY;
        for bb in self.pieces {
            if (seen & bb).is_nonempty() {
                return Err(BoardError::OverlappingPieces);
            }
            seen |= bb;
        }
        Ok(())
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

/// Boards compare by placement; history is not part of the position.
impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.pieces == other.pieces
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self.placement())
    }
}

/// Scoped application of a single move.
///
/// Reads go through to the board. Nested moves are applied with
/// [`MoveGuard::apply_scoped`], so the unwinding order is enforced by the
/// borrow checker.
pub struct MoveGuard<'a> {
    board: &'a mut Board,
    base: usize,
}

impl MoveGuard<'_> {
    /// Apply another move on top of this one.
    pub fn apply_scoped(&mut self, mv: Move) -> MoveGuard<'_> {
        self.board.apply_scoped(mv)
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.board.unwind_to(self.base);
    }
}

/// Per-piece population counts returned by [`Board::piece_counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieceCounts([u32; Piece::COUNT]);

impl PieceCounts {
    /// Iterate `(piece, count)` pairs in piece index order.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, u32)> + '_ {
        Piece::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Total number of pieces on the board.
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

impl Index<Piece> for PieceCounts {
    type Output = u32;

    fn index(&self, piece: Piece) -> &u32 {
        &self.0[piece.index()]
    }
}

impl IntoIterator for PieceCounts {
    type Item = (Piece, u32);
    type IntoIter = std::iter::Zip<std::array::IntoIter<Piece, 12>, std::array::IntoIter<u32, 12>>;

    fn into_iter(self) -> Self::IntoIter {
        Piece::ALL.into_iter().zip(self.0)
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for rank in (1u8..=8).rev() {
            write!(f, "{rank}  ")?;
            for file in 1u8..=8 {
                let c = Square::from_file_rank(file, rank)
                    .and_then(|sq| board.piece_on(sq))
                    .map_or('.', Piece::fen_char);
                if file < 8 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::bitboard::Bitboard;
    use crate::chess_move::{Move, Special};
    use crate::color::Color;
    use crate::error::BoardError;
    use crate::piece::Piece;
    use crate::square::Square;

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        assert!(board.occupancy(None).is_empty());
        assert_eq!(board.empty(), Bitboard::FULL);
        assert_eq!(board.history_len(), 0);
    }

    #[test]
    fn starting_position_validates() {
        let board = Board::starting_position();
        assert!(board.validate().is_ok());
        assert_eq!(board.occupancy(None).count(), 32);
        assert_eq!(board.occupancy(Some(Color::White)), Bitboard::RANK_1 | Bitboard::RANK_2);
        assert_eq!(board.opponent_occupancy(Color::White), Bitboard::RANK_7 | Bitboard::RANK_8);
        assert_eq!(board.empty().count(), 32);
    }

    #[test]
    fn starting_position_piece_on() {
        let board = Board::starting_position();
        assert_eq!(board.piece_on(Square::E1), Some(Piece::WHITE_KING));
        assert_eq!(board.piece_on(Square::D8), Some(Piece::BLACK_QUEEN));
        assert_eq!(board.piece_on(Square::G1), Some(Piece::WHITE_KNIGHT));
        assert_eq!(board.piece_on(Square::F8), Some(Piece::BLACK_BISHOP));
        assert_eq!(board.piece_on(Square::E4), None);
    }

    #[test]
    fn piece_counts_index_and_iter() {
        let counts = Board::starting_position().piece_counts();
        assert_eq!(counts[Piece::WHITE_PAWN], 8);
        assert_eq!(counts[Piece::BLACK_ROOK], 2);
        assert_eq!(counts[Piece::BLACK_KING], 1);
        assert_eq!(counts.total(), 32);
        let pairs: Vec<_> = counts.into_iter().collect();
        assert_eq!(pairs.len(), 12);
        assert_eq!(pairs[4], (Piece::WHITE_QUEEN, 1));
        assert_eq!(counts.iter().count(), 12);
    }

    #[test]
    fn from_bitboards_rejects_overlap() {
        let mut pieces = [Bitboard::EMPTY; Piece::COUNT];
        pieces[Piece::WHITE_ROOK.index()] = Square::A1.bitboard();
        pieces[Piece::BLACK_ROOK.index()] = Square::A1.bitboard();
        assert_eq!(Board::from_bitboards(pieces), Err(BoardError::OverlappingPieces));

        pieces[Piece::BLACK_ROOK.index()] = Square::A8.bitboard();
        let board = Board::from_bitboards(pieces).unwrap();
        assert_eq!(board.piece_on(Square::A8), Some(Piece::BLACK_ROOK));
    }

    #[test]
    fn put_piece_evicts_occupant() {
        let mut board = Board::new();
        board.put_piece(Piece::WHITE_QUEEN, Square::D4);
        board.put_piece(Piece::BLACK_KNIGHT, Square::D4);
        assert_eq!(board.piece_on(Square::D4), Some(Piece::BLACK_KNIGHT));
        assert!(board.piece_bitboard(Piece::WHITE_QUEEN).is_empty());
        assert!(board.validate().is_ok());

        assert_eq!(board.remove_piece(Square::D4), Some(Piece::BLACK_KNIGHT));
        assert_eq!(board.remove_piece(Square::D4), None);
    }

    #[test]
    fn apply_and_revert_quiet_move() {
        let mut board = Board::starting_position();
        let before = board.clone();
        board.apply_move(Move::new(Piece::WHITE_KNIGHT, Square::G1, Square::F3));
        assert_eq!(board.piece_on(Square::F3), Some(Piece::WHITE_KNIGHT));
        assert_eq!(board.piece_on(Square::G1), None);
        assert_eq!(board.history_len(), 1);

        board.revert_move().unwrap();
        assert_eq!(board.bitboards(), before.bitboards());
        assert_eq!(board.history_len(), 0);
    }

    #[test]
    fn capture_clears_destination() {
        let mut board = Board::new();
        board.put_piece(Piece::WHITE_ROOK, Square::A1);
        board.put_piece(Piece::BLACK_QUEEN, Square::A7);
        board.apply_move(Move::new_capture(Piece::WHITE_ROOK, Square::A1, Square::A7));
        assert_eq!(board.piece_on(Square::A7), Some(Piece::WHITE_ROOK));
        assert!(board.piece_bitboard(Piece::BLACK_QUEEN).is_empty());
        assert!(board.validate().is_ok());
    }

    #[test]
    fn en_passant_clears_captured_pawn() {
        let mut board = Board::new();
        board.put_piece(Piece::WHITE_PAWN, Square::E5);
        board.put_piece(Piece::BLACK_PAWN, Square::D5);
        let ep = Move::new_capture(Piece::WHITE_PAWN, Square::E5, Square::D6)
            .with_special(Special::EnPassant);
        board.apply_move(ep);
        assert_eq!(board.piece_on(Square::D6), Some(Piece::WHITE_PAWN));
        assert_eq!(board.piece_on(Square::D5), None);
        assert_eq!(board.piece_on(Square::E5), None);

        board.revert_move().unwrap();
        assert_eq!(board.piece_on(Square::D5), Some(Piece::BLACK_PAWN));
        assert_eq!(board.piece_on(Square::E5), Some(Piece::WHITE_PAWN));
    }

    #[test]
    fn revert_on_fresh_board_underflows() {
        let mut board = Board::starting_position();
        assert_eq!(board.revert_move(), Err(BoardError::HistoryUnderflow));
        board.apply_move(Move::new(Piece::WHITE_PAWN, Square::E2, Square::E3));
        assert!(board.revert_move().is_ok());
        assert_eq!(board.revert_move(), Err(BoardError::HistoryUnderflow));
    }

    #[test]
    fn scoped_moves_unwind_in_order() {
        let mut board = Board::starting_position();
        let before = board.clone();
        {
            let mut outer = board.apply_scoped(Move::new(Piece::WHITE_PAWN, Square::E2, Square::E4));
            assert_eq!(outer.piece_on(Square::E4), Some(Piece::WHITE_PAWN));
            {
                let inner = outer.apply_scoped(Move::new(Piece::BLACK_PAWN, Square::D7, Square::D5));
                assert_eq!(inner.history_len(), 2);
                assert_eq!(inner.piece_on(Square::D5), Some(Piece::BLACK_PAWN));
            }
            assert_eq!(outer.history_len(), 1);
            assert_eq!(outer.piece_on(Square::D7), Some(Piece::BLACK_PAWN));
        }
        assert_eq!(board.history_len(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn with_move_unwinds_everything_inside() {
        let mut board = Board::starting_position();
        let before = board.clone();
        let seen = board.with_move(Move::new(Piece::WHITE_PAWN, Square::E2, Square::E4), |inner| {
            inner.apply_move(Move::new(Piece::BLACK_PAWN, Square::E7, Square::E5));
            inner.apply_move(Move::new(Piece::WHITE_KNIGHT, Square::G1, Square::F3));
            inner.history_len()
        });
        assert_eq!(seen, 3);
        assert_eq!(board.history_len(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn clone_is_independent() {
        let mut board = Board::starting_position();
        let copy = board.clone();
        board.apply_move(Move::new(Piece::WHITE_PAWN, Square::A2, Square::A3));
        assert_ne!(board, copy);
        assert_eq!(copy.history_len(), 0);
    }

    #[test]
    fn pretty_print() {
        let board = Board::starting_position();
        let s = format!("{}", board.pretty());
        assert!(s.starts_with("8  r n b q k b n r"));
        assert!(s.contains("1  R N B Q K B N R"));
        assert!(s.ends_with("a b c d e f g h"));
    }
}
