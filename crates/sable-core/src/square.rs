//! Board squares, indexed row-major from a1.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::error::BoardError;

/// A square on the chess board.
///
/// Index = (rank - 1) * 8 + (file - 1), so a1 = 0, h1 = 7, a8 = 56, h8 = 63.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    /// Create a square from a zero-based index, returning `None` if out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    /// Create a square from a zero-based index without bounds checking.
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Square {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Create a square from a one-based file (a = 1) and rank.
    #[inline]
    pub const fn from_file_rank(file: u8, rank: u8) -> Option<Square> {
        if file >= 1 && file <= 8 && rank >= 1 && rank <= 8 {
            Some(Square((rank - 1) * 8 + (file - 1)))
        } else {
            None
        }
    }

    /// Parse an algebraic notation string (e.g. "e4") into a square.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let &[file, rank] = s.as_bytes() else {
            return None;
        };
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Square::from_file_rank(file - b'a' + 1, rank - b'0')
    }

    /// Return the zero-based index (0..63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the one-based file (1 = a, 8 = h).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8 + 1
    }

    /// Return the one-based rank (1..8).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8 + 1
    }

    /// Return `(file, rank)`, both one-based.
    #[inline]
    pub const fn file_rank(self) -> (u8, u8) {
        (self.file(), self.rank())
    }

    /// Return the square `offset` indices away, or `None` if it falls off the board.
    ///
    /// Only the index range is checked; file wraparound is the caller's concern.
    #[inline]
    pub const fn offset(self, offset: i8) -> Option<Square> {
        let target = self.0 as i16 + offset as i16;
        if target >= 0 && target < 64 {
            Some(Square(target as u8))
        } else {
            None
        }
    }

    /// Return a bitboard with only this square set.
    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard::new(1u64 << self.0)
    }

    /// Iterate over all 64 squares in index order (a1, b1, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }

    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A2: Square = Square(8);
    pub const B2: Square = Square(9);
    pub const C2: Square = Square(10);
    pub const D2: Square = Square(11);
    pub const E2: Square = Square(12);
    pub const F2: Square = Square(13);
    pub const G2: Square = Square(14);
    pub const H2: Square = Square(15);
    pub const A3: Square = Square(16);
    pub const B3: Square = Square(17);
    pub const C3: Square = Square(18);
    pub const D3: Square = Square(19);
    pub const E3: Square = Square(20);
    pub const F3: Square = Square(21);
    pub const G3: Square = Square(22);
    pub const H3: Square = Square(23);
    pub const A4: Square = Square(24);
    pub const B4: Square = Square(25);
    pub const C4: Square = Square(26);
    pub const D4: Square = Square(27);
    pub const E4: Square = Square(28);
    pub const F4: Square = Square(29);
    pub const G4: Square = Square(30);
    pub const H4: Square = Square(31);
    pub const A5: Square = Square(32);
    pub const B5: Square = Square(33);
    pub const C5: Square = Square(34);
    pub const D5: Square = Square(35);
    pub const E5: Square = Square(36);
    pub const F5: Square = Square(37);
    pub const G5: Square = Square(38);
    pub const H5: Square = Square(39);
    pub const A6: Square = Square(40);
    pub const B6: Square = Square(41);
    pub const C6: Square = Square(42);
    pub const D6: Square = Square(43);
    pub const E6: Square = Square(44);
    pub const F6: Square = Square(45);
    pub const G6: Square = Square(46);
    pub const H6: Square = Square(47);
    pub const A7: Square = Square(48);
    pub const B7: Square = Square(49);
    pub const C7: Square = Square(50);
    pub const D7: Square = Square(51);
    pub const E7: Square = Square(52);
    pub const F7: Square = Square(53);
    pub const G7: Square = Square(54);
    pub const H7: Square = Square(55);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl TryFrom<u8> for Square {
    type Error = BoardError;

    fn try_from(index: u8) -> Result<Square, BoardError> {
        Square::from_index(index).ok_or(BoardError::InvalidSquare { index })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.0 % 8) as char;
        write!(f, "{file}{}", self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::Square;
    use crate::error::BoardError;

    #[test]
    fn file_rank_roundtrip() {
        for sq in Square::all() {
            let (file, rank) = sq.file_rank();
            assert!((1..=8).contains(&file));
            assert!((1..=8).contains(&rank));
            assert_eq!(Square::from_file_rank(file, rank), Some(sq));
        }
    }

    #[test]
    fn corners() {
        assert_eq!(Square::A1.file_rank(), (1, 1));
        assert_eq!(Square::H1.file_rank(), (8, 1));
        assert_eq!(Square::A8.file_rank(), (1, 8));
        assert_eq!(Square::H8.file_rank(), (8, 8));
        assert_eq!(Square::E4.index(), 28);
    }

    #[test]
    fn from_file_rank_out_of_range() {
        assert!(Square::from_file_rank(0, 1).is_none());
        assert!(Square::from_file_rank(9, 1).is_none());
        assert!(Square::from_file_rank(1, 9).is_none());
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        assert_eq!(Square::try_from(63u8), Ok(Square::H8));
        assert_eq!(
            Square::try_from(64u8),
            Err(BoardError::InvalidSquare { index: 64 })
        );
    }

    #[test]
    fn algebraic_notation() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("e4"), Some(Square::E4));
        assert_eq!(Square::from_algebraic("h8"), Some(Square::H8));
        assert_eq!(Square::E4.to_string(), "e4");
        assert!(Square::from_algebraic("i1").is_none());
        assert!(Square::from_algebraic("a9").is_none());
        assert!(Square::from_algebraic("a").is_none());
        assert!(Square::from_algebraic("a1b").is_none());
    }

    #[test]
    fn offset_stays_on_board() {
        assert_eq!(Square::E2.offset(16), Some(Square::E4));
        assert_eq!(Square::E7.offset(-16), Some(Square::E5));
        assert_eq!(Square::H8.offset(1), None);
        assert_eq!(Square::A1.offset(-1), None);
    }

    #[test]
    fn debug_shows_algebraic() {
        assert_eq!(format!("{:?}", Square::E4), "Square(e4)");
    }
}
