//! Side colors.

use std::fmt;
use std::ops::Not;

use crate::bitboard::Bitboard;
use crate::direction::Direction;

/// A side: White or Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Total number of colors.
    pub const COUNT: usize = 2;

    /// All colors in index order.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Return the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the opposite color.
    #[inline]
    pub const fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Direction this side's pawns advance in.
    #[inline]
    pub const fn forward(self) -> Direction {
        match self {
            Color::White => Direction::North,
            Color::Black => Direction::South,
        }
    }

    /// Rank a pawn lands on after a double push (fourth for White, fifth for Black).
    #[inline]
    pub const fn double_push_rank(self) -> Bitboard {
        match self {
            Color::White => Bitboard::RANK_4,
            Color::Black => Bitboard::RANK_5,
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.flip()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "w"),
            Color::Black => write!(f, "b"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;
    use crate::bitboard::Bitboard;
    use crate::direction::Direction;

    #[test]
    fn flip_and_not() {
        assert_eq!(Color::White.flip(), Color::Black);
        assert_eq!(!Color::Black, Color::White);
        assert_eq!(Color::White.flip().flip(), Color::White);
    }

    #[test]
    fn pawn_geometry() {
        assert_eq!(Color::White.forward(), Direction::North);
        assert_eq!(Color::Black.forward(), Direction::South);
        assert_eq!(Color::White.double_push_rank(), Bitboard::RANK_4);
        assert_eq!(Color::Black.double_push_rank(), Bitboard::RANK_5);
    }

    #[test]
    fn display() {
        assert_eq!(Color::White.to_string(), "w");
        assert_eq!(Color::Black.to_string(), "b");
    }
}
