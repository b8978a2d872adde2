//! Piece identity: a kind paired with a color, bit-packed into a single byte.

use std::fmt;

use crate::color::Color;
use crate::piece_kind::PieceKind;

/// A colored piece identity.
///
/// Bit layout:
/// - bits 0-2: [`PieceKind`] (values 0-5)
/// - bit 3: [`Color`] (0 = White, 1 = Black)
///
/// This is a plain value: two pieces compare equal exactly when kind and color
/// match, and every board shares the same twelve identities.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(u8);

impl Piece {
    /// Number of distinct piece identities.
    pub const COUNT: usize = 12;

    pub const WHITE_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::White);
    pub const WHITE_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::White);
    pub const WHITE_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::White);
    pub const WHITE_ROOK: Piece = Piece::new(PieceKind::Rook, Color::White);
    pub const WHITE_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::White);
    pub const WHITE_KING: Piece = Piece::new(PieceKind::King, Color::White);
    pub const BLACK_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::Black);
    pub const BLACK_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::Black);
    pub const BLACK_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::Black);
    pub const BLACK_ROOK: Piece = Piece::new(PieceKind::Rook, Color::Black);
    pub const BLACK_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::Black);
    pub const BLACK_KING: Piece = Piece::new(PieceKind::King, Color::Black);

    /// All 12 pieces: White pieces (indices 0-5) followed by Black pieces (indices 6-11).
    pub const ALL: [Piece; 12] = [
        Self::WHITE_PAWN,
        Self::WHITE_KNIGHT,
        Self::WHITE_BISHOP,
        Self::WHITE_ROOK,
        Self::WHITE_QUEEN,
        Self::WHITE_KING,
        Self::BLACK_PAWN,
        Self::BLACK_KNIGHT,
        Self::BLACK_BISHOP,
        Self::BLACK_ROOK,
        Self::BLACK_QUEEN,
        Self::BLACK_KING,
    ];

    /// Create a piece from a kind and a color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece((color as u8) << 3 | (kind as u8))
    }

    /// Decode the raw byte produced by [`Piece::raw`].
    #[inline]
    pub(crate) const fn from_raw(raw: u8) -> Option<Piece> {
        match PieceKind::from_index((raw & 0x07) as usize) {
            Some(_) if raw >> 4 == 0 => Some(Piece(raw)),
            _ => None,
        }
    }

    /// Return the piece with the given contiguous index (0-11).
    #[inline]
    pub const fn from_index(index: usize) -> Option<Piece> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Parse a FEN character: uppercase is White, lowercase is Black.
    #[inline]
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }

    /// Return the piece kind (the lower 3 bits).
    #[inline]
    pub const fn kind(self) -> PieceKind {
        match PieceKind::from_index((self.0 & 0x07) as usize) {
            Some(kind) => kind,
            None => PieceKind::King,
        }
    }

    /// Return the color (bit 3).
    #[inline]
    pub const fn color(self) -> Color {
        match self.0 >> 3 {
            0 => Color::White,
            _ => Color::Black,
        }
    }

    /// Return a contiguous index 0-11 for use in fixed-size arrays.
    #[inline]
    pub const fn index(self) -> usize {
        (self.0 >> 3) as usize * PieceKind::COUNT + (self.0 & 0x07) as usize
    }

    /// Return the raw bit-packed byte (0-5 for White, 8-13 for Black).
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Return the FEN character for this piece.
    #[inline]
    pub fn fen_char(self) -> char {
        let base = self.kind().fen_char();
        match self.color() {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color_prefix = match self.color() {
            Color::White => 'W',
            Color::Black => 'B',
        };
        write!(f, "{}{}", color_prefix, self.kind().fen_char().to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::Piece;
    use crate::color::Color;
    use crate::piece_kind::PieceKind;

    #[test]
    fn new_roundtrip() {
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let piece = Piece::new(kind, color);
                assert_eq!(piece.kind(), kind);
                assert_eq!(piece.color(), color);
                assert_eq!(Piece::from_raw(piece.raw()), Some(piece));
            }
        }
    }

    #[test]
    fn index_contiguity() {
        for (i, piece) in Piece::ALL.into_iter().enumerate() {
            assert_eq!(piece.index(), i, "{piece:?}");
            assert_eq!(Piece::from_index(i), Some(piece));
        }
        assert_eq!(Piece::from_index(12), None);
    }

    #[test]
    fn from_raw_rejects_gaps() {
        assert_eq!(Piece::from_raw(6), None);
        assert_eq!(Piece::from_raw(7), None);
        assert_eq!(Piece::from_raw(14), None);
        assert_eq!(Piece::from_raw(16), None);
    }

    #[test]
    fn value_semantics() {
        // Independently constructed identities are the same value.
        let a = Piece::new(PieceKind::Knight, Color::Black);
        let b = Piece::from_fen_char('n').unwrap();
        assert_eq!(a, b);
        let set: HashSet<Piece> = [a, b, Piece::WHITE_KNIGHT].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn fen_chars() {
        for piece in Piece::ALL {
            assert_eq!(Piece::from_fen_char(piece.fen_char()), Some(piece));
        }
        assert_eq!(Piece::WHITE_KING.to_string(), "K");
        assert_eq!(Piece::BLACK_PAWN.to_string(), "p");
        assert_eq!(format!("{:?}", Piece::BLACK_QUEEN), "BQ");
        assert_eq!(Piece::from_fen_char('x'), None);
    }
}
