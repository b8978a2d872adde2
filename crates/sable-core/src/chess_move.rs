//! Move representation, bit-packed into a u32.

use std::fmt;

use crate::error::BoardError;
use crate::piece::Piece;
use crate::square::Square;

// Private bit-field constants.
const SRC_MASK: u32 = 0x0000_003F;
const DST_MASK: u32 = 0x0000_0FC0;
const PIECE_MASK: u32 = 0x0000_F000;
const CAPTURE_BIT: u32 = 0x0001_0000;
const SPECIAL_MASK: u32 = 0x0006_0000;
const DST_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const SPECIAL_SHIFT: u32 = 17;

/// Pawn moves that carry extra meaning for the board or the next generator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Special {
    /// A pawn advanced two ranks; enables en passant on the reply.
    DoublePush = 1,
    /// A pawn captured the double-pushed pawn beside it.
    EnPassant = 2,
}

impl Special {
    const fn bits(self) -> u32 {
        (self as u32) << SPECIAL_SHIFT
    }
}

/// A single ply encoded in 32 bits.
///
/// ```text
/// bits  0-5:  source square      (0-63)
/// bits  6-11: destination square (0-63)
/// bits 12-15: moving piece       (raw Piece byte)
/// bit     16: capture flag
/// bits 17-18: special            (none=0, DoublePush=1, EnPassant=2)
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    /// Create a non-capturing move.
    pub const fn new(piece: Piece, source: Square, dest: Square) -> Move {
        Move(
            (source.index() as u32)
                | ((dest.index() as u32) << DST_SHIFT)
                | ((piece.raw() as u32) << PIECE_SHIFT),
        )
    }

    /// Create a capturing move.
    pub const fn new_capture(piece: Piece, source: Square, dest: Square) -> Move {
        Move(Move::new(piece, source, dest).0 | CAPTURE_BIT)
    }

    /// Create a move from raw square indices, rejecting indices off the board.
    pub fn from_indices(
        piece: Piece,
        source: u8,
        dest: u8,
        capture: bool,
    ) -> Result<Move, BoardError> {
        let source = Square::try_from(source)?;
        let dest = Square::try_from(dest)?;
        Ok(if capture {
            Move::new_capture(piece, source, dest)
        } else {
            Move::new(piece, source, dest)
        })
    }

    /// Return this move tagged with a special flag.
    pub const fn with_special(self, special: Special) -> Move {
        Move((self.0 & !SPECIAL_MASK) | special.bits())
    }

    /// Extract the moving piece.
    pub const fn piece(self) -> Piece {
        match Piece::from_raw(((self.0 & PIECE_MASK) >> PIECE_SHIFT) as u8) {
            Some(piece) => piece,
            None => Piece::WHITE_PAWN,
        }
    }

    /// Extract the source square.
    pub const fn source(self) -> Square {
        Square::from_index_unchecked((self.0 & SRC_MASK) as u8)
    }

    /// Extract the destination square.
    pub const fn dest(self) -> Square {
        Square::from_index_unchecked(((self.0 & DST_MASK) >> DST_SHIFT) as u8)
    }

    /// Return `true` if the move removes an opposing piece.
    pub const fn is_capture(self) -> bool {
        self.0 & CAPTURE_BIT != 0
    }

    /// Extract the special flag, if any.
    pub const fn special(self) -> Option<Special> {
        match (self.0 & SPECIAL_MASK) >> SPECIAL_SHIFT {
            1 => Some(Special::DoublePush),
            2 => Some(Special::EnPassant),
            _ => None,
        }
    }

    pub const fn is_double_push(self) -> bool {
        matches!(self.special(), Some(Special::DoublePush))
    }

    pub const fn is_en_passant(self) -> bool {
        matches!(self.special(), Some(Special::EnPassant))
    }

    /// Square of the pawn removed by an en passant capture.
    ///
    /// That pawn sits directly behind the destination from the mover's view.
    pub const fn en_passant_victim(self) -> Option<Square> {
        if !self.is_en_passant() {
            return None;
        }
        let back = -self.piece().color().forward().offset();
        self.dest().offset(back)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source(), self.dest())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({:?} {}", self.piece(), self)?;
        if self.is_capture() {
            write!(f, " capture")?;
        }
        if let Some(special) = self.special() {
            write!(f, " {special:?}")?;
        }
        write!(f, ")")
    }
}
