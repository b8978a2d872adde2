//! Sliding piece attacks: the ray-scan reference and the magic lookup table.

mod magic;
mod magic_data;
mod rays;

use std::fmt;

use crate::bitboard::Bitboard;
use crate::direction::Direction;
use crate::square::Square;

pub use self::magic::{MagicEntry, SlidingAttackTable};
pub use self::rays::{ray, ray_attacks};

/// The two families of sliding movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderFamily {
    Bishop,
    Rook,
}

impl SliderFamily {
    /// Both families.
    pub const ALL: [SliderFamily; 2] = [SliderFamily::Bishop, SliderFamily::Rook];

    /// Directions this family slides along.
    #[inline]
    pub const fn directions(self) -> [Direction; 4] {
        match self {
            SliderFamily::Bishop => Direction::DIAGONAL,
            SliderFamily::Rook => Direction::ORTHOGONAL,
        }
    }
}

impl fmt::Display for SliderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliderFamily::Bishop => write!(f, "bishop"),
            SliderFamily::Rook => write!(f, "rook"),
        }
    }
}

/// How sliding attacks are computed.
///
/// Both backends return identical attack sets; `RayScan` walks precomputed
/// rays on every call while `Magic` hashes into [`SlidingAttackTable::global`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SliderBackend {
    RayScan,
    #[default]
    Magic,
}

impl SliderBackend {
    /// Attacks of a `family` slider on `sq` given `occupied` squares.
    #[inline]
    pub fn attacks(self, family: SliderFamily, sq: Square, occupied: Bitboard) -> Bitboard {
        match self {
            SliderBackend::RayScan => ray_attacks(sq, occupied, &family.directions()),
            SliderBackend::Magic => SlidingAttackTable::global().attacks(family, sq, occupied),
        }
    }
}

/// Return rook attacks from `sq` given `occupied` squares.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    SlidingAttackTable::global().rook_attacks(sq, occupied)
}

/// Return bishop attacks from `sq` given `occupied` squares.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    SlidingAttackTable::global().bishop_attacks(sq, occupied)
}

/// Return queen attacks from `sq` given `occupied` squares.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}
