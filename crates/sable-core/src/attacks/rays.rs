//! Precomputed rays and the ray-scan sliding attack reference.

use crate::bitboard::Bitboard;
use crate::direction::Direction;
use crate::square::Square;

/// Every square strictly beyond `sq` in each direction, up to the board edge.
static RAYS: [[Bitboard; Direction::COUNT]; Square::COUNT] = compute_rays();

const fn compute_rays() -> [[Bitboard; Direction::COUNT]; Square::COUNT] {
    let mut rays = [[Bitboard::EMPTY; Direction::COUNT]; Square::COUNT];
    let mut sq = 0;
    while sq < Square::COUNT {
        let mut d = 0;
        while d < Direction::COUNT {
            let (dr, df) = Direction::ALL[d].delta();
            let mut rank = (sq / 8) as i8 + dr;
            let mut file = (sq % 8) as i8 + df;
            let mut bits = 0u64;
            while rank >= 0 && rank < 8 && file >= 0 && file < 8 {
                bits |= 1u64 << (rank * 8 + file) as u32;
                rank += dr;
                file += df;
            }
            rays[sq][d] = Bitboard::new(bits);
            d += 1;
        }
        sq += 1;
    }
    rays
}

/// Return the full ray leaving `sq` in direction `dir` on an empty board.
#[inline]
pub fn ray(sq: Square, dir: Direction) -> Bitboard {
    RAYS[sq.index()][dir.index()]
}

/// Attacks of a slider on `sq` moving along `dirs`, given `occupied` squares.
///
/// For each direction the nearest blocker is found on the ray (lowest bit for
/// positive directions, highest for negative ones) and everything past it is
/// cut away. The blocker itself stays attacked.
pub fn ray_attacks(sq: Square, occupied: Bitboard, dirs: &[Direction]) -> Bitboard {
    dirs.iter().fold(Bitboard::EMPTY, |acc, &dir| {
        let full = ray(sq, dir);
        let blockers = full & occupied;
        let nearest = if dir.is_positive() {
            blockers.lsb()
        } else {
            blockers.msb()
        };
        acc | match nearest {
            Some(blocker) => full ^ ray(blocker, dir),
            None => full,
        }
    })
}
