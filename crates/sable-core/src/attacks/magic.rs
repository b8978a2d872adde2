//! Magic bitboard tables for sliding piece attack generation.

use std::sync::OnceLock;

use tracing::debug;

use crate::bitboard::Bitboard;
use crate::error::AttackTableError;
use crate::square::Square;

use super::SliderFamily;
use super::magic_data::{BISHOP_MAGICS, ROOK_MAGICS, relevant_mask};
use super::rays::ray_attacks;

/// Hashing parameters for one square of one slider family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicEntry {
    /// Squares whose occupancy can change the attack set.
    pub mask: Bitboard,
    pub magic: u64,
    /// `64 - mask.count()`.
    pub shift: u8,
    /// Start of this square's region in the flat attack table.
    pub offset: u32,
}

impl MagicEntry {
    /// Slot index of `occupied` inside the flat attack table.
    #[inline(always)]
    pub fn index(&self, occupied: Bitboard) -> usize {
        let relevant = (occupied & self.mask).inner();
        let hash = relevant.wrapping_mul(self.magic);
        self.offset as usize + (hash >> self.shift) as usize
    }

    /// Number of slots reserved for this square.
    #[inline]
    pub fn slot_count(&self) -> usize {
        1 << (64 - self.shift as u32)
    }
}

/// Iterate every subset of `mask`, starting with the empty set (carry-rippler).
fn subsets(mask: Bitboard) -> impl Iterator<Item = Bitboard> {
    let mask = mask.inner();
    let mut next = Some(0u64);
    std::iter::from_fn(move || {
        let subset = next?;
        let following = subset.wrapping_sub(mask) & mask;
        next = (following != 0).then_some(following);
        Some(Bitboard::new(subset))
    })
}

/// Magic entries and the flat attack table of one slider family.
#[derive(Debug, Clone)]
struct FamilyTable {
    family: SliderFamily,
    entries: [MagicEntry; Square::COUNT],
    attacks: Vec<Bitboard>,
}

impl FamilyTable {
    fn build(family: SliderFamily, magics: &[u64; Square::COUNT]) -> Result<FamilyTable, AttackTableError> {
        let dirs = family.directions();
        let mut entries = [MagicEntry {
            mask: Bitboard::EMPTY,
            magic: 0,
            shift: 64,
            offset: 0,
        }; Square::COUNT];

        let mut offset = 0u32;
        for (sq, entry) in entries.iter_mut().enumerate() {
            let mask = Bitboard::new(relevant_mask(sq, dirs));
            *entry = MagicEntry {
                mask,
                magic: magics[sq],
                shift: 64 - mask.count() as u8,
                offset,
            };
            offset += entry.slot_count() as u32;
        }

        let mut slots: Vec<Option<Bitboard>> = vec![None; offset as usize];
        for (sq, entry) in Square::all().zip(&entries) {
            for subset in subsets(entry.mask) {
                let attacks = ray_attacks(sq, subset, &dirs);
                let slot = &mut slots[entry.index(subset)];
                match *slot {
                    Some(stored) if stored != attacks => {
                        return Err(AttackTableError::Inconsistency {
                            family,
                            square: sq,
                            occupancy: subset.inner(),
                        });
                    }
                    _ => *slot = Some(attacks),
                }
            }
        }

        Ok(FamilyTable {
            family,
            entries,
            attacks: slots.into_iter().map(Option::unwrap_or_default).collect(),
        })
    }

    #[inline]
    fn lookup(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.attacks[self.entries[sq.index()].index(occupied)]
    }

    /// Compare every stored subset against the ray scan.
    fn verify(&self) -> Result<(), AttackTableError> {
        let dirs = self.family.directions();
        for (sq, entry) in Square::all().zip(&self.entries) {
            for subset in subsets(entry.mask) {
                if self.lookup(sq, subset) != ray_attacks(sq, subset, &dirs) {
                    return Err(AttackTableError::Inconsistency {
                        family: self.family,
                        square: sq,
                        occupancy: subset.inner(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Constant-time bishop and rook attacks, verified against the ray scan.
#[derive(Debug, Clone)]
pub struct SlidingAttackTable {
    rook: FamilyTable,
    bishop: FamilyTable,
}

static GLOBAL: OnceLock<SlidingAttackTable> = OnceLock::new();

impl SlidingAttackTable {
    /// Populate both families and check every entry against the ray scan.
    pub fn build() -> Result<SlidingAttackTable, AttackTableError> {
        let table = SlidingAttackTable {
            rook: FamilyTable::build(SliderFamily::Rook, &ROOK_MAGICS)?,
            bishop: FamilyTable::build(SliderFamily::Bishop, &BISHOP_MAGICS)?,
        };
        table.verify()?;
        debug!(
            rook_slots = table.rook.attacks.len(),
            bishop_slots = table.bishop.attacks.len(),
            "sliding attack table built"
        );
        Ok(table)
    }

    /// Shared table, built on first use.
    ///
    /// # Panics
    ///
    /// Panics if the built-in magics fail verification.
    pub fn global() -> &'static SlidingAttackTable {
        GLOBAL.get_or_init(|| {
            SlidingAttackTable::build()
                .unwrap_or_else(|err| panic!("sliding attack table: {err}"))
        })
    }

    /// Re-run the full comparison against the ray scan.
    pub fn verify(&self) -> Result<(), AttackTableError> {
        self.rook.verify()?;
        self.bishop.verify()
    }

    fn family(&self, family: SliderFamily) -> &FamilyTable {
        match family {
            SliderFamily::Rook => &self.rook,
            SliderFamily::Bishop => &self.bishop,
        }
    }

    /// Hashing parameters for `sq`.
    pub fn entry(&self, family: SliderFamily, sq: Square) -> &MagicEntry {
        &self.family(family).entries[sq.index()]
    }

    /// Attacks of a `family` slider on `sq` given `occupied` squares.
    #[inline]
    pub fn attacks(&self, family: SliderFamily, sq: Square, occupied: Bitboard) -> Bitboard {
        self.family(family).lookup(sq, occupied)
    }

    #[inline]
    pub fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook.lookup(sq, occupied)
    }

    #[inline]
    pub fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop.lookup(sq, occupied)
    }
}
