//! Lazy move sequences: destination groups, per-piece lists and their chain.

use crate::bitboard::Bitboard;
use crate::chess_move::{Move, Special};
use crate::piece::Piece;
use crate::square::Square;

/// Where the moves of a [`MoveGroup`] start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Every move leaves the same square.
    Square(Square),
    /// Set-wise generation: each move starts `offset` squares before its destination.
    Offset(i8),
}

impl Origin {
    /// The part of `targets` whose source square lies on the board.
    fn reachable(self, targets: Bitboard) -> Bitboard {
        match self {
            Origin::Square(_) => targets,
            Origin::Offset(offset) if offset.unsigned_abs() >= 64 => Bitboard::EMPTY,
            Origin::Offset(offset) if offset >= 0 => targets & Bitboard::new(!0u64 << offset),
            Origin::Offset(offset) => targets & Bitboard::new(!0u64 >> offset.unsigned_abs()),
        }
    }
}

/// Destinations sharing a piece, an origin rule, a capture flag and a special flag.
///
/// Moves are materialised one at a time as the group is iterated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveGroup {
    piece: Piece,
    origin: Origin,
    targets: Bitboard,
    capture: bool,
    special: Option<Special>,
}

impl MoveGroup {
    /// Non-capturing moves of `piece` from `origin` to every square in `targets`.
    ///
    /// With an [`Origin::Offset`], destinations whose source would fall off the
    /// board are dropped.
    pub fn quiet(piece: Piece, origin: Origin, targets: Bitboard) -> MoveGroup {
        MoveGroup {
            piece,
            origin,
            targets: origin.reachable(targets),
            capture: false,
            special: None,
        }
    }

    /// Capturing moves of `piece` from `origin` to every square in `targets`.
    pub fn captures(piece: Piece, origin: Origin, targets: Bitboard) -> MoveGroup {
        MoveGroup {
            capture: true,
            ..MoveGroup::quiet(piece, origin, targets)
        }
    }

    /// Tag every move of this group with `special`.
    pub fn with_special(self, special: Special) -> MoveGroup {
        MoveGroup {
            special: Some(special),
            ..self
        }
    }

    /// Destinations not yet yielded.
    #[inline]
    pub fn targets(&self) -> Bitboard {
        self.targets
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture
    }

    #[inline]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    fn source_of(&self, dest: Square) -> Option<Square> {
        match self.origin {
            Origin::Square(src) => Some(src),
            Origin::Offset(offset) => dest.offset(-offset),
        }
    }
}

impl Iterator for MoveGroup {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        loop {
            let (dest, rest) = self.targets.pop_lsb()?;
            self.targets = rest;
            let Some(src) = self.source_of(dest) else {
                continue;
            };
            let mv = if self.capture {
                Move::new_capture(self.piece, src, dest)
            } else {
                Move::new(self.piece, src, dest)
            };
            return Some(match self.special {
                Some(special) => mv.with_special(special),
                None => mv,
            });
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.targets.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for MoveGroup {}

/// All pseudo-legal moves of one piece identity, as labelled groups.
#[derive(Debug, Clone, Default)]
pub struct PieceMoves {
    groups: Vec<MoveGroup>,
    cursor: usize,
}

impl PieceMoves {
    /// Create an empty list.
    pub fn new() -> PieceMoves {
        PieceMoves::default()
    }

    /// Append a group, skipping it if it has no destinations.
    pub fn push(&mut self, group: MoveGroup) {
        if group.targets.is_nonempty() {
            self.groups.push(group);
        }
    }

    /// Groups not yet fully consumed.
    pub fn groups(&self) -> &[MoveGroup] {
        &self.groups[self.cursor..]
    }

    /// Remaining capturing moves.
    pub fn captures(&self) -> impl Iterator<Item = Move> + '_ {
        self.groups()
            .iter()
            .filter(|group| group.capture)
            .copied()
            .flatten()
    }

    /// Remaining non-capturing moves.
    pub fn quiets(&self) -> impl Iterator<Item = Move> + '_ {
        self.groups()
            .iter()
            .filter(|group| !group.capture)
            .copied()
            .flatten()
    }

    /// Combined destination set of the remaining moves.
    pub fn targets(&self) -> Bitboard {
        self.groups()
            .iter()
            .fold(Bitboard::EMPTY, |acc, group| acc | group.targets)
    }
}

impl Iterator for PieceMoves {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        while let Some(group) = self.groups.get_mut(self.cursor) {
            if let Some(mv) = group.next() {
                return Some(mv);
            }
            self.cursor += 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self
            .groups()
            .iter()
            .map(|group| group.targets.count() as usize)
            .sum();
        (count, Some(count))
    }
}

impl ExactSizeIterator for PieceMoves {}

/// Pseudo-legal moves of a whole side: per-piece lists chained in piece order.
#[derive(Debug, Clone, Default)]
pub struct MoveList {
    pieces: Vec<PieceMoves>,
    cursor: usize,
}

impl MoveList {
    pub(super) fn from_pieces(pieces: Vec<PieceMoves>) -> MoveList {
        MoveList { pieces, cursor: 0 }
    }

    /// The per-piece lists not yet fully consumed.
    pub fn pieces(&self) -> &[PieceMoves] {
        &self.pieces[self.cursor..]
    }

    /// Remaining capturing moves.
    pub fn captures(&self) -> impl Iterator<Item = Move> + '_ {
        self.pieces().iter().flat_map(PieceMoves::captures)
    }
}

impl Iterator for MoveList {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        while let Some(piece) = self.pieces.get_mut(self.cursor) {
            if let Some(mv) = piece.next() {
                return Some(mv);
            }
            self.cursor += 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.pieces().iter().map(ExactSizeIterator::len).sum();
        (count, Some(count))
    }
}

impl ExactSizeIterator for MoveList {}
