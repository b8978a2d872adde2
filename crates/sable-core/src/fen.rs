//! FEN piece-placement parsing and serialization for [`Board`].
//!
//! Only the placement field (and, through [`parse_fen`], the active color) is
//! interpreted. Castling, en passant and move counters are ignored.

use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn parse_placement(placement: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut pieces = [Bitboard::EMPTY; Piece::COUNT];

    for (rank_index, rank_str) in ranks.iter().enumerate() {
        // FEN ranks go from 8 to 1 (top to bottom)
        let rank = 8 - rank_index as u8;
        let mut file: u8 = 1;

        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(FenError::InvalidPieceChar { character: c });
                }
                file = file.saturating_add(digit as u8);
                continue;
            }

            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
            let sq = Square::from_file_rank(file, rank).ok_or(FenError::BadRankLength {
                rank_index,
                length: file as usize,
            })?;
            pieces[piece.index()] |= sq.bitboard();
            file += 1;
        }

        if file != 9 {
            return Err(FenError::BadRankLength {
                rank_index,
                length: file as usize - 1,
            });
        }
    }

    Ok(Board::from_bitboards(pieces)?)
}

/// Parse the placement and active color fields of a FEN string.
///
/// A missing color field defaults to White.
pub fn parse_fen(fen: &str) -> Result<(Board, Color), FenError> {
    let mut fields = fen.split_whitespace();
    let board = parse_placement(fields.next().ok_or(FenError::Empty)?)?;
    let color = match fields.next() {
        None | Some("w") => Color::White,
        Some("b") => Color::Black,
        Some(other) => {
            return Err(FenError::InvalidColor {
                found: other.to_string(),
            });
        }
    };
    Ok((board, color))
}

impl FromStr for Board {
    type Err = FenError;

    /// Parse the placement field; any further fields are ignored.
    fn from_str(fen: &str) -> Result<Board, FenError> {
        let placement = fen.split_whitespace().next().ok_or(FenError::Empty)?;
        parse_placement(placement)
    }
}

impl Board {
    /// Serialize the piece placement as a FEN placement field.
    pub fn placement(&self) -> FenPlacement<'_> {
        FenPlacement(self)
    }
}

/// Display adapter returned by [`Board::placement`].
pub struct FenPlacement<'a>(&'a Board);

impl fmt::Display for FenPlacement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (1u8..=8).rev() {
            let mut empty_count = 0u8;
            for file in 1u8..=8 {
                let piece = Square::from_file_rank(file, rank).and_then(|sq| self.0.piece_on(sq));
                match piece {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if rank > 1 {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.placement())
    }
}
