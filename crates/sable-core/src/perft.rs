//! Perft (performance test) over the pseudo-legal generator.
//!
//! Nodes are counted with make/unmake on a single board. Because moves are
//! pseudo-legal, counts only match published legal perft figures while no
//! side can leave its king attacked within the searched depth.

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::movegen::MoveGen;

fn count(
    board: &mut Board,
    movegen: MoveGen,
    color: Color,
    previous: Option<Move>,
    depth: usize,
    per_ply: &mut [u64],
) {
    let Some((here, deeper)) = per_ply.split_first_mut() else {
        return;
    };
    let moves = movegen.moves(board, color, previous);
    *here += moves.len() as u64;
    if depth <= 1 {
        return;
    }
    for mv in moves {
        board.with_move(mv, |child| {
            count(child, movegen, !color, Some(mv), depth - 1, &mut *deeper)
        });
    }
}

/// Count the positions reached after exactly `depth` plies, `color` moving first.
///
/// Depth 0 returns 1 (the current position).
pub fn perft(board: &Board, color: Color, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    perft_by_depth(board, color, depth).last().copied().unwrap_or(0)
}

/// Node counts for every ply from 1 to `depth`.
pub fn perft_by_depth(board: &Board, color: Color, depth: usize) -> Vec<u64> {
    perft_by_depth_with(MoveGen::default(), board, color, depth)
}

/// [`perft_by_depth`] with an explicit generator configuration.
pub fn perft_by_depth_with(movegen: MoveGen, board: &Board, color: Color, depth: usize) -> Vec<u64> {
    let mut per_ply = vec![0u64; depth];
    let mut board = board.clone();
    count(&mut board, movegen, color, None, depth, &mut per_ply);
    per_ply
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns `(move, node_count)` pairs sorted by move text.
pub fn divide(board: &Board, color: Color, depth: usize) -> Vec<(String, u64)> {
    let mut board = board.clone();
    let moves = MoveGen::default().moves(&board, color, None);
    let mut results: Vec<(String, u64)> = moves
        .map(|mv| {
            let nodes = if depth <= 1 {
                1
            } else {
                board.with_move(mv, |child| {
                    let mut per_ply = vec![0u64; depth - 1];
                    count(child, MoveGen::default(), !color, Some(mv), depth - 1, &mut per_ply);
                    per_ply.last().copied().unwrap_or(0)
                })
            };
            (mv.to_string(), nodes)
        })
        .collect();
    results.sort();
    results
}
