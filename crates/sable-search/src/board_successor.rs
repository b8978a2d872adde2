//! Chess adapter: drives an [`AlphaBetaSolver`] over a [`Board`].
//!
//! States are lightweight [`Node`]s; the board itself lives in the adapter and
//! is moved forward in [`Successor::enter`] and back in [`Successor::leave`].

use sable_core::{Board, Color, Move, MoveGen, MoveList, PieceKind};
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::limits::{LimitReason, SearchLimits};
use crate::solver::{AlphaBetaSolver, Expansion, Outcome, Successor};

/// Static evaluation of a position, positive when White is better.
pub trait Evaluate {
    fn evaluate(&self, board: &Board) -> i32;
}

impl<F> Evaluate for F
where
    F: Fn(&Board) -> i32,
{
    fn evaluate(&self, board: &Board) -> i32 {
        self(board)
    }
}

/// A search state: the move that led here and the side now to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    pub last: Option<Move>,
    pub to_move: Color,
}

impl Node {
    /// The root of a search with `to_move` on move.
    pub fn root(to_move: Color) -> Node {
        Node { last: None, to_move }
    }
}

/// Children of a [`Node`]: one per pseudo-legal move, with sides swapped.
#[derive(Debug, Clone)]
pub struct NodeChildren {
    moves: MoveList,
    to_move: Color,
}

impl Iterator for NodeChildren {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        let mv = self.moves.next()?;
        Some(Node {
            last: Some(mv),
            to_move: self.to_move,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.moves.size_hint()
    }
}

/// [`Successor`] over a chess board with pseudo-legal moves.
///
/// A node is terminal when a ply, node or time limit is reached, when the side
/// to move has no moves, or when the move into it captured a king. Terminal
/// nodes are scored by the evaluator.
pub struct BoardSuccessor<E> {
    board: Board,
    limits: SearchLimits,
    evaluator: E,
    movegen: MoveGen,
    visited: u64,
    budget_hit: Option<LimitReason>,
    king_taken: Vec<bool>,
    pending: Option<MoveList>,
}

impl<E: Evaluate> BoardSuccessor<E> {
    pub fn new(board: Board, limits: SearchLimits, evaluator: E) -> Self {
        Self {
            board,
            limits,
            evaluator,
            movegen: MoveGen::default(),
            visited: 0,
            budget_hit: None,
            king_taken: Vec::new(),
            pending: None,
        }
    }

    /// Use `movegen` instead of the default generator.
    pub fn with_movegen(mut self, movegen: MoveGen) -> Self {
        self.movegen = movegen;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Nodes examined so far.
    pub fn visited(&self) -> u64 {
        self.visited
    }

    /// The node or time budget that cut the search short, if one did.
    pub fn budget_hit(&self) -> Option<LimitReason> {
        self.budget_hit
    }

    fn note_limit(&mut self, reason: LimitReason) {
        if reason == LimitReason::Depth || self.budget_hit.is_some() {
            return;
        }
        warn!(%reason, visited = self.visited, "search budget exhausted");
        self.budget_hit = Some(reason);
    }
}

impl<E: Evaluate> Successor for BoardSuccessor<E> {
    type State = Node;
    type Value = i32;
    type Children = NodeChildren;

    fn next(&mut self, node: &Node, _depth: u32) -> Expansion<i32, NodeChildren> {
        match self.pending.take() {
            Some(moves) => Expansion::Expand(NodeChildren {
                moves,
                to_move: !node.to_move,
            }),
            None => Expansion::Terminal(self.evaluator.evaluate(&self.board)),
        }
    }

    fn is_terminal(&mut self, node: &Node, depth: u32) -> bool {
        self.visited += 1;
        self.pending = None;
        if self.king_taken.last().copied().unwrap_or(false) {
            return true;
        }
        if let Some(reason) = self.limits.exceeded(depth, self.visited) {
            self.note_limit(reason);
            return true;
        }
        let moves = self.movegen.moves(&self.board, node.to_move, node.last);
        if moves.len() == 0 {
            return true;
        }
        self.pending = Some(moves);
        false
    }

    fn enter(&mut self, node: &Node) -> Result<(), SearchError> {
        if let Some(mv) = node.last {
            let captures_king = self
                .board
                .piece_on(mv.dest())
                .is_some_and(|piece| piece.kind() == PieceKind::King);
            self.king_taken.push(captures_king);
            self.board.apply_move(mv);
        }
        Ok(())
    }

    fn leave(&mut self, node: &Node) -> Result<(), SearchError> {
        if node.last.is_some() {
            self.king_taken.pop();
            self.board.revert_move()?;
        }
        Ok(())
    }
}

/// Search `board` with `to_move` on move and return the best move with its score.
///
/// White maximizes and Black minimizes the evaluator's score. Returns `None`
/// when the root is terminal.
pub fn best_move<E: Evaluate>(
    board: &Board,
    to_move: Color,
    limits: SearchLimits,
    evaluator: E,
) -> Result<Option<(Move, Outcome<i32>)>, SearchError> {
    let successor = BoardSuccessor::new(board.clone(), limits, evaluator);
    let mut solver = AlphaBetaSolver::new(successor);
    let root = Node::root(to_move);
    let best = match to_move {
        Color::White => solver.best_max(&root)?,
        Color::Black => solver.best_min(&root)?,
    };
    debug!(nodes = solver.nodes(), "search finished");
    Ok(best.and_then(|(node, outcome)| node.last.map(|mv| (mv, outcome))))
}
