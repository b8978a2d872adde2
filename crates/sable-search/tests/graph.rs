//! Integration tests for the alpha-beta solver over synthetic state graphs.
//!
//! Pruned results are checked against plain minimax, and the successor
//! contract (depth bookkeeping, enter/leave bracketing, malformed expansions)
//! is exercised directly.

use std::collections::HashMap;

use proptest::prelude::*;

use sable_search::{AlphaBetaSolver, Expansion, ExpansionKind, Outcome, SearchError, Successor};

#[derive(Debug, Clone)]
enum Entry {
    Leaf(i32),
    Children(Vec<char>),
}

/// A graph keyed by letter; unknown states are leaves worth 0.
struct SymbolGraph {
    entries: HashMap<char, Entry>,
}

impl SymbolGraph {
    fn sample() -> SymbolGraph {
        let lists: &[(char, &str)] = &[
            ('a', "ezhxk"),
            ('b', "chkl"),
            ('c', "zo"),
            ('d', "uoy"),
            ('e', "wsvm"),
            ('f', "zgim"),
            ('g', "oin"),
            ('h', "mqpsl"),
            ('i', "yp"),
            ('j', "v"),
            ('m', "q"),
            ('o', "tpqs"),
            ('p', "wxvt"),
            ('q', "uywsrv"),
            ('r', "x"),
            ('t', "uwvyz"),
            ('u', "v"),
            ('v', "zyxw"),
            ('w', "x"),
            ('x', "zy"),
            ('y', "z"),
        ];
        let leaves = [('k', -4), ('l', 10), ('n', 1), ('s', -10), ('z', -8)];

        let mut entries: HashMap<char, Entry> = lists
            .iter()
            .map(|&(state, children)| (state, Entry::Children(children.chars().collect())))
            .collect();
        entries.extend(leaves.into_iter().map(|(state, value)| (state, Entry::Leaf(value))));
        SymbolGraph { entries }
    }

    fn brute_max(&self, state: char) -> i32 {
        match self.entries.get(&state) {
            Some(Entry::Children(children)) => children.iter().map(|&c| self.brute_min(c)).max().unwrap(),
            Some(Entry::Leaf(value)) => *value,
            None => 0,
        }
    }

    fn brute_min(&self, state: char) -> i32 {
        match self.entries.get(&state) {
            Some(Entry::Children(children)) => children.iter().map(|&c| self.brute_max(c)).min().unwrap(),
            Some(Entry::Leaf(value)) => *value,
            None => 0,
        }
    }
}

impl Successor for SymbolGraph {
    type State = char;
    type Value = i32;
    type Children = Vec<char>;

    fn next(&mut self, state: &char, _depth: u32) -> Expansion<i32, Vec<char>> {
        match self.entries.get(state) {
            Some(Entry::Children(children)) => Expansion::Expand(children.clone()),
            Some(Entry::Leaf(value)) => Expansion::Terminal(*value),
            None => Expansion::Terminal(0),
        }
    }

    fn is_terminal(&mut self, state: &char, _depth: u32) -> bool {
        !matches!(self.entries.get(state), Some(Entry::Children(_)))
    }
}

// ── Symbol graph ──────────────────────────────────────────────────────────────

#[test]
fn symbol_graph_root_values() {
    let mut solver = AlphaBetaSolver::new(SymbolGraph::sample());
    assert_eq!(solver.maxmin(&'a').unwrap(), Outcome { value: -4, terminal: false });
    assert_eq!(solver.minmax(&'a').unwrap(), Outcome { value: -8, terminal: false });
}

#[test]
fn symbol_graph_matches_brute_force() {
    let graph = SymbolGraph::sample();
    let expected: Vec<(char, i32, i32)> = "abcdefghijmopqrtuvwxy"
        .chars()
        .map(|state| (state, graph.brute_max(state), graph.brute_min(state)))
        .collect();

    let mut solver = AlphaBetaSolver::new(graph);
    for (state, max_value, min_value) in expected {
        assert_eq!(solver.maxmin(&state).unwrap().value, max_value, "maxmin({state})");
        assert_eq!(solver.minmax(&state).unwrap().value, min_value, "minmax({state})");
    }
}

#[test]
fn symbol_graph_known_values() {
    let graph = SymbolGraph::sample();
    let known = [
        ('a', -4, -8),
        ('b', 10, -8),
        ('c', -8, -8),
        ('e', -8, -10),
        ('g', 1, -8),
        ('h', 10, -10),
        ('o', -8, -10),
    ];
    for (state, max_value, min_value) in known {
        assert_eq!(graph.brute_max(state), max_value, "brute max({state})");
        assert_eq!(graph.brute_min(state), min_value, "brute min({state})");
    }
}

#[test]
fn pruning_visits_fewer_nodes() {
    fn tree_size(graph: &SymbolGraph, state: char) -> u64 {
        match graph.entries.get(&state) {
            Some(Entry::Children(children)) => 1 + children.iter().map(|&c| tree_size(graph, c)).sum::<u64>(),
            _ => 1,
        }
    }

    let graph = SymbolGraph::sample();
    let full = tree_size(&graph, 'a');
    let mut solver = AlphaBetaSolver::new(graph);
    solver.maxmin(&'a').unwrap();
    assert!(solver.nodes() < full, "{} nodes visited of {full}", solver.nodes());
}

#[test]
fn leaf_roots_are_terminal() {
    let mut solver = AlphaBetaSolver::new(SymbolGraph::sample());
    assert_eq!(solver.maxmin(&'k').unwrap(), Outcome { value: -4, terminal: true });
    assert_eq!(solver.minmax(&'?').unwrap(), Outcome { value: 0, terminal: true });
    assert_eq!(solver.nodes(), 1);
}

#[test]
fn best_children_of_symbol_graph() {
    let mut solver = AlphaBetaSolver::new(SymbolGraph::sample());
    let (child, outcome) = solver.best_max(&'a').unwrap().unwrap();
    assert_eq!((child, outcome.value), ('k', -4));
    assert!(outcome.terminal);

    let (child, outcome) = solver.best_min(&'a').unwrap().unwrap();
    // e, z and x all reach -8; ties keep the first.
    assert_eq!((child, outcome.value), ('e', -8));
    assert_eq!(solver.best_max(&'s').unwrap(), None);
}

// ── Successor contract ────────────────────────────────────────────────────────

/// A chain `0 -> 1 -> ... -> len`, recording what the solver tells it.
#[derive(Default)]
struct Chain {
    len: u32,
    depths: Vec<(u32, u32)>,
    stack: Vec<u32>,
    entered: u32,
    left: u32,
    lie_at: Option<u32>,
}

impl Successor for Chain {
    type State = u32;
    type Value = i64;
    type Children = Option<u32>;

    fn next(&mut self, state: &u32, _depth: u32) -> Expansion<i64, Option<u32>> {
        let leaf = *state == self.len;
        if leaf != (self.lie_at == Some(*state)) {
            Expansion::Terminal(i64::from(*state))
        } else {
            Expansion::Expand(Some(state + 1))
        }
    }

    fn is_terminal(&mut self, state: &u32, depth: u32) -> bool {
        self.depths.push((*state, depth));
        *state == self.len
    }

    fn enter(&mut self, state: &u32) -> Result<(), SearchError> {
        self.entered += 1;
        self.stack.push(*state);
        Ok(())
    }

    fn leave(&mut self, state: &u32) -> Result<(), SearchError> {
        self.left += 1;
        assert_eq!(self.stack.pop(), Some(*state), "leave out of order");
        Ok(())
    }
}

#[test]
fn depth_starts_at_one_and_grows_per_ply() {
    let mut solver = AlphaBetaSolver::new(Chain { len: 3, ..Chain::default() });
    assert_eq!(solver.maxmin(&0).unwrap(), Outcome { value: 3, terminal: false });
    let chain = solver.into_inner();
    assert_eq!(chain.depths, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
    assert_eq!((chain.entered, chain.left), (3, 3));
}

#[test]
fn terminal_expected_but_children_returned() {
    // State 2 claims to be a leaf but expands.
    let mut solver = AlphaBetaSolver::new(Chain { len: 2, lie_at: Some(2), ..Chain::default() });
    let err = solver.maxmin(&0).unwrap_err();
    assert_eq!(
        err,
        SearchError::MalformedSuccessor {
            depth: 3,
            expected: ExpansionKind::Terminal
        }
    );
    let chain = solver.into_inner();
    assert_eq!(chain.entered, chain.left);
    assert!(chain.stack.is_empty());
}

#[test]
fn children_expected_but_terminal_returned() {
    let mut solver = AlphaBetaSolver::new(Chain { len: 5, lie_at: Some(1), ..Chain::default() });
    let err = solver.minmax(&0).unwrap_err();
    assert_eq!(
        err,
        SearchError::MalformedSuccessor {
            depth: 2,
            expected: ExpansionKind::Expand
        }
    );
    assert_eq!(solver.successor().entered, solver.successor().left);
}

#[test]
fn enter_failure_propagates() {
    struct Refusing;
    impl Successor for Refusing {
        type State = u8;
        type Value = i32;
        type Children = Vec<u8>;

        fn next(&mut self, _state: &u8, depth: u32) -> Expansion<i32, Vec<u8>> {
            if depth == 1 {
                Expansion::Expand(vec![1, 2])
            } else {
                Expansion::Terminal(0)
            }
        }

        fn is_terminal(&mut self, _state: &u8, depth: u32) -> bool {
            depth > 1
        }

        fn enter(&mut self, _state: &u8) -> Result<(), SearchError> {
            Err(SearchError::Board(sable_core::BoardError::HistoryUnderflow))
        }
    }

    let mut solver = AlphaBetaSolver::new(Refusing);
    assert!(matches!(solver.maxmin(&0), Err(SearchError::Board(_))));
}

// ── Random graphs ─────────────────────────────────────────────────────────────

/// A DAG whose edges only point to higher-numbered states.
#[derive(Debug, Clone)]
enum DagNode {
    Leaf(i32),
    Inner(Vec<usize>),
}

#[derive(Debug, Clone)]
struct Dag {
    nodes: Vec<DagNode>,
}

impl Dag {
    fn build(layout: Vec<(i32, Vec<prop::sample::Index>)>) -> Dag {
        let count = layout.len();
        let nodes = layout
            .into_iter()
            .enumerate()
            .map(|(state, (value, picks))| {
                let later = count - state - 1;
                if picks.is_empty() || later == 0 {
                    DagNode::Leaf(value)
                } else {
                    DagNode::Inner(picks.iter().map(|pick| state + 1 + pick.index(later)).collect())
                }
            })
            .collect();
        Dag { nodes }
    }

    fn minimax(&self, state: usize, maximizing: bool) -> i32 {
        match &self.nodes[state] {
            DagNode::Leaf(value) => *value,
            DagNode::Inner(children) => {
                let values = children.iter().map(|&c| self.minimax(c, !maximizing));
                if maximizing {
                    values.max().unwrap()
                } else {
                    values.min().unwrap()
                }
            }
        }
    }
}

impl Successor for Dag {
    type State = usize;
    type Value = i32;
    type Children = Vec<usize>;

    fn next(&mut self, state: &usize, _depth: u32) -> Expansion<i32, Vec<usize>> {
        match &self.nodes[*state] {
            DagNode::Leaf(value) => Expansion::Terminal(*value),
            DagNode::Inner(children) => Expansion::Expand(children.clone()),
        }
    }

    fn is_terminal(&mut self, state: &usize, _depth: u32) -> bool {
        matches!(self.nodes[*state], DagNode::Leaf(_))
    }
}

fn dag_strategy() -> impl Strategy<Value = Dag> {
    prop::collection::vec(
        (-10i32..=10, prop::collection::vec(any::<prop::sample::Index>(), 0..5)),
        1..24,
    )
    .prop_map(Dag::build)
}

proptest! {
    #[test]
    fn pruned_search_equals_minimax(dag in dag_strategy()) {
        let max_expected = dag.minimax(0, true);
        let min_expected = dag.minimax(0, false);
        let mut solver = AlphaBetaSolver::new(dag);
        prop_assert_eq!(solver.maxmin(&0).unwrap().value, max_expected);
        prop_assert_eq!(solver.minmax(&0).unwrap().value, min_expected);
    }

    #[test]
    fn best_child_value_equals_root_value(dag in dag_strategy()) {
        let expected = dag.minimax(0, true);
        let is_leaf = matches!(dag.nodes[0], DagNode::Leaf(_));
        let mut solver = AlphaBetaSolver::new(dag.clone());
        match solver.best_max(&0).unwrap() {
            Some((child, outcome)) => {
                prop_assert_eq!(outcome.value, expected);
                prop_assert_eq!(dag.minimax(child, false), expected);
            }
            None => prop_assert!(is_leaf),
        }
    }
}
