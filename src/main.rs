use anyhow::{Context, Result};
use sable_core::{STARTING_FEN, SlidingAttackTable, divide, parse_fen, perft_by_depth};
use tracing::{Level, debug, info};

const DEFAULT_DEPTH: usize = 4;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let depth = match args.next() {
        Some(arg) => arg.parse().with_context(|| format!("invalid perft depth {arg:?}"))?,
        None => DEFAULT_DEPTH,
    };
    let fen = args.next().unwrap_or_else(|| STARTING_FEN.to_string());
    let (board, color) = parse_fen(&fen).with_context(|| format!("invalid FEN {fen:?}"))?;

    SlidingAttackTable::global()
        .verify()
        .context("sliding attack table failed verification")?;
    info!(depth, %color, position = %board.placement(), "sable starting");
    debug!("\n{}", board.pretty());

    for (ply, nodes) in perft_by_depth(&board, color, depth).into_iter().enumerate() {
        info!(depth = ply + 1, nodes, "perft");
    }
    if tracing::enabled!(Level::DEBUG) {
        for (mv, nodes) in divide(&board, color, depth) {
            debug!(%mv, nodes, "divide");
        }
    }
    Ok(())
}
