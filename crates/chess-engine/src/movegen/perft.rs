//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use super::{generate_moves, make_move, unmake_move};
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    let mut scratch = position.clone();
    perft_in_place(&mut scratch, depth)
}

/// Perft with divide: node count below each root move, sorted by the
/// move's coordinate notation.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let mut scratch = position.clone();
    let moves = generate_moves(&scratch);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let undo = make_move(&mut scratch, *m);
        scratch.side_to_move = scratch.side_to_move.opposite();
        let nodes = perft_in_place(&mut scratch, depth.saturating_sub(1));
        scratch.side_to_move = scratch.side_to_move.opposite();
        unmake_move(&mut scratch, *m, undo);

        tracing::trace!(mv = %m, nodes, "divide");
        results.push((m.to_coordinate(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

fn perft_in_place(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let undo = make_move(position, *m);
        position.side_to_move = position.side_to_move.opposite();
        nodes += perft_in_place(position, depth - 1);
        position.side_to_move = position.side_to_move.opposite();
        unmake_move(position, *m, undo);
    }
    nodes
}
