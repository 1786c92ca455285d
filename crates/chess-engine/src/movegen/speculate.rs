//! Scoped "apply, inspect, revert" over a mutable position.

use super::make::{make_move, unmake_move, Undo};
use crate::Position;
use chess_core::Move;
use std::ops::Deref;

/// A move applied to a borrowed position that is taken back on drop.
///
/// Holding the guard is the only way to look at the position while the move
/// is on the board, so callers never observe a half-reverted state, even if
/// the inspection panics.
pub struct Speculation<'a> {
    position: &'a mut Position,
    mv: Move,
    undo: Option<Undo>,
}

impl<'a> Speculation<'a> {
    pub fn new(position: &'a mut Position, mv: Move) -> Self {
        let undo = make_move(position, mv);
        Speculation {
            position,
            mv,
            undo: Some(undo),
        }
    }
}

impl Deref for Speculation<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.position
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            unmake_move(self.position, self.mv, undo);
        }
    }
}

/// Runs `inspect` on `position` with `mv` applied, then reverts the move.
pub fn with_move_applied<R>(
    position: &mut Position,
    mv: Move,
    inspect: impl FnOnce(&Position) -> R,
) -> R {
    let speculation = Speculation::new(position, mv);
    inspect(&speculation)
}
