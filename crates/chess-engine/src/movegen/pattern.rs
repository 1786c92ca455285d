//! Piece movement geometry, ignoring king safety.
//!
//! En passant and castling are not recognised here: their destination
//! squares do not fit the ordinary patterns, so the generator adds them
//! as separate candidates.

use crate::Position;
use chess_core::{PieceKind, Square};

/// Returns true if every square strictly between `from` and `to` is empty.
///
/// The squares must share a rank, file or diagonal.
pub fn path_clear(position: &Position, from: Square, to: Square) -> bool {
    let dr = (to.rank() as i8 - from.rank() as i8).signum();
    let df = (to.file() as i8 - from.file() as i8).signum();
    let mut current = from.offset(dr, df);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !position.is_empty(sq) {
            return false;
        }
        current = sq.offset(dr, df);
    }
    false
}

/// Returns true if the piece on `from` may move to `to` by its movement
/// pattern alone.
///
/// Rejects an empty origin, a null move and landing on a friendly piece.
pub fn is_pseudo_legal_pattern(position: &Position, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let Some(piece) = position.piece_at(from) else {
        return false;
    };
    let target = position.piece_at(to);
    if target.is_some_and(|t| t.color == piece.color) {
        return false;
    }

    let dr = to.rank() as i8 - from.rank() as i8;
    let df = to.file() as i8 - from.file() as i8;
    let straight = dr == 0 || df == 0;
    let diagonal = dr.abs() == df.abs();

    match piece.kind {
        PieceKind::Pawn => {
            let dir = piece.color.pawn_direction();
            if df == 0 && target.is_none() {
                if dr == dir {
                    return true;
                }
                return dr == 2 * dir
                    && from.rank() == piece.color.pawn_rank()
                    && from.offset(dir, 0).is_some_and(|mid| position.is_empty(mid));
            }
            dr == dir && df.abs() == 1 && target.is_some()
        }
        PieceKind::Knight => matches!((dr.abs(), df.abs()), (1, 2) | (2, 1)),
        PieceKind::Bishop => diagonal && path_clear(position, from, to),
        PieceKind::Rook => straight && path_clear(position, from, to),
        PieceKind::Queen => (straight || diagonal) && path_clear(position, from, to),
        PieceKind::King => dr.abs() <= 1 && df.abs() <= 1,
    }
}
