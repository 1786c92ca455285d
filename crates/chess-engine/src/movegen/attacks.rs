//! Square attack detection.
//!
//! Every query walks the board from the target square outwards, so no
//! attack tables need to be kept in sync with the position.

use crate::Position;
use chess_core::{Color, PieceKind, Square};

/// Knight jumps as (rank, file) steps.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// The eight neighbouring squares.
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Returns the first occupied square along a ray, excluding `from` itself.
fn first_occupied(position: &Position, from: Square, (dr, df): (i8, i8)) -> Option<Square> {
    let mut current = from.offset(dr, df);
    while let Some(sq) = current {
        if !position.is_empty(sq) {
            return Some(sq);
        }
        current = sq.offset(dr, df);
    }
    None
}

/// True if a piece of `color` and one of `kinds` stands on any of `squares`.
fn any_piece_on(
    position: &Position,
    squares: impl IntoIterator<Item = Option<Square>>,
    color: Color,
    kinds: &[PieceKind],
) -> bool {
    squares.into_iter().flatten().any(|sq| {
        position
            .piece_at(sq)
            .is_some_and(|p| p.color == color && kinds.contains(&p.kind))
    })
}

/// Returns true if any piece of `by_color` could capture on `sq`.
///
/// `sq` does not need to be occupied. A missing king on either side does
/// not affect the answer.
pub fn is_square_attacked(position: &Position, sq: Square, by_color: Color) -> bool {
    // Pawns capture diagonally forward, so an attacking pawn sits one step
    // behind the target from its own point of view.
    let back = -by_color.pawn_direction();
    let pawn_origins = [sq.offset(back, -1), sq.offset(back, 1)];
    if any_piece_on(position, pawn_origins, by_color, &[PieceKind::Pawn]) {
        return true;
    }

    let knights = KNIGHT_OFFSETS.iter().map(|&(dr, df)| sq.offset(dr, df));
    if any_piece_on(position, knights, by_color, &[PieceKind::Knight]) {
        return true;
    }

    let kings = KING_OFFSETS.iter().map(|&(dr, df)| sq.offset(dr, df));
    if any_piece_on(position, kings, by_color, &[PieceKind::King]) {
        return true;
    }

    let rook_rays = ORTHOGONAL.iter().map(|&dir| first_occupied(position, sq, dir));
    if any_piece_on(
        position,
        rook_rays,
        by_color,
        &[PieceKind::Rook, PieceKind::Queen],
    ) {
        return true;
    }

    let bishop_rays = DIAGONAL.iter().map(|&dir| first_occupied(position, sq, dir));
    any_piece_on(
        position,
        bishop_rays,
        by_color,
        &[PieceKind::Bishop, PieceKind::Queen],
    )
}

/// Returns true if `king_color`'s king stands on an attacked square.
///
/// A side without a king is never in check.
pub fn is_king_attacked(position: &Position, king_color: Color) -> bool {
    match position.king_square(king_color) {
        Some(king_sq) => is_square_attacked(position, king_sq, king_color.opposite()),
        None => false,
    }
}
