//! Move generation.
//!
//! Candidates are every (origin, destination) pair that matches a piece
//! pattern, plus en passant and castling, which are added separately.
//! Each candidate is then played on a scratch copy of the position and
//! dropped if it leaves the mover's king attacked.

mod attacks;
mod make;
mod pattern;
pub mod perft;
mod speculate;

use crate::position::{king_home, CastleSide};
use crate::Position;
use chess_core::{Color, Move, PieceKind, Square};

pub use attacks::{is_king_attacked, is_square_attacked};
pub use make::{apply_move, make_move, unmake_move, Undo};
pub use pattern::{is_pseudo_legal_pattern, path_clear};
pub use speculate::{with_move_applied, Speculation};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns true if `m` is in the list.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Iterates over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates every legal move for `side`, whoever is recorded as to move.
///
/// The order of the returned moves carries no meaning.
pub fn generate_legal_moves(position: &Position, side: Color) -> MoveList {
    let mut moves = MoveList::new();
    let mut scratch = position.clone();

    for (from, piece) in position.pieces().filter(|(_, p)| p.color == side) {
        for to in Square::all() {
            let candidate = is_pseudo_legal_pattern(position, from, to)
                || is_en_passant_candidate(position, from, to, side)
                || castling_candidate(position, from, to, side).is_some();
            if !candidate {
                continue;
            }

            if piece.kind == PieceKind::Pawn && to.rank() == side.promotion_rank() {
                for kind in PieceKind::PROMOTIONS {
                    let m = Move::with_promotion(from, to, kind);
                    push_if_king_safe(&mut scratch, m, side, &mut moves);
                }
            } else {
                push_if_king_safe(&mut scratch, Move::new(from, to), side, &mut moves);
            }
        }
    }

    debug_assert_eq!(&scratch, position);
    moves
}

/// Generates every legal move for the side recorded as to move.
pub fn generate_moves(position: &Position) -> MoveList {
    generate_legal_moves(position, position.side_to_move)
}

/// Returns true if `side` has at least one legal move.
pub fn has_legal_move(position: &Position, side: Color) -> bool {
    !generate_legal_moves(position, side).is_empty()
}

fn push_if_king_safe(scratch: &mut Position, m: Move, side: Color, moves: &mut MoveList) {
    if leaves_king_safe(scratch, m, side) {
        moves.push(m);
    }
}

/// Plays `m` on `scratch` and reports whether `side`'s king is unattacked
/// afterwards. A side whose king is gone is never safe.
fn leaves_king_safe(scratch: &mut Position, m: Move, side: Color) -> bool {
    with_move_applied(scratch, m, |after| match after.king_square(side) {
        Some(king) => !is_square_attacked(after, king, side.opposite()),
        None => false,
    })
}

/// A pawn stepping diagonally onto the en passant target, with the enemy
/// pawn that just double-pushed standing beside it.
fn is_en_passant_candidate(position: &Position, from: Square, to: Square, side: Color) -> bool {
    if position.en_passant != Some(to) || !position.is_empty(to) {
        return false;
    }
    let Some(pawn) = position.piece_at(from) else {
        return false;
    };
    if !pawn.is(side, PieceKind::Pawn) {
        return false;
    }
    let forward = to.rank() as i8 - from.rank() as i8 == side.pawn_direction();
    if !forward || from.file().abs_diff(to.file()) != 1 {
        return false;
    }
    Square::new(from.rank(), to.file())
        .and_then(|sq| position.piece_at(sq))
        .is_some_and(|victim| victim.is(side.opposite(), PieceKind::Pawn))
}

/// Returns the castling side if `from -> to` is a permitted castling move
/// for `side`, checking everything except the final king-safety test.
fn castling_candidate(
    position: &Position,
    from: Square,
    to: Square,
    side: Color,
) -> Option<CastleSide> {
    let home = king_home(side);
    let king_at_home = position
        .piece_at(from)
        .is_some_and(|p| p.is(side, PieceKind::King));
    if from != home || !king_at_home {
        return None;
    }
    let castle = CastleSide::BOTH
        .into_iter()
        .find(|castle| castle.king_target(side) == to)?;

    if !position.castling.may_castle(side, castle) {
        return None;
    }
    let rook_home = castle.rook_home(side);
    if !position
        .piece_at(rook_home)
        .is_some_and(|p| p.is(side, PieceKind::Rook))
    {
        return None;
    }
    if !path_clear(position, home, rook_home) {
        return None;
    }

    // The king may not start in, pass through or land on an attacked square.
    let step = if to.file() > from.file() { 1 } else { -1 };
    let transit = [Some(home), home.offset(0, step), Some(to)];
    let attacker = side.opposite();
    if transit
        .into_iter()
        .flatten()
        .any(|sq| is_square_attacked(position, sq, attacker))
    {
        return None;
    }

    Some(castle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::MoveKind;

    fn mv(s: &str) -> Move {
        Move::from_coordinate(s).unwrap()
    }

    fn legal(fen: &str) -> MoveList {
        let pos = Position::from_fen(fen).unwrap();
        generate_moves(&pos)
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = mv("e2e4");
        let m2 = mv("d2d4");
        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert!(list.contains(&m2));
        assert!(!list.contains(&mv("c2c4")));
        assert_eq!(list.iter().count(), 2);
    }

    #[test]
    fn generate_moves_startpos() {
        let position = Position::startpos();
        assert_eq!(generate_legal_moves(&position, Color::White).len(), 20);
        assert_eq!(generate_legal_moves(&position, Color::Black).len(), 20);
    }

    #[test]
    fn generation_does_not_disturb_the_position() {
        let position =
            Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        let before = position.clone();
        let _ = generate_moves(&position);
        assert_eq!(position, before);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        // The knight on e2 shields the king from the rook on e8.
        let moves = legal("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(moves.iter().all(|m| m.from != Square::from_algebraic("e2").unwrap()));
    }

    #[test]
    fn check_must_be_answered() {
        // The rook on a1 checks along the first rank and nothing can interpose.
        let moves = legal("4k3/8/8/8/8/8/3PPP2/r3K3 w - - 0 1");
        assert!(moves.is_empty());

        // Here the bishop can block on d1.
        let moves = legal("4k3/8/8/8/B7/8/3PPP2/r3K3 w - - 0 1");
        assert_eq!(moves.as_slice(), &[mv("a4d1")][..]);
    }

    #[test]
    fn castling_both_sides() {
        let moves = legal("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        assert!(moves.contains(&mv("e1g1")));
        assert!(moves.contains(&mv("e1c1")));
        let moves = legal("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1");
        assert!(moves.contains(&mv("e8g8")));
        assert!(moves.contains(&mv("e8c8")));
    }

    #[test]
    fn no_castling_through_check() {
        // The rook on f5 covers f1, which the king would cross.
        let moves = legal("r3k2r/pppppppp/8/5r2/8/8/PPPPP1PP/R3K2R w KQkq - 0 1");
        assert!(!moves.contains(&mv("e1g1")));
        assert!(moves.contains(&mv("e1c1")));
    }

    #[test]
    fn no_castling_out_of_check() {
        let moves = legal("r3k2r/pppp1ppp/8/4r3/8/8/PPPP1PPP/R3K2R w KQkq - 0 1");
        assert!(!moves.contains(&mv("e1g1")));
        assert!(!moves.contains(&mv("e1c1")));
    }

    #[test]
    fn no_castling_into_check() {
        let moves = legal("r3k2r/pppppp1p/8/6r1/8/8/PPPPPP1P/R3K2R w KQkq - 0 1");
        assert!(!moves.contains(&mv("e1g1")));
    }

    #[test]
    fn queenside_b_file_may_be_attacked_but_not_occupied() {
        // b1 is attacked by the rook on b8 but the king never crosses it.
        let moves = legal("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(moves.contains(&mv("e1c1")));
        let moves = legal("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1");
        assert!(!moves.contains(&mv("e1c1")));
    }

    #[test]
    fn no_castling_after_rights_lost_or_rook_missing() {
        let moves = legal("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1");
        assert!(!moves.contains(&mv("e1g1")));
        assert!(moves.contains(&mv("e1c1")));
        // Rights still recorded but the rook has gone.
        let moves = legal("r3k3/8/8/8/8/8/8/R3K3 w KQkq - 0 1");
        assert!(!moves.contains(&mv("e1g1")));
    }

    #[test]
    fn en_passant_is_offered() {
        let pos =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 1")
                .unwrap();
        let moves = generate_moves(&pos);
        let ep = mv("f5e6");
        assert!(moves.contains(&ep));
        assert_eq!(pos.classify(ep), MoveKind::EnPassant);
    }

    #[test]
    fn en_passant_needs_the_enemy_pawn() {
        // Target recorded but nothing on e5 to capture.
        let moves = legal("rnbqkbnr/pppp1ppp/8/5P2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 1");
        assert!(!moves.contains(&mv("f5e6")));
    }

    #[test]
    fn en_passant_that_exposes_the_king_is_illegal() {
        // Capturing would clear the fifth rank between king and rook.
        let moves = legal("8/8/8/KPp4r/8/8/8/7k w - c6 0 1");
        assert!(!moves.contains(&mv("b5c6")));
        assert!(moves.contains(&mv("b5b6")));
    }

    #[test]
    fn promotion_expands_to_four_moves() {
        let moves = legal("8/P7/8/8/8/8/8/4K2k w - - 0 1");
        let promos: Vec<&Move> = moves.iter().filter(|m| m.promotion.is_some()).collect();
        assert_eq!(promos.len(), 4);
        for kind in PieceKind::PROMOTIONS {
            assert!(moves.contains(&Move::with_promotion(
                Square::from_algebraic("a7").unwrap(),
                Square::A8,
                kind
            )));
        }
        assert!(!moves.contains(&mv("a7a8")));
    }

    #[test]
    fn side_without_king_has_no_moves() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R7 w - - 0 1").unwrap();
        assert!(generate_legal_moves(&pos, Color::White).is_empty());
        assert!(!generate_legal_moves(&pos, Color::Black).is_empty());
    }
}
