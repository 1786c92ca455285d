//! Standard chess rules implementation.

use super::{GameStatus, RuleSet};
use crate::movegen::{apply_move, generate_moves, has_legal_move, is_king_attacked};
use crate::{MoveList, Position};
use chess_core::{Color, Move, PieceKind};

/// Standard chess rules.
///
/// - Standard piece movement
/// - Castling (kingside and queenside)
/// - En passant
/// - Pawn promotion to queen, rook, bishop or knight
/// - Check, checkmate, and stalemate detection
/// - 50-move rule and insufficient material draws
///
/// A king is never captured: checkmate is the only way to lose it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_position(&self) -> Position {
        Position::startpos()
    }

    fn generate_moves(&self, position: &Position) -> MoveList {
        generate_moves(position)
    }

    fn make_move(&self, position: &Position, m: Move) -> Position {
        let mut next = position.clone();
        apply_move(&mut next, m);
        if next.side_to_move == Color::Black {
            next.fullmove_number += 1;
        }
        next.side_to_move = next.side_to_move.opposite();
        next
    }

    fn is_check(&self, position: &Position) -> bool {
        is_king_attacked(position, position.side_to_move)
    }

    fn evaluate(&self, position: &Position) -> GameStatus {
        evaluate(position)
    }

    fn is_insufficient_material(&self, position: &Position) -> bool {
        is_insufficient_material(position)
    }
}

/// Classifies `position` for the side to move. The first matching rule wins:
///
/// 1. a missing king loses (White's king is checked first)
/// 2. the fifty-move rule
/// 3. insufficient material
/// 4. no legal move: checkmate if in check, stalemate otherwise
/// 5. check, or ongoing
pub fn evaluate(position: &Position) -> GameStatus {
    for color in Color::BOTH {
        if position.king_square(color).is_none() {
            return GameStatus::NoKing {
                winner: color.opposite(),
            };
        }
    }

    if position.halfmove_clock >= 100 {
        return GameStatus::DrawFiftyMove;
    }

    if is_insufficient_material(position) {
        return GameStatus::DrawInsufficientMaterial;
    }

    let side = position.side_to_move;
    let in_check = is_king_attacked(position, side);
    match (has_legal_move(position, side), in_check) {
        (false, true) => GameStatus::Checkmate {
            winner: side.opposite(),
        },
        (false, false) => GameStatus::Stalemate,
        (true, true) => GameStatus::Check(side),
        (true, false) => GameStatus::Ongoing,
    }
}

/// Returns true if no pawn, rook or queen remains and each side holds at
/// most one bishop or knight.
pub fn is_insufficient_material(position: &Position) -> bool {
    let mut minors = [0u8; 2];
    for (_, piece) in position.pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Bishop | PieceKind::Knight => minors[piece.color.index()] += 1,
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
        }
    }
    minors.iter().all(|&count| count <= 1)
}
