//! Rule set abstraction.
//!
//! This module provides the [`RuleSet`] trait which separates the game
//! session from the rules it enforces, and the [`GameStatus`] every rule set
//! reports.

mod standard;

pub use standard::{evaluate, is_insufficient_material, StandardChess};

use crate::{MoveList, Position};
use chess_core::{Color, Move};
use std::fmt;

/// Outcome of evaluating a position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Play continues and the side to move is not in check.
    Ongoing,
    /// Play continues; the given side is in check but has a legal reply.
    Check(Color),
    /// The side to move is in check with no legal reply.
    Checkmate { winner: Color },
    /// The side to move has no legal move and is not in check.
    Stalemate,
    /// 100 plies without a pawn move or capture.
    DrawFiftyMove,
    /// Neither side has enough material left to deliver mate.
    DrawInsufficientMaterial,
    /// A king is missing from the board. Unreachable through legal play.
    NoKing { winner: Color },
}

impl GameStatus {
    /// Returns true if no further moves may be played.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check(_))
    }

    /// Returns true for the drawn outcomes.
    pub const fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate | GameStatus::DrawFiftyMove | GameStatus::DrawInsufficientMaterial
        )
    }

    /// The winning side, if the game was decided.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } | GameStatus::NoKing { winner } => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Check(color) => write!(f, "{} is in check", color),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::DrawFiftyMove => write!(f, "draw by the fifty-move rule"),
            GameStatus::DrawInsufficientMaterial => write!(f, "draw by insufficient material"),
            GameStatus::NoKing { winner } => write!(f, "king missing, {} wins", winner),
        }
    }
}

/// Trait for the rules a [`Game`](crate::Game) enforces.
///
/// Positions are passed by reference and never kept, so one rule set value
/// can serve any number of games.
///
/// # Example
///
/// ```
/// use chess_engine::rules::{GameStatus, RuleSet, StandardChess};
///
/// let position = StandardChess.initial_position();
/// assert_eq!(StandardChess.generate_moves(&position).len(), 20);
/// assert_eq!(StandardChess.evaluate(&position), GameStatus::Ongoing);
/// ```
pub trait RuleSet {
    /// Returns the initial position for this rule set.
    fn initial_position(&self) -> Position;

    /// Generates all legal moves for the side to move.
    fn generate_moves(&self, position: &Position) -> MoveList;

    /// Returns true if the given move is legal in the position.
    fn is_legal(&self, position: &Position, m: Move) -> bool {
        self.generate_moves(position).contains(&m)
    }

    /// Plays a legal move and hands the turn to the other side.
    ///
    /// The move is trusted; use [`try_make_move`](RuleSet::try_make_move)
    /// for unchecked input.
    fn make_move(&self, position: &Position, m: Move) -> Position;

    /// Attempts to make a move, returning `None` if illegal.
    fn try_make_move(&self, position: &Position, m: Move) -> Option<Position> {
        if self.is_legal(position, m) {
            Some(self.make_move(position, m))
        } else {
            None
        }
    }

    /// Returns true if the side to move is in check.
    fn is_check(&self, position: &Position) -> bool;

    /// Classifies the position for the side to move.
    fn evaluate(&self, position: &Position) -> GameStatus;

    /// Returns true if the game is over.
    fn is_game_over(&self, position: &Position) -> bool {
        self.evaluate(position).is_terminal()
    }

    /// Returns true if neither side has sufficient material to checkmate.
    fn is_insufficient_material(&self, position: &Position) -> bool;
}
