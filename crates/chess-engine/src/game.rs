//! Game session state.
//!
//! The [`Game`] struct owns the current position and carries the
//! turn-by-turn bookkeeping around the rules engine:
//! - Move history and the last move played
//! - Side to move and fullmove number
//! - The cached game status, refusing moves once the game is over
//! - Promotion choice as a separate step

use crate::rules::{GameStatus, RuleSet, StandardChess};
use crate::{MoveList, Position};
use chess_core::{Color, FenError, Move, PieceKind, Square};
use thiserror::Error;

/// Error type for game operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    /// A pawn reaching the last rank was moved without a promotion piece.
    #[error("move {0} needs a promotion piece")]
    PromotionRequired(Move),

    /// Pawns only promote to queen, rook, bishop or knight.
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    /// The game has already ended.
    #[error("game has already ended: {0}")]
    GameAlreadyOver(GameStatus),

    /// The starting position could not be parsed.
    #[error(transparent)]
    Fen(#[from] FenError),
}

/// The answer to [`Game::begin_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRequest {
    /// A complete legal move, ready for [`Game::make_move`].
    Ready(Move),
    /// A pawn move onto the last rank still waiting for its piece.
    Promotion(PendingPromotion),
}

/// A legal pawn move onto the last rank whose promotion piece has not been
/// chosen yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    from: Square,
    to: Square,
}

impl PendingPromotion {
    pub fn from(&self) -> Square {
        self.from
    }

    pub fn to(&self) -> Square {
        self.to
    }

    /// Completes the move with the chosen piece.
    pub fn resolve(self, kind: PieceKind) -> Result<Move, GameError> {
        if !kind.is_promotion_target() {
            return Err(GameError::InvalidPromotion(kind));
        }
        Ok(Move::with_promotion(self.from, self.to, kind))
    }
}

/// A chess game in progress.
///
/// Unlike [`Position`], which represents a single board state, `Game`
/// remembers how it got there and whether play may continue.
#[derive(Debug, Clone)]
pub struct Game<R: RuleSet = StandardChess> {
    rules: R,
    /// Current position.
    position: Position,
    /// Starting position.
    start_pos: Position,
    /// Moves played since the starting position.
    moves: Vec<Move>,
    /// Status of the current position.
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::with_rules(StandardChess, StandardChess.initial_position())
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position) -> Self {
        Self::with_rules(StandardChess, position)
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }
}

impl<R: RuleSet> Game<R> {
    /// Creates a game under `rules`, starting from `position`.
    ///
    /// The position is evaluated straight away, so a game may begin already
    /// finished.
    pub fn with_rules(rules: R, position: Position) -> Self {
        let status = rules.evaluate(&position);
        Game {
            rules,
            start_pos: position.clone(),
            position,
            moves: Vec::new(),
            status,
        }
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the starting position.
    pub fn start_position(&self) -> &Position {
        &self.start_pos
    }

    /// Returns the rules this game is played under.
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    /// Returns all legal moves in the current position.
    ///
    /// Empty once the game is over.
    pub fn legal_moves(&self) -> MoveList {
        if self.status.is_terminal() {
            return MoveList::new();
        }
        self.rules.generate_moves(&self.position)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.rules.is_check(&self.position)
    }

    /// Returns the status of the current position.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the move history.
    pub fn move_history(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the most recent move, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Returns the current full move number.
    pub fn fullmove_number(&self) -> u32 {
        self.position.fullmove_number
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    /// Starts a move by origin and destination only.
    ///
    /// Pawn moves onto the last rank come back as a [`PendingPromotion`];
    /// pass the resolved move to [`make_move`](Game::make_move).
    pub fn begin_move(&self, from: Square, to: Square) -> Result<MoveRequest, GameError> {
        self.ensure_ongoing()?;
        let legal = self.rules.generate_moves(&self.position);
        let candidate = legal
            .iter()
            .find(|m| m.from == from && m.to == to)
            .copied()
            .ok_or(GameError::IllegalMove(Move::new(from, to)))?;

        Ok(match candidate.promotion {
            Some(_) => MoveRequest::Promotion(PendingPromotion { from, to }),
            None => MoveRequest::Ready(candidate),
        })
    }

    /// Plays a move and returns the status of the resulting position.
    pub fn make_move(&mut self, m: Move) -> Result<GameStatus, GameError> {
        self.ensure_ongoing()?;
        if let Some(kind) = m.promotion {
            if !kind.is_promotion_target() {
                return Err(GameError::InvalidPromotion(kind));
            }
        }

        let legal = self.rules.generate_moves(&self.position);
        if !legal.contains(&m) {
            let needs_piece = m.promotion.is_none()
                && legal
                    .iter()
                    .any(|l| l.from == m.from && l.to == m.to && l.promotion.is_some());
            if needs_piece {
                return Err(GameError::PromotionRequired(m));
            }
            return Err(GameError::IllegalMove(m));
        }

        self.position = self.rules.make_move(&self.position, m);
        self.moves.push(m);
        tracing::debug!(mv = %m, fen = %self.position.to_fen(), "move played");

        let status = self.rules.evaluate(&self.position);
        if status != self.status {
            tracing::debug!(%status, "game status changed");
        }
        self.status = status;
        Ok(status)
    }

    fn ensure_ongoing(&self) -> Result<(), GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameAlreadyOver(self.status));
        }
        Ok(())
    }
}
