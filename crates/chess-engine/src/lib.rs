//! Standard chess rules engine over a mailbox board.
//!
//! This crate provides:
//! - [`Position`] - Full game state including piece placement, castling flags, etc.
//! - Legal move generation, move execution and its exact inverse
//! - [`evaluate`] - Classifies a position as ongoing, check, mate or drawn
//! - [`Game`] - Session state with history and two-step promotion
//! - [`RuleSet`] - Trait separating the session from the rules it enforces
//!
//! # Architecture
//!
//! The board is an 8x8 grid of optional pieces. Attack queries walk outwards
//! from the target square, and legality is decided by playing each candidate
//! on a scratch copy and asking whether the mover's king is attacked.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Move};
//! use chess_engine::{apply_move, evaluate, generate_legal_moves, new_game, Game, GameStatus};
//!
//! // Working with a Position directly
//! let mut position = new_game();
//! let moves = generate_legal_moves(&position, Color::White);
//! assert_eq!(moves.len(), 20);
//! apply_move(&mut position, Move::from_coordinate("e2e4").unwrap());
//! position.side_to_move = Color::Black;
//! assert_eq!(evaluate(&position), GameStatus::Ongoing);
//!
//! // Using Game for turn bookkeeping
//! let mut game = Game::new();
//! game.make_move(Move::from_coordinate("e2e4").unwrap()).unwrap();
//! game.make_move(Move::from_coordinate("e7e5").unwrap()).unwrap();
//! println!("Position after 1.e4 e5: {}", game.to_fen());
//! ```

mod game;
pub mod movegen;
mod position;
pub mod rules;

pub use game::{Game, GameError, MoveRequest, PendingPromotion};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    apply_move, generate_legal_moves, generate_moves, is_king_attacked, is_square_attacked,
    make_move, unmake_move, MoveList, Undo,
};
pub use position::{king_home, CastleSide, CastlingRights, MoveKind, Position};
pub use rules::{evaluate, GameStatus, RuleSet, StandardChess};

/// Returns the standard starting position, White to move.
pub fn new_game() -> Position {
    Position::startpos()
}
