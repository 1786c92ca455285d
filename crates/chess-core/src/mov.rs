//! Move representation.

use crate::{PieceKind, Square};
use std::fmt;

/// A chess move: origin, destination and an optional promotion kind.
///
/// Whether a move captures, takes en passant or castles is not stored here;
/// it follows from the position the move is played in.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a move without promotion.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a pawn move that promotes to `kind`.
    #[inline]
    pub const fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_coordinate(self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.letter()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses coordinate notation.
    ///
    /// Only the shape is checked; whether the move is legal is for the
    /// engine to decide.
    pub fn from_coordinate(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            Some(c) => {
                let kind = PieceKind::from_letter(c)?;
                if !kind.is_promotion_target() {
                    return None;
                }
                Some(kind)
            }
            None => None,
        };
        Some(Move {
            from,
            to,
            promotion,
        })
    }

    /// Placeholder used to fill fixed-size move buffers; never legal.
    pub const NULL: Move = Move::new(Square::A8, Square::A8);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coordinate())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}
