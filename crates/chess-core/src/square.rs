//! Board square representation.

use std::fmt;

/// A square on the board, addressed by rank and file, each 0-7.
///
/// Rank 0 is the eighth rank as seen from White (the top of a printed
/// board), so `a8` is `(0, 0)`, `h8` is `(0, 7)` and `a1` is `(7, 0)`.
/// The packed index is `rank * 8 + file`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from rank and file, or `None` if either is off the board.
    #[inline]
    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Creates a square from its packed index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Iterates over all 64 squares, rank 0 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Square::new(b'8' - rank, file - b'a')
    }

    /// Returns the packed index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Board row, 0 being the eighth rank.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Board column, 0 being the a-file.
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square displaced by the given rank and file steps, if it
    /// stays on the board.
    #[inline]
    pub const fn offset(self, d_rank: i8, d_file: i8) -> Option<Self> {
        let rank = self.rank() as i8 + d_rank;
        let file = self.file() as i8 + d_file;
        if rank < 0 || rank > 7 || file < 0 || file > 7 {
            None
        } else {
            Some(Square(rank as u8 * 8 + file as u8))
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file()) as char, 8 - self.rank())
    }

    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
