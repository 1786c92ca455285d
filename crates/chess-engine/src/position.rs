//! Chess position representation.

use chess_core::{Color, Fen, FenCastling, FenError, Move, Piece, PieceKind, Square};

/// The side of the board a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// File the rook starts on.
    #[inline]
    pub const fn rook_home_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// File the rook lands on after castling.
    #[inline]
    pub const fn rook_target_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    /// File the king lands on after castling.
    #[inline]
    pub const fn king_target_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// Home square of this side's rook for `color`.
    #[inline]
    pub fn rook_home(self, color: Color) -> Square {
        back_rank_square(color, self.rook_home_file())
    }

    /// Square the rook is moved to when `color` castles on this side.
    #[inline]
    pub fn rook_target(self, color: Color) -> Square {
        back_rank_square(color, self.rook_target_file())
    }

    /// Square the king is moved to when `color` castles on this side.
    #[inline]
    pub fn king_target(self, color: Color) -> Square {
        back_rank_square(color, self.king_target_file())
    }
}

/// Home square of `color`'s king.
#[inline]
pub fn king_home(color: Color) -> Square {
    back_rank_square(color, 4)
}

fn back_rank_square(color: Color, file: u8) -> Square {
    match Square::new(color.back_rank(), file) {
        Some(sq) => sq,
        None => unreachable!("back rank and castling files are on the board"),
    }
}

/// Castling bookkeeping: one "has moved" flag per king and per home rook.
///
/// Flags only ever go from clear to set. A rook flag is also set when that
/// rook is captured on its home square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// Nothing has moved yet; every castle is still possible.
    pub const UNTOUCHED: CastlingRights = CastlingRights(0);
    /// Every king and rook counts as moved.
    pub const FORFEITED: CastlingRights = CastlingRights(0b11_1111);

    const fn king_bit(color: Color) -> u8 {
        1 << (color.index() * 3)
    }

    const fn rook_bit(color: Color, side: CastleSide) -> u8 {
        let offset = match side {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => 2,
        };
        1 << (color.index() * 3 + offset)
    }

    /// Returns true once `color`'s king has moved.
    #[inline]
    pub const fn king_moved(self, color: Color) -> bool {
        self.0 & Self::king_bit(color) != 0
    }

    /// Returns true once `color`'s rook on `side` has moved or been captured.
    #[inline]
    pub const fn rook_moved(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::rook_bit(color, side) != 0
    }

    #[inline]
    pub fn mark_king_moved(&mut self, color: Color) {
        self.0 |= Self::king_bit(color);
    }

    #[inline]
    pub fn mark_rook_moved(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::rook_bit(color, side);
    }

    /// True while neither the king nor the rook on `side` has moved.
    ///
    /// This is only the bookkeeping half of castling legality; occupancy and
    /// attacks are checked by the move generator.
    #[inline]
    pub const fn may_castle(self, color: Color, side: CastleSide) -> bool {
        !self.king_moved(color) && !self.rook_moved(color, side)
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    fn from_fen(fen: FenCastling) -> Self {
        let mut rights = CastlingRights::UNTOUCHED;
        let per_color = [
            (Color::White, fen.white_kingside, fen.white_queenside),
            (Color::Black, fen.black_kingside, fen.black_queenside),
        ];
        for (color, kingside, queenside) in per_color {
            if !kingside && !queenside {
                rights.mark_king_moved(color);
            }
            if !kingside {
                rights.mark_rook_moved(color, CastleSide::Kingside);
            }
            if !queenside {
                rights.mark_rook_moved(color, CastleSide::Queenside);
            }
        }
        rights
    }

    fn to_fen(self) -> FenCastling {
        FenCastling {
            white_kingside: self.may_castle(Color::White, CastleSide::Kingside),
            white_queenside: self.may_castle(Color::White, CastleSide::Queenside),
            black_kingside: self.may_castle(Color::Black, CastleSide::Kingside),
            black_queenside: self.may_castle(Color::Black, CastleSide::Queenside),
        }
    }
}

/// What a move does, as derived from the position it is played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Quiet,
    DoublePush,
    Capture,
    EnPassant,
    Castle(CastleSide),
}

impl MoveKind {
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(self, MoveKind::Capture | MoveKind::EnPassant)
    }
}

/// Complete chess position state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// The board, indexed `[rank][file]` with rank 0 being the eighth rank.
    pub squares: [[Option<Piece>; 8]; 8],

    /// The side to move.
    pub side_to_move: Color,

    /// King and rook "has moved" flags.
    pub castling: CastlingRights,

    /// Square a pawn would land on when capturing en passant. Set only right
    /// after a double push.
    pub en_passant: Option<Square>,

    /// Plies since the last pawn move or capture.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates an empty board with White to move.
    pub fn empty() -> Self {
        Position {
            squares: [[None; 8]; 8],
            side_to_move: Color::White,
            castling: CastlingRights::FORFEITED,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(Fen::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from(Fen::parse(fen)?))
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        Fen::from(self).to_fen()
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize]
    }

    /// Puts `piece` on `sq` (or empties it) and returns what was there.
    #[inline]
    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.squares[sq.rank() as usize][sq.file() as usize],
            piece,
        )
    }

    /// Returns true if nothing stands on `sq`.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Iterates over every occupied square.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Locates `color`'s king. Returns the first one found scanning from a8.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is(color, PieceKind::King))
            .map(|(sq, _)| sq)
    }

    /// Material sum with White counted positive (P=1, N=B=3, R=5, Q=9).
    pub fn material_balance(&self) -> i32 {
        self.pieces()
            .map(|(_, p)| match p.color {
                Color::White => p.kind.value(),
                Color::Black => -p.kind.value(),
            })
            .sum()
    }

    /// Derives what `m` does in this position.
    ///
    /// Assumes a piece stands on `m.from`; an empty origin is reported as
    /// [`MoveKind::Quiet`].
    pub fn classify(&self, m: Move) -> MoveKind {
        let Some(piece) = self.piece_at(m.from) else {
            return MoveKind::Quiet;
        };
        let rank_span = m.from.rank().abs_diff(m.to.rank());
        let file_span = m.from.file().abs_diff(m.to.file());

        match piece.kind {
            PieceKind::King if m.from == king_home(piece.color) && rank_span == 0 && file_span == 2 => {
                if m.to.file() > m.from.file() {
                    MoveKind::Castle(CastleSide::Kingside)
                } else {
                    MoveKind::Castle(CastleSide::Queenside)
                }
            }
            PieceKind::Pawn
                if file_span == 1 && Some(m.to) == self.en_passant && self.is_empty(m.to) =>
            {
                MoveKind::EnPassant
            }
            _ if !self.is_empty(m.to) => MoveKind::Capture,
            PieceKind::Pawn if rank_span == 2 => MoveKind::DoublePush,
            _ => MoveKind::Quiet,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl From<Fen> for Position {
    fn from(fen: Fen) -> Self {
        Position {
            squares: fen.board,
            side_to_move: fen.side_to_move,
            castling: CastlingRights::from_fen(fen.castling),
            en_passant: fen.en_passant,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
        }
    }
}

impl From<&Position> for Fen {
    fn from(position: &Position) -> Self {
        Fen {
            board: position.squares,
            side_to_move: position.side_to_move,
            castling: position.castling.to_fen(),
            en_passant: position.en_passant,
            halfmove_clock: position.halfmove_clock,
            fullmove_number: position.fullmove_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_fen_roundtrip() {
        let pos = Position::startpos();
        assert_eq!(pos.to_fen(), Fen::STARTPOS);
        assert_eq!(pos.castling, CastlingRights::UNTOUCHED);
    }

    #[test]
    fn custom_fen_roundtrip() {
        for fen in [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w Kq - 0 1",
            "8/8/8/8/8/8/8/4K2k w - - 0 1",
        ] {
            assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn piece_at() {
        let pos = Position::startpos();
        assert_eq!(
            pos.piece_at(Square::E1),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            pos.piece_at(Square::E8),
            Some(Piece::new(Color::Black, PieceKind::King))
        );
        assert_eq!(pos.piece_at(sq("e4")), None);
        assert_eq!(pos.pieces().count(), 32);
    }

    #[test]
    fn king_square() {
        let pos = Position::startpos();
        assert_eq!(pos.king_square(Color::White), Some(Square::E1));
        assert_eq!(pos.king_square(Color::Black), Some(Square::E8));
        assert_eq!(Position::empty().king_square(Color::White), None);
    }

    #[test]
    fn castling_flags_are_independent() {
        let mut rights = CastlingRights::UNTOUCHED;
        assert!(rights.may_castle(Color::White, CastleSide::Kingside));

        rights.mark_rook_moved(Color::White, CastleSide::Kingside);
        assert!(!rights.may_castle(Color::White, CastleSide::Kingside));
        assert!(rights.may_castle(Color::White, CastleSide::Queenside));
        assert!(rights.may_castle(Color::Black, CastleSide::Kingside));

        rights.mark_king_moved(Color::Black);
        assert!(!rights.may_castle(Color::Black, CastleSide::Kingside));
        assert!(!rights.may_castle(Color::Black, CastleSide::Queenside));
        assert!(!rights.rook_moved(Color::Black, CastleSide::Queenside));
    }

    #[test]
    fn fen_without_rights_marks_king_moved() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w k - 0 1").unwrap();
        assert!(pos.castling.king_moved(Color::White));
        assert!(!pos.castling.king_moved(Color::Black));
        assert!(pos.castling.rook_moved(Color::Black, CastleSide::Queenside));
        assert!(!pos.castling.rook_moved(Color::Black, CastleSide::Kingside));
    }

    #[test]
    fn material_balance() {
        assert_eq!(Position::startpos().material_balance(), 0);
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/RN2K3 w - - 0 1").unwrap();
        assert_eq!(pos.material_balance(), 8);
    }

    #[test]
    fn classify_moves() {
        let pos =
            Position::from_fen("r3k2r/8/8/3pP3/8/8/4P3/R3K2R w KQkq d6 0 1").unwrap();
        assert_eq!(
            pos.classify(Move::new(Square::E1, Square::G1)),
            MoveKind::Castle(CastleSide::Kingside)
        );
        assert_eq!(
            pos.classify(Move::new(Square::E1, Square::C1)),
            MoveKind::Castle(CastleSide::Queenside)
        );
        assert_eq!(
            pos.classify(Move::new(sq("e5"), sq("d6"))),
            MoveKind::EnPassant
        );
        assert_eq!(
            pos.classify(Move::new(sq("e2"), sq("e4"))),
            MoveKind::DoublePush
        );
        assert_eq!(pos.classify(Move::new(Square::A1, Square::A8)), MoveKind::Capture);
        assert_eq!(pos.classify(Move::new(Square::E1, sq("f1"))), MoveKind::Quiet);
    }
}
