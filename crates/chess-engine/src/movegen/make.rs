//! Move execution and its exact inverse.

use crate::position::{CastleSide, MoveKind};
use crate::Position;
use chess_core::{Color, Move, Piece, PieceKind, Square};

/// Everything [`unmake_move`] needs to put a position back the way it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    /// The piece that stood on the origin square (before any promotion).
    moved: Option<Piece>,
    /// The captured piece and the square it was taken from.
    captured: Option<(Square, Piece)>,
    /// Rook relocation performed by a castling move.
    rook_shift: Option<(Square, Square)>,
    castling: crate::CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
}

impl Undo {
    /// The piece removed from the board by the move, if any.
    pub fn captured(&self) -> Option<Piece> {
        self.captured.map(|(_, piece)| piece)
    }
}

fn castle_side_of_rook_home(color: Color, sq: Square) -> Option<CastleSide> {
    CastleSide::BOTH
        .into_iter()
        .find(|side| side.rook_home(color) == sq)
}

/// Applies `m` to `position` and returns the information needed to revert it.
///
/// `m` must come from the legal move generator for the piece standing on
/// `m.from`; it is not validated again. Side to move and the fullmove number
/// are left alone.
pub fn make_move(position: &mut Position, m: Move) -> Undo {
    let mut undo = Undo {
        moved: position.piece_at(m.from),
        captured: None,
        rook_shift: None,
        castling: position.castling,
        en_passant: position.en_passant,
        halfmove_clock: position.halfmove_clock,
    };
    let Some(piece) = undo.moved else {
        return undo;
    };
    let kind = position.classify(m);

    // Captured piece: for en passant it sits beside the origin, on the
    // destination file.
    undo.captured = match kind {
        MoveKind::EnPassant => Square::new(m.from.rank(), m.to.file())
            .and_then(|sq| position.set_piece(sq, None).map(|p| (sq, p))),
        _ => position.piece_at(m.to).map(|p| (m.to, p)),
    };

    if piece.kind == PieceKind::Pawn || undo.captured.is_some() {
        position.halfmove_clock = 0;
    } else {
        position.halfmove_clock += 1;
    }

    position.set_piece(m.from, None);
    position.set_piece(m.to, Some(piece));

    if let MoveKind::Castle(side) = kind {
        let (rook_from, rook_to) = (side.rook_home(piece.color), side.rook_target(piece.color));
        let rook = position.set_piece(rook_from, None);
        position.set_piece(rook_to, rook);
        undo.rook_shift = Some((rook_from, rook_to));
    }

    match piece.kind {
        PieceKind::King => position.castling.mark_king_moved(piece.color),
        PieceKind::Rook => {
            if let Some(side) = castle_side_of_rook_home(piece.color, m.from) {
                position.castling.mark_rook_moved(piece.color, side);
            }
        }
        _ => {}
    }
    if let Some((sq, captured)) = undo.captured {
        if captured.kind == PieceKind::Rook {
            if let Some(side) = castle_side_of_rook_home(captured.color, sq) {
                position.castling.mark_rook_moved(captured.color, side);
            }
        }
    }

    position.en_passant = match kind {
        MoveKind::DoublePush => Square::new((m.from.rank() + m.to.rank()) / 2, m.from.file()),
        _ => None,
    };

    if let Some(promotion) = m.promotion {
        position.set_piece(m.to, Some(Piece::new(piece.color, promotion)));
    }

    undo
}

/// Reverts `m`, which must be the last move made on `position` with the
/// given `undo` record.
pub fn unmake_move(position: &mut Position, m: Move, undo: Undo) {
    if undo.moved.is_some() {
        position.set_piece(m.to, None);
        position.set_piece(m.from, undo.moved);
        if let Some((rook_from, rook_to)) = undo.rook_shift {
            let rook = position.set_piece(rook_to, None);
            position.set_piece(rook_from, rook);
        }
        if let Some((sq, piece)) = undo.captured {
            position.set_piece(sq, Some(piece));
        }
    }
    position.castling = undo.castling;
    position.en_passant = undo.en_passant;
    position.halfmove_clock = undo.halfmove_clock;
}

/// Applies a generated move in place.
///
/// Use [`make_move`] when the move has to be taken back later.
pub fn apply_move(position: &mut Position, m: Move) {
    make_move(position, m);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn mv(s: &str) -> Move {
        Move::from_coordinate(s).unwrap()
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let mut pos = Position::startpos();
        apply_move(&mut pos, mv("e2e4"));
        assert_eq!(pos.en_passant, Some(sq("e3")));
        assert_eq!(pos.piece_at(sq("e2")), None);
        assert_eq!(
            pos.piece_at(sq("e4")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(pos.halfmove_clock, 0);
        // The executor leaves turn bookkeeping to its caller.
        assert_eq!(pos.side_to_move, Color::White);
        assert_eq!(pos.fullmove_number, 1);
    }

    #[test]
    fn any_other_move_clears_en_passant_target() {
        let mut pos =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        apply_move(&mut pos, mv("g8f6"));
        assert_eq!(pos.en_passant, None);
        assert_eq!(pos.halfmove_clock, 1);
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let mut pos =
            Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 3 20").unwrap();
        let undo = make_move(&mut pos, mv("e5d6"));
        assert_eq!(pos.piece_at(sq("d5")), None);
        assert_eq!(
            pos.piece_at(sq("d6")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(undo.captured(), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(pos.halfmove_clock, 0);
    }

    #[test]
    fn castling_moves_the_rook() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 5 9").unwrap();
        apply_move(&mut pos, mv("e1g1"));
        assert_eq!(
            pos.piece_at(Square::F1),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(pos.piece_at(Square::H1), None);
        assert!(pos.castling.king_moved(Color::White));
        assert_eq!(pos.halfmove_clock, 6);

        apply_move(&mut pos, mv("e8c8"));
        assert_eq!(
            pos.piece_at(Square::D8),
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(pos.piece_at(Square::A8), None);
        assert_eq!(pos.to_fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 7 9");
    }

    #[test]
    fn rook_moves_and_captures_clear_rights() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        apply_move(&mut pos, mv("a1a8"));
        assert!(pos.castling.rook_moved(Color::White, CastleSide::Queenside));
        assert!(pos.castling.rook_moved(Color::Black, CastleSide::Queenside));
        assert!(!pos.castling.rook_moved(Color::White, CastleSide::Kingside));
        assert!(!pos.castling.king_moved(Color::Black));
        assert_eq!(pos.halfmove_clock, 0);
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let mut pos = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let m = Move::with_promotion(sq("a7"), sq("b8"), PieceKind::Knight);
        let undo = make_move(&mut pos, m);
        assert_eq!(
            pos.piece_at(sq("b8")),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
        unmake_move(&mut pos, m, undo);
        assert_eq!(pos.to_fen(), "1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn unmake_restores_every_field() {
        let fens = [
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 5 9",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 3 20",
        ];
        for fen in fens {
            let original = Position::from_fen(fen).unwrap();
            for m in crate::generate_legal_moves(&original, original.side_to_move).as_slice() {
                let mut pos = original.clone();
                let undo = make_move(&mut pos, *m);
                unmake_move(&mut pos, *m, undo);
                assert_eq!(pos, original, "{} did not round-trip", m);
            }
        }
    }
}
