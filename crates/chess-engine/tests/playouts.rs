//! Property tests over random legal playouts.

use chess_core::Move;
use chess_engine::rules::{RuleSet, StandardChess};
use chess_engine::{
    evaluate, generate_moves, is_king_attacked, make_move, unmake_move, GameStatus, MoveKind,
    Position,
};
use proptest::prelude::*;

const START_FENS: [&str; 4] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
];

/// Plays the moves picked by `choices`, calling `visit` on every position
/// reached (including the first) together with the move that led to it.
fn playout(fen: &str, choices: &[usize], mut visit: impl FnMut(&Position, Option<Move>)) {
    let mut position = Position::from_fen(fen).unwrap();
    visit(&position, None);
    for &choice in choices {
        if evaluate(&position).is_terminal() {
            break;
        }
        let moves = generate_moves(&position);
        let m = moves[choice % moves.len()];
        position = StandardChess.make_move(&position, m);
        visit(&position, Some(m));
    }
}

fn playout_strategy() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (0..START_FENS.len(), prop::collection::vec(any::<usize>(), 0..40))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn legal_moves_never_leave_the_king_attacked((start, choices) in playout_strategy()) {
        playout(START_FENS[start], &choices, |position, _| {
            let side = position.side_to_move;
            for m in &generate_moves(position) {
                let mut after = position.clone();
                make_move(&mut after, *m);
                assert!(
                    !is_king_attacked(&after, side),
                    "{} leaves the king attacked in {}",
                    m,
                    position.to_fen()
                );
            }
        });
    }

    #[test]
    fn make_unmake_round_trips((start, choices) in playout_strategy()) {
        playout(START_FENS[start], &choices, |position, _| {
            for m in &generate_moves(position) {
                let mut scratch = position.clone();
                let undo = make_move(&mut scratch, *m);
                unmake_move(&mut scratch, *m, undo);
                assert_eq!(&scratch, position, "{} did not round-trip", m);
            }
        });
    }

    #[test]
    fn en_passant_lasts_one_ply((start, choices) in playout_strategy()) {
        let mut previous: Option<Position> = None;
        playout(START_FENS[start], &choices, |position, last| {
            if let (Some(before), Some(m)) = (&previous, last) {
                let double_push = before.classify(m) == MoveKind::DoublePush;
                assert_eq!(position.en_passant.is_some(), double_push);
            }

            for m in &generate_moves(position) {
                if position.classify(*m) != MoveKind::EnPassant {
                    continue;
                }
                // Only right after the opponent's double push past this pawn.
                assert_eq!(Some(m.to), position.en_passant);
                let pushed = last.expect("en passant needs a previous move");
                assert_eq!(pushed.to.rank(), m.from.rank());
                assert_eq!(pushed.to.file(), m.to.file());
            }
            previous = Some(position.clone());
        });
    }

    #[test]
    fn playouts_never_lose_a_king((start, choices) in playout_strategy()) {
        playout(START_FENS[start], &choices, |position, _| {
            assert!(!matches!(evaluate(position), GameStatus::NoKing { .. }));
        });
    }
}
