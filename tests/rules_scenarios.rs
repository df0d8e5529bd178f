use quantum_chess::engines::engine_random::choose_move;
use quantum_chess::game_state::board::Board;
use quantum_chess::game_state::chess_types::{Color, Move, Piece, PieceKind, Square};
use quantum_chess::game_state::game_state::GameState;
use quantum_chess::move_generation::legality::is_legal;
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn opening_legality_on_standard_board() {
    let state = GameState::standard();
    assert_eq!(state.side_to_move, Color::Light);
    assert!(is_legal(&state.board, Color::Light, Move::from_coords(6, 4, 4, 4)));
    assert!(!is_legal(&state.board, Color::Light, Move::from_coords(6, 4, 3, 4)));
    assert!(is_legal(&state.board, Color::Light, Move::from_coords(7, 1, 5, 2)));
}

#[test]
fn two_pawn_moves_hand_the_turn_back() {
    let start = GameState::standard();
    let after = start
        .apply(Move::from_coords(6, 4, 4, 4))
        .and_then(|state| state.apply(Move::from_coords(1, 4, 3, 4)))
        .expect("both pawn moves are legal");

    assert_eq!(after.side_to_move, Color::Light);
    assert!(after.board.is_empty(Square::new(6, 4)));
    assert!(after.board.is_empty(Square::new(1, 4)));
    assert_eq!(
        after.board.get(Square::new(4, 4)),
        Some(Piece::new(PieceKind::Pawn, Color::Light))
    );
    assert_eq!(
        after.board.get(Square::new(3, 4)),
        Some(Piece::new(PieceKind::Pawn, Color::Dark))
    );
    // The starting value is untouched.
    assert_eq!(start, GameState::standard());
}

#[test]
fn moves_parse_from_algebraic_text() {
    let mv: Move = "e2e4".parse().expect("e2e4 parses");
    assert_eq!(mv, Move::from_coords(6, 4, 4, 4));
    assert_eq!(Move::from_coords(7, 1, 5, 2).to_string(), "b1c3");
    assert!("e2e9".parse::<Move>().is_err());
}

#[test]
fn illegal_apply_reports_the_move() {
    let err = GameState::standard()
        .apply(Move::from_coords(6, 4, 3, 4))
        .expect_err("three-square pawn push is illegal");
    assert_eq!(err.to_string(), "Illegal move: e2e5");
}

#[test]
fn single_legal_move_is_always_chosen() {
    let state = GameState::from_rows(
        &[
            "KP......",
            "P.......",
            "........",
            "........",
            "........",
            "........",
            "........",
            ".......k",
        ],
        Color::Light,
    )
    .expect("rows parse");
    let only = state.legal_moves();
    assert_eq!(only, vec![Move::from_coords(0, 0, 1, 1)]);

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        assert_eq!(choose_move(&state.board, Color::Light, &mut rng), Some(only[0]));
    }
    assert_eq!(choose_move(&Board::empty(), Color::Light, &mut rng), None);
}
