//! Simplified move legality.
//!
//! Geometry only: there is no check detection, no en-passant, no promotion
//! and no castling-rights tracking. The king's same-row slide is accepted
//! whenever the squares strictly between are empty.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move, PieceKind};
use crate::move_generation::legal_move_shared::piece_on_square_for_color;
use crate::moves::king_moves::{king_row_slide_targets, king_targets};
use crate::moves::knight_moves::knight_targets;
use crate::moves::pawn_moves::{pawn_captures, pawn_push_targets};
use crate::moves::sliding_moves::{bishop_attacks, queen_attacks, rook_attacks};

/// Can the piece on `mv.from` move to `mv.to` with `side_to_move` to play?
///
/// Checks run in order and stop at the first failure: the source holds a
/// piece, it belongs to `side_to_move`, the destination is empty or holds an
/// enemy piece, and the destination fits the piece's movement pattern.
pub fn is_legal(board: &Board, side_to_move: Color, mv: Move) -> bool {
    if !mv.from.is_on_board() || !mv.to.is_on_board() {
        return false;
    }

    let Some(piece) = board.get(mv.from) else {
        return false;
    };
    if piece.color != side_to_move {
        return false;
    }
    if piece_on_square_for_color(board, side_to_move, mv.to).is_some() {
        return false;
    }

    let occupancy = board.occupancy();
    let to_bit = mv.to.bit();
    let targets = match piece.kind {
        PieceKind::Pawn => {
            pawn_push_targets(piece.color, mv.from, occupancy)
                | (pawn_captures(piece.color, mv.from) & occupancy)
        }
        PieceKind::Knight => knight_targets(mv.from),
        PieceKind::Bishop => bishop_attacks(mv.from, occupancy),
        PieceKind::Rook => rook_attacks(mv.from, occupancy),
        PieceKind::Queen => queen_attacks(mv.from, occupancy),
        PieceKind::King => king_targets(mv.from) | king_row_slide_targets(mv.from, occupancy),
    };

    targets & to_bit != 0
}

#[cfg(test)]
mod tests {
    use super::is_legal;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, Move, Piece, PieceKind, Square};
    use crate::utils::board_notation::board_from_rows;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn board(rows: [&str; 8]) -> Board {
        board_from_rows(&rows).expect("test board should parse")
    }

    #[test]
    fn opening_moves_on_standard_board() {
        let b = Board::standard();
        assert!(is_legal(&b, Color::Light, Move::from_coords(6, 4, 4, 4)));
        assert!(is_legal(&b, Color::Light, Move::from_coords(6, 4, 5, 4)));
        assert!(!is_legal(&b, Color::Light, Move::from_coords(6, 4, 3, 4)));
        assert!(is_legal(&b, Color::Light, Move::from_coords(7, 1, 5, 2)));
        assert!(is_legal(&b, Color::Dark, Move::from_coords(1, 4, 3, 4)));
    }

    #[test]
    fn wrong_side_and_empty_source_are_illegal() {
        let b = Board::standard();
        assert!(!is_legal(&b, Color::Dark, Move::from_coords(6, 4, 4, 4)));
        assert!(!is_legal(&b, Color::Light, Move::from_coords(4, 4, 3, 4)));
        assert!(!is_legal(&b, Color::Light, Move::from_coords(6, 4, 9, 4)));
    }

    #[test]
    fn own_capture_is_illegal() {
        let b = Board::standard();
        assert!(!is_legal(&b, Color::Light, Move::from_coords(7, 0, 6, 0)));
        assert!(!is_legal(&b, Color::Light, Move::from_coords(7, 1, 6, 3)));
    }

    #[test]
    fn pawn_double_step_needs_clear_path() {
        let b = board([
            "....k...",
            "........",
            "........",
            "........",
            "....n...",
            "...p....",
            "...PP...",
            "....K...",
        ]);
        // e-pawn: destination occupied.
        assert!(!is_legal(&b, Color::Light, Move::from_coords(6, 4, 4, 4)));
        assert!(is_legal(&b, Color::Light, Move::from_coords(6, 4, 5, 4)));
        // d-pawn: intermediate occupied.
        assert!(!is_legal(&b, Color::Light, Move::from_coords(6, 3, 4, 3)));
        assert!(!is_legal(&b, Color::Light, Move::from_coords(6, 3, 5, 3)));
    }

    #[test]
    fn pawn_diagonal_needs_enemy() {
        let b = board([
            "....k...",
            "........",
            "........",
            "........",
            "........",
            "...p....",
            "....P...",
            "....K...",
        ]);
        assert!(is_legal(&b, Color::Light, Move::from_coords(6, 4, 5, 3)));
        assert!(!is_legal(&b, Color::Light, Move::from_coords(6, 4, 5, 5)));
        // Backwards diagonal never.
        assert!(!is_legal(&b, Color::Dark, Move::from_coords(5, 3, 4, 4)));
        assert!(is_legal(&b, Color::Dark, Move::from_coords(5, 3, 6, 4)));
    }

    #[test]
    fn dark_pawn_only_double_steps_from_home_row() {
        let b = board([
            "....k...",
            "p.......",
            "........",
            ".p......",
            "........",
            "........",
            "........",
            "....K...",
        ]);
        assert!(is_legal(&b, Color::Dark, Move::from_coords(1, 0, 3, 0)));
        assert!(!is_legal(&b, Color::Dark, Move::from_coords(3, 1, 5, 1)));
    }

    #[test]
    fn sliders_stop_at_first_blocker() {
        let b = board([
            "....k...",
            "........",
            "........",
            "R..p...r",
            "........",
            "..B.....",
            "........",
            "....K..Q",
        ]);
        // Rook captures the first enemy but not past it.
        assert!(is_legal(&b, Color::Light, Move::from_coords(3, 0, 3, 3)));
        assert!(!is_legal(&b, Color::Light, Move::from_coords(3, 0, 3, 5)));
        // Bishop diagonals.
        assert!(is_legal(&b, Color::Light, Move::from_coords(5, 2, 1, 6)));
        assert!(!is_legal(&b, Color::Light, Move::from_coords(5, 2, 5, 4)));
        // Queen slides vertically up to the rook and no further.
        assert!(is_legal(&b, Color::Light, Move::from_coords(7, 7, 3, 7)));
        assert!(!is_legal(&b, Color::Light, Move::from_coords(7, 7, 2, 7)));
    }

    #[test]
    fn king_row_slide_needs_empty_between() {
        let b = board([
            "....k...",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "R...K..R",
        ]);
        assert!(is_legal(&b, Color::Light, Move::from_coords(7, 4, 7, 6)));
        assert!(is_legal(&b, Color::Light, Move::from_coords(7, 4, 7, 1)));
        // Own rook on the destination.
        assert!(!is_legal(&b, Color::Light, Move::from_coords(7, 4, 7, 7)));
        // Two rows up is not a king move.
        assert!(!is_legal(&b, Color::Light, Move::from_coords(7, 4, 5, 4)));

        let blocked = board([
            "....k...",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "R.N.K.nR",
        ]);
        assert!(!is_legal(&blocked, Color::Light, Move::from_coords(7, 4, 7, 1)));
        assert!(is_legal(&blocked, Color::Light, Move::from_coords(7, 4, 7, 6)));
        assert!(!is_legal(&blocked, Color::Light, Move::from_coords(7, 4, 7, 7)));
    }

    proptest! {
        #[test]
        fn staying_put_is_never_legal(
            seed in any::<u64>(),
            row in 0u8..8,
            col in 0u8..8,
            light in any::<bool>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let b = Board::randomized(&mut rng).expect("randomized board should build");
            let side = if light { Color::Light } else { Color::Dark };
            let sq = Square::new(row, col);
            prop_assert!(!is_legal(&b, side, Move::new(sq, sq)));
        }

        #[test]
        fn rook_never_passes_a_blocker(
            (blocker_col, beyond) in (1u8..7).prop_flat_map(|b| (Just(b), (b + 1)..8u8)),
            enemy in any::<bool>(),
        ) {
            let mut b = Board::empty();
            let rook = Square::new(4, 0);
            let blocker = Square::new(4, blocker_col);
            let blocker_color = if enemy { Color::Dark } else { Color::Light };
            b.set(rook, Some(Piece::new(PieceKind::Rook, Color::Light))).expect("on board");
            b.set(blocker, Some(Piece::new(PieceKind::Knight, blocker_color))).expect("on board");
            prop_assert!(!is_legal(&b, Color::Light, Move::new(rook, Square::new(4, beyond))));
        }
    }
}
