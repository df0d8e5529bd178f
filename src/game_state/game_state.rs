//! Board plus side to move.
//!
//! `GameState` is the unit a session owns and the unit the synchronized store
//! carries. It only changes by applying one legal move, which produces a new
//! value; the old one is left untouched.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::variants::Variant;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::legality::is_legal;
use crate::utils::board_notation::board_from_rows;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    #[serde(rename = "turn")]
    pub side_to_move: Color,
}

impl Default for GameState {
    fn default() -> Self {
        Self::standard()
    }
}

impl GameState {
    #[inline]
    pub fn standard() -> Self {
        Self {
            board: Board::standard(),
            side_to_move: Color::Light,
        }
    }

    /// Fresh starting state for `variant`, Light to move.
    pub fn new<R: Rng + ?Sized>(variant: Variant, rng: &mut R) -> ChessResult<Self> {
        let board = match variant {
            Variant::Standard => Board::standard(),
            Variant::Randomized => Board::randomized(rng)?,
        };
        Ok(Self {
            board,
            side_to_move: Color::Light,
        })
    }

    /// Build a state from board rows (row 0 first) and the side to move.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], side_to_move: Color) -> ChessResult<Self> {
        Ok(Self {
            board: board_from_rows(rows)?,
            side_to_move,
        })
    }

    #[inline]
    pub fn is_legal(&self, mv: Move) -> bool {
        is_legal(&self.board, self.side_to_move, mv)
    }

    /// The state after `mv`, or `IllegalMove` with `self` unchanged.
    #[inline]
    pub fn apply(&self, mv: Move) -> ChessResult<GameState> {
        apply_move(self, mv)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        generate_legal_moves(&self.board, self.side_to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_types::{Color, Move};
    use crate::game_state::variants::Variant;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn new_game_starts_with_light() {
        let mut rng = StdRng::seed_from_u64(1);
        for variant in [Variant::Standard, Variant::Randomized] {
            let state = GameState::new(variant, &mut rng).expect("state should build");
            assert_eq!(state.side_to_move, Color::Light);
            assert!(!state.legal_moves().is_empty());
        }
        assert_eq!(GameState::standard().legal_moves().len(), 20);
    }

    #[test]
    fn serde_carries_rows_and_turn() {
        let state = GameState::standard()
            .apply(Move::from_coords(6, 4, 4, 4))
            .expect("e2e4 is legal");
        let json = serde_json::to_value(state).expect("state serializes");
        assert_eq!(json["turn"], "black");
        assert_eq!(json["board"][4], "....P...");
        let back: GameState = serde_json::from_value(json).expect("state deserializes");
        assert_eq!(back, state);
    }
}
