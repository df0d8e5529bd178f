//! Uniform random opponent.
//!
//! Picks uniformly among all legal moves. The difficulty tier is recorded
//! for display but does not influence the choice.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::engines::engine_trait::{Difficulty, Opponent};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::generate_legal_moves;

/// Uniformly random legal move for `side_to_move`, or `None` if there is none.
pub fn choose_move<R: Rng + ?Sized>(board: &Board, side_to_move: Color, rng: &mut R) -> Option<Move> {
    let legal_moves = generate_legal_moves(board, side_to_move);
    legal_moves.as_slice().choose(rng).copied()
}

pub struct RandomOpponent {
    rng: StdRng,
    difficulty: Difficulty,
}

impl RandomOpponent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            difficulty: Difficulty::default(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            difficulty: Difficulty::default(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for RandomOpponent {
    fn name(&self) -> &str {
        "Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        match name.to_ascii_lowercase().as_str() {
            "seed" => {
                let seed = value.trim().parse::<u64>().map_err(|_| ChessError::InvalidOption {
                    name: name.to_owned(),
                    value: value.to_owned(),
                })?;
                self.rng = StdRng::seed_from_u64(seed);
                Ok(())
            }
            "difficulty" => {
                self.difficulty = value.parse()?;
                Ok(())
            }
            _ => Err(ChessError::InvalidOption {
                name: name.to_owned(),
                value: value.to_owned(),
            }),
        }
    }

    fn choose_move(&mut self, game_state: &GameState) -> Option<Move> {
        let legal_moves = game_state.legal_moves();
        debug!(
            side = %game_state.side_to_move,
            legal_moves = legal_moves.len(),
            difficulty = %self.difficulty,
            "random opponent choosing"
        );
        legal_moves.as_slice().choose(&mut self.rng).copied()
    }
}
