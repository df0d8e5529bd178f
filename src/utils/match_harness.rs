//! Head-to-head opponent harness for local testing.
//!
//! Runs two `Opponent` implementations against each other without a
//! session, from a seeded starting position of the chosen variant.

use rand::{rngs::StdRng, SeedableRng};
use std::time::Instant;

use crate::engines::engine_trait::Opponent;
use crate::errors::ChessResult;
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_state::GameState;
use crate::game_state::variants::Variant;
use crate::move_generation::legal_move_generator::has_legal_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The other side was left without a legal move.
    Win(Color),
    /// An opponent returned a move the legality predicate refused.
    Forfeit { offender: Color },
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub variant: Variant,
    pub max_plies: u16,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Standard,
            max_plies: 300,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub initial_state: GameState,
    pub final_state: GameState,
    pub moves: Vec<Move>,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

/// Play a single seeded match. `white` plays Light, `black` plays Dark.
pub fn play_match(
    white: &mut dyn Opponent,
    black: &mut dyn Opponent,
    seed: u64,
    config: &MatchConfig,
) -> ChessResult<MatchResult> {
    let mut rng = StdRng::seed_from_u64(seed);
    let initial_state = GameState::new(config.variant, &mut rng)?;
    Ok(play_match_from_state(white, black, initial_state, config.max_plies))
}

/// Play from a caller-provided position.
pub fn play_match_from_state(
    white: &mut dyn Opponent,
    black: &mut dyn Opponent,
    initial_state: GameState,
    max_plies: u16,
) -> MatchResult {
    white.new_game();
    black.new_game();

    let mut state = initial_state;
    let mut moves = Vec::new();
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;

    let outcome = loop {
        let mover = state.side_to_move;
        if !has_legal_moves(&state.board, mover) {
            break MatchOutcome::Win(mover.opposite());
        }
        if moves.len() >= usize::from(max_plies) {
            break MatchOutcome::DrawMaxPlies;
        }

        let started = Instant::now();
        let chosen = match mover {
            Color::Light => white.choose_move(&state),
            Color::Dark => black.choose_move(&state),
        };
        let elapsed_ns = started.elapsed().as_nanos();
        match mover {
            Color::Light => white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns),
            Color::Dark => black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns),
        }

        let Some(mv) = chosen else {
            break MatchOutcome::Win(mover.opposite());
        };
        match state.apply(mv) {
            Ok(next) => {
                state = next;
                moves.push(mv);
            }
            Err(_) => break MatchOutcome::Forfeit { offender: mover },
        }
    };

    MatchResult {
        outcome,
        initial_state,
        final_state: state,
        moves,
        white_total_time_ns,
        black_total_time_ns,
    }
}
