//! Explicit game session.
//!
//! A `Session` owns one `GameState` and decides which actor may submit moves
//! for each color. Every move goes through the legality predicate before it
//! replaces the state. The built-in opponent's reply is deferred: submitting
//! a move only schedules it, and `tick` plays it once the thinking delay has
//! passed.

use std::fmt;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::engines::engine_random::RandomOpponent;
use crate::engines::engine_trait::Opponent;
use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::has_legal_moves;
use crate::session::session_config::{PlayMode, SessionConfig};

/// Input source allowed to move a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Controller {
    Local,
    Opponent,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: Color,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner {
            Color::Light => write!(f, "White Wins"),
            Color::Dark => write!(f, "Black Wins"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    GameOver,
    /// The submitting source does not control the side to move.
    NotYourTurn { expected: Controller },
    Illegal,
    /// Networked play before the second participant has joined.
    WaitingForOpponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied {
        mv: Move,
        outcome: Option<GameOutcome>,
    },
    /// Nothing changed.
    Rejected(RejectReason),
    /// A newer shared state won the race; the local move was dropped.
    Superseded,
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied { .. })
    }
}

pub struct Session {
    config: SessionConfig,
    state: GameState,
    controllers: [Controller; 2],
    opponent: Option<Box<dyn Opponent>>,
    rng: StdRng,
    opponent_due: Option<Instant>,
    outcome: Option<GameOutcome>,
    history: Vec<Move>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("controllers", &self.controllers)
            .field("opponent", &self.opponent.as_ref().map(|o| o.name().to_owned()))
            .field("opponent_due", &self.opponent_due)
            .field("outcome", &self.outcome)
            .field("history", &self.history)
            .finish()
    }
}

impl Session {
    /// Build the initial state for the configured variant and wire the
    /// controllers for the configured mode.
    pub fn new(config: SessionConfig) -> ChessResult<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let state = GameState::new(config.variant, &mut rng)?;
        Ok(Self::assemble(config, state, rng))
    }

    /// Resume from an existing state, e.g. one fetched from a shared room.
    pub fn from_state(config: SessionConfig, state: GameState) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::assemble(config, state, rng)
    }

    fn assemble(config: SessionConfig, state: GameState, mut rng: StdRng) -> Self {
        let local = config.local_side;
        let mut controllers = [Controller::Local; 2];
        let opponent: Option<Box<dyn Opponent>> = match config.mode {
            PlayMode::TwoSidesLocal => None,
            PlayMode::Solo => {
                controllers[local.opposite().index()] = Controller::Opponent;
                Some(Box::new(
                    RandomOpponent::seeded(rng.random()).with_difficulty(config.difficulty),
                ))
            }
            PlayMode::Networked => {
                controllers[local.opposite().index()] = Controller::Remote;
                None
            }
        };

        info!(
            variant = %config.variant,
            mode = %config.mode,
            local_side = %config.local_side,
            difficulty = %config.difficulty,
            "session created"
        );

        let mut session = Self {
            config,
            state,
            controllers,
            opponent,
            rng,
            opponent_due: None,
            outcome: None,
            history: Vec::new(),
        };
        session.settle(Instant::now());
        session
    }

    /// Swap the built-in opponent. Only meaningful in solo mode.
    pub fn with_opponent(mut self, opponent: Box<dyn Opponent>) -> Self {
        if self.opponent.is_some() {
            self.opponent = Some(opponent);
        }
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn controller(&self, color: Color) -> Controller {
        self.controllers[color.index()]
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Moves applied through this session, oldest first. Remote snapshots
    /// replace the state without adding entries.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.state.legal_moves()
    }

    /// When the scheduled opponent move becomes due, if one is pending.
    pub fn pending_opponent(&self) -> Option<Instant> {
        self.opponent_due
    }

    /// Try a move on behalf of `source`. Anything other than `Applied`
    /// leaves the session untouched.
    pub fn submit_move(&mut self, source: Controller, mv: Move) -> MoveOutcome {
        if self.outcome.is_some() {
            debug!(%mv, "move rejected: game over");
            return MoveOutcome::Rejected(RejectReason::GameOver);
        }

        let expected = self.controller(self.state.side_to_move);
        if source != expected {
            debug!(%mv, ?source, ?expected, "move rejected: not this source's turn");
            return MoveOutcome::Rejected(RejectReason::NotYourTurn { expected });
        }

        match self.state.apply(mv) {
            Ok(next) => self.commit(mv, next, Instant::now()),
            Err(_) => {
                debug!(%mv, side = %self.state.side_to_move, "move rejected: illegal");
                MoveOutcome::Rejected(RejectReason::Illegal)
            }
        }
    }

    /// Play the opponent's scheduled move if it is due at `now`.
    ///
    /// Returns the move played. If the opponent has no legal move the game
    /// ends with the other side as winner.
    pub fn tick(&mut self, now: Instant) -> Option<Move> {
        if self.outcome.is_some() {
            return None;
        }
        let due = self.opponent_due?;
        if now < due {
            return None;
        }
        self.opponent_due = None;

        let side = self.state.side_to_move;
        if self.controller(side) != Controller::Opponent {
            return None;
        }
        let opponent = self.opponent.as_mut()?;

        let Some(mv) = opponent.choose_move(&self.state) else {
            self.finish(side.opposite());
            return None;
        };

        match self.state.apply(mv) {
            Ok(next) => {
                self.commit(mv, next, now);
                Some(mv)
            }
            Err(err) => {
                warn!(%err, opponent = opponent.name(), "opponent produced an illegal move; forfeiting");
                self.finish(side.opposite());
                None
            }
        }
    }

    /// Discard the current game and start a fresh one with the same setup.
    pub fn reset(&mut self) -> ChessResult<()> {
        self.state = GameState::new(self.config.variant, &mut self.rng)?;
        self.history.clear();
        self.outcome = None;
        self.opponent_due = None;
        if let Some(opponent) = self.opponent.as_mut() {
            opponent.new_game();
        }
        info!(variant = %self.config.variant, "session reset");
        self.settle(Instant::now());
        Ok(())
    }

    /// Install an authoritative state from a remote peer.
    pub(crate) fn replace_state(&mut self, state: GameState) {
        self.state = state;
        self.opponent_due = None;
        self.outcome = None;
        self.settle(Instant::now());
    }

    /// Undo the most recent local move after the shared store refused it.
    pub(crate) fn revert_last(&mut self, previous: GameState) {
        self.history.pop();
        self.replace_state(previous);
    }

    fn commit(&mut self, mv: Move, next: GameState, now: Instant) -> MoveOutcome {
        debug!(%mv, side = %self.state.side_to_move, "move applied");
        self.state = next;
        self.history.push(mv);
        self.settle(now);
        MoveOutcome::Applied {
            mv,
            outcome: self.outcome,
        }
    }

    /// Evaluate the end-of-game rule and schedule the opponent if it is on
    /// move.
    fn settle(&mut self, now: Instant) {
        let side = self.state.side_to_move;
        if !has_legal_moves(&self.state.board, side) {
            self.finish(side.opposite());
            return;
        }
        if self.controller(side) == Controller::Opponent {
            self.opponent_due = Some(now + self.config.opponent_delay);
        }
    }

    fn finish(&mut self, winner: Color) {
        let outcome = GameOutcome { winner };
        info!(%outcome, plies = self.history.len(), "game over");
        self.outcome = Some(outcome);
        self.opponent_due = None;
    }
}

impl TryFrom<SessionConfig> for Session {
    type Error = ChessError;

    fn try_from(config: SessionConfig) -> Result<Self, Self::Error> {
        Session::new(config)
    }
}
