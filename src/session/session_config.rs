//! Session setup choices.
//!
//! Mirrors the options the setup screen offers: variant, play mode, timer,
//! opponent tier. Options can also be set by name, the way an engine option
//! surface takes them.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engines::engine_trait::Difficulty;
use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Color;
pub use crate::game_state::variants::Variant;

/// Who plays the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayMode {
    /// Local user against the built-in opponent.
    #[default]
    Solo,
    /// Both sides take input from the local UI.
    TwoSidesLocal,
    /// One side local, the other a remote peer through a shared store.
    Networked,
}

impl fmt::Display for PlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayMode::Solo => write!(f, "solo"),
            PlayMode::TwoSidesLocal => write!(f, "two-sides-local"),
            PlayMode::Networked => write!(f, "networked"),
        }
    }
}

impl FromStr for PlayMode {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solo" | "single" => Ok(PlayMode::Solo),
            "two-sides-local" | "local" | "hotseat" => Ok(PlayMode::TwoSidesLocal),
            "networked" | "multi" | "online" => Ok(PlayMode::Networked),
            _ => Err(ChessError::InvalidOption {
                name: "Mode".to_owned(),
                value: s.to_owned(),
            }),
        }
    }
}

/// Clock setting carried with a room. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimerMode {
    #[default]
    #[serde(rename = "timeless")]
    Timeless,
    #[serde(rename = "5min")]
    Blitz5,
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerMode::Timeless => write!(f, "timeless"),
            TimerMode::Blitz5 => write!(f, "5min"),
        }
    }
}

impl FromStr for TimerMode {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timeless" | "none" => Ok(TimerMode::Timeless),
            "5min" | "blitz" => Ok(TimerMode::Blitz5),
            _ => Err(ChessError::InvalidOption {
                name: "Timer".to_owned(),
                value: s.to_owned(),
            }),
        }
    }
}

pub const DEFAULT_OPPONENT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub variant: Variant,
    pub mode: PlayMode,
    /// Side the local user plays in solo and networked modes.
    pub local_side: Color,
    pub difficulty: Difficulty,
    pub timer: TimerMode,
    /// Simulated thinking time before the opponent moves.
    pub opponent_delay: Duration,
    /// Seeds board shuffling and the opponent. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Standard,
            mode: PlayMode::Solo,
            local_side: Color::Light,
            difficulty: Difficulty::default(),
            timer: TimerMode::Timeless,
            opponent_delay: DEFAULT_OPPONENT_DELAY,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_mode(mut self, mode: PlayMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_local_side(mut self, side: Color) -> Self {
        self.local_side = side;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_timer(mut self, timer: TimerMode) -> Self {
        self.timer = timer;
        self
    }

    pub fn with_opponent_delay(mut self, delay: Duration) -> Self {
        self.opponent_delay = delay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set one option by name. Names are case-insensitive.
    pub fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        let invalid = || ChessError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        };

        match name.to_ascii_lowercase().as_str() {
            "variant" => self.variant = value.parse()?,
            "mode" => self.mode = value.parse()?,
            "localside" | "local_side" => self.local_side = value.parse().map_err(|_| invalid())?,
            "difficulty" => self.difficulty = value.parse()?,
            "timer" => self.timer = value.parse()?,
            "opponentdelayms" | "opponent_delay_ms" => {
                let ms = value.trim().parse::<u64>().map_err(|_| invalid())?;
                self.opponent_delay = Duration::from_millis(ms);
            }
            "seed" => {
                self.seed = match value.trim() {
                    "" | "none" => None,
                    text => Some(text.parse::<u64>().map_err(|_| invalid())?),
                };
            }
            _ => return Err(invalid()),
        }
        Ok(())
    }
}
