//! Starting-position variants and randomized back-rank generation.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{MAX_BACK_RANK_ATTEMPTS, STANDARD_BACK_RANK};
use crate::game_state::chess_types::PieceKind;

/// Which initializer builds the starting board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variant {
    #[default]
    #[serde(rename = "standard")]
    Standard,
    /// Chess960-style shuffled back rank.
    #[serde(rename = "960")]
    Randomized,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Standard => write!(f, "standard"),
            Variant::Randomized => write!(f, "960"),
        }
    }
}

impl FromStr for Variant {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "classic" => Ok(Variant::Standard),
            "960" | "chess960" | "randomized" => Ok(Variant::Randomized),
            _ => Err(ChessError::InvalidOption {
                name: "Variant".to_owned(),
                value: s.to_owned(),
            }),
        }
    }
}

/// The eight non-pawn pieces of a back rank, file `a` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackRank([PieceKind; 8]);

impl BackRank {
    pub const STANDARD: BackRank = BackRank(STANDARD_BACK_RANK);

    /// Wrap an arbitrary arrangement. Use [`BackRank::is_valid`] to check it.
    pub const fn new(pieces: [PieceKind; 8]) -> Self {
        Self(pieces)
    }

    pub fn pieces(&self) -> &[PieceKind; 8] {
        &self.0
    }

    /// Shuffle until both placement constraints hold.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> ChessResult<Self> {
        let mut pieces = STANDARD_BACK_RANK;
        for _ in 0..MAX_BACK_RANK_ATTEMPTS {
            pieces.shuffle(rng);
            let candidate = BackRank(pieces);
            if candidate.is_valid() {
                return Ok(candidate);
            }
        }
        Err(ChessError::BackRankExhausted {
            attempts: MAX_BACK_RANK_ATTEMPTS,
        })
    }

    /// Piece counts match the standard set, the bishops stand on opposite
    /// column parity, and the king stands strictly between the rooks.
    pub fn is_valid(&self) -> bool {
        let count = |kind: PieceKind| self.0.iter().filter(|p| **p == kind).count();
        if count(PieceKind::Rook) != 2
            || count(PieceKind::Knight) != 2
            || count(PieceKind::Bishop) != 2
            || count(PieceKind::Queen) != 1
            || count(PieceKind::King) != 1
        {
            return false;
        }

        let bishops = self.columns_of(PieceKind::Bishop);
        if bishops[0] % 2 == bishops[1] % 2 {
            return false;
        }

        let rooks = self.columns_of(PieceKind::Rook);
        let king = self.columns_of(PieceKind::King)[0];
        rooks[0] < king && king < rooks[1]
    }

    fn columns_of(&self, kind: PieceKind) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == kind)
            .map(|(col, _)| col)
            .collect()
    }
}

impl fmt::Display for BackRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kind in self.0 {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}
