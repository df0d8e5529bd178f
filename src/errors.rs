//! Error types for the rule engine and the synchronized session layer.
//!
//! Illegal moves inside a running session are reported as values
//! (`MoveOutcome::Rejected`), not through this type. `ChessError` covers
//! construction, parsing, configuration and store operations.

use thiserror::Error;

use crate::game_state::chess_types::{Move, Square};

/// Errors that can occur in the engine or while talking to a store.
#[derive(Error, Debug)]
pub enum ChessError {
    /// The move failed the legality predicate.
    #[error("Illegal move: {mv}")]
    IllegalMove { mv: Move },

    /// A square lies outside the 8x8 grid.
    #[error("Invalid square ({}, {})", .square.row, .square.col)]
    InvalidSquare { square: Square },

    /// Algebraic square or move text could not be parsed.
    #[error("Invalid notation: {message}")]
    InvalidNotation { message: String },

    /// A board row listing could not be parsed.
    #[error("Invalid board layout: {message}")]
    InvalidBoard { message: String },

    /// Rejection sampling for a randomized back rank hit its attempt cap.
    #[error("No valid back rank found after {attempts} shuffles")]
    BackRankExhausted { attempts: u32 },

    /// The requested room does not exist in the store.
    #[error("Room not found: {room}")]
    RoomNotFound { room: String },

    /// A room with the generated id already exists.
    #[error("Room already exists: {room}")]
    RoomExists { room: String },

    /// Two other participants already hold the room's colors.
    #[error("Room {room} already has two participants")]
    RoomFull { room: String },

    /// A publish carried a sequence number not newer than the stored one.
    #[error("Stale snapshot for room {room}: sequence {sequence} <= stored {stored}")]
    StaleSnapshot {
        room: String,
        sequence: u64,
        stored: u64,
    },

    /// The participant is not registered in the room.
    #[error("Participant {participant} is not registered in room {room}")]
    NotParticipant { participant: String, room: String },

    /// A configuration option name or value was not recognised.
    #[error("Invalid option {name}={value}")]
    InvalidOption { name: String, value: String },

    /// Room record (de)serialization failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for engine and session operations.
pub type ChessResult<T> = Result<T, ChessError>;
