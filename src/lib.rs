//! Crate root module declarations for the Quantum Chess rule engine.
//!
//! Exposes the board model, the legality predicate, the random opponent and
//! the session layers (local and store-synchronized) under stable module
//! paths for the binary, tests and benches.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod variants;
}

pub mod moves {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legality;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod session {
    pub mod memory_store;
    pub mod networked;
    pub mod session;
    pub mod session_config;
    pub mod sync_store;
}

pub mod utils {
    pub mod algebraic;
    pub mod board_notation;
    pub mod match_harness;
    pub mod render_game_state;
    pub mod room_code;
}
