//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and board
//! squares. Row 0 is rank 8 and row 7 is rank 1, so Light's pawns start on
//! rank 2 the way a reader expects.

use crate::errors::ChessError;
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessError> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidNotation {
            message: format!("invalid algebraic square '{square}'"),
        });
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::InvalidNotation {
            message: format!("invalid algebraic file '{}'", file as char),
        });
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidNotation {
            message: format!("invalid algebraic rank '{}'", rank as char),
        });
    }

    let col = file - b'a';
    let row = 7 - (rank - b'1');
    Ok(Square::new(row, col))
}

/// Convert an on-board square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, ChessError> {
    if !square.is_on_board() {
        return Err(ChessError::InvalidSquare { square });
    }

    let file_char = char::from(b'a' + square.col);
    let rank_char = char::from(b'8' - square.row);

    Ok(format!("{file_char}{rank_char}"))
}
