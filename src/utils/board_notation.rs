//! Board <-> token rows.
//!
//! A board is written as eight strings of eight characters, row 0 first.
//! Piece letters follow the token convention (uppercase Light, lowercase
//! Dark) and `.` marks an empty cell. This is the form rooms carry in the
//! synchronized store and the form tests use to build positions.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Square};

pub const EMPTY_CELL: char = '.';

pub fn board_to_rows(board: &Board) -> Vec<String> {
    (0..8)
        .map(|row| {
            board
                .row(row)
                .iter()
                .map(|cell| cell.map_or(EMPTY_CELL, Piece::to_token))
                .collect()
        })
        .collect()
}

pub fn board_from_rows<S: AsRef<str>>(rows: &[S]) -> ChessResult<Board> {
    if rows.len() != 8 {
        return Err(ChessError::InvalidBoard {
            message: format!("expected 8 rows, got {}", rows.len()),
        });
    }

    let mut board = Board::empty();
    for (row_idx, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let mut col = 0u8;

        for ch in row.chars() {
            if col >= 8 {
                return Err(ChessError::InvalidBoard {
                    message: format!("row {row_idx} has more than 8 cells: '{row}'"),
                });
            }

            let piece = if ch == EMPTY_CELL || ch == ' ' {
                None
            } else {
                Some(Piece::from_token(ch).ok_or_else(|| ChessError::InvalidBoard {
                    message: format!("invalid piece character '{ch}' in row {row_idx}"),
                })?)
            };

            board.set(Square::new(row_idx as u8, col), piece)?;
            col += 1;
        }

        if col != 8 {
            return Err(ChessError::InvalidBoard {
                message: format!("row {row_idx} has {col} cells, expected 8"),
            });
        }
    }

    Ok(board)
}
