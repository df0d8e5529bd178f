//! Legal move enumeration.
//!
//! Walks every own piece and every destination square through the legality
//! predicate. Squares without an own piece can never be a legal source, so
//! this yields the same set as filtering all 8x8x8x8 quadruples.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move, Square};
use crate::move_generation::legality::is_legal;

/// Every legal move for `side_to_move`, ordered by source then destination
/// (row-major).
pub fn generate_legal_moves(board: &Board, side_to_move: Color) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    generate_legal_moves_in_place(board, side_to_move, &mut out);
    out
}

/// Like [`generate_legal_moves`], reusing the caller's buffer.
pub fn generate_legal_moves_in_place(board: &Board, side_to_move: Color, out: &mut Vec<Move>) {
    out.clear();
    for (from, _) in board.pieces(side_to_move) {
        for to in Square::all() {
            let mv = Move::new(from, to);
            if is_legal(board, side_to_move, mv) {
                out.push(mv);
            }
        }
    }
}

pub fn has_legal_moves(board: &Board, side_to_move: Color) -> bool {
    board.pieces(side_to_move).any(|(from, _)| {
        Square::all().any(|to| is_legal(board, side_to_move, Move::new(from, to)))
    })
}
