//! Square ownership lookups shared by legality and move application.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, Square};

/// Piece of `color` on `square`, if any.
#[inline]
pub fn piece_on_square_for_color(board: &Board, color: Color, square: Square) -> Option<Piece> {
    board.get(square).filter(|piece| piece.color == color)
}

#[inline]
pub fn enemy_piece_on(board: &Board, side: Color, square: Square) -> Option<Piece> {
    piece_on_square_for_color(board, side.opposite(), square)
}
