use tracing::trace;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::enemy_piece_on;
use crate::move_generation::legality::is_legal;

/// Apply `mv` to a copy of `game_state`.
///
/// The piece leaves the source, replaces whatever stood on the destination,
/// and the side to move flips. Illegal moves return `IllegalMove` and leave
/// nothing changed.
pub fn apply_move(game_state: &GameState, mv: Move) -> ChessResult<GameState> {
    if !is_legal(&game_state.board, game_state.side_to_move, mv) {
        return Err(ChessError::IllegalMove { mv });
    }

    let captured = enemy_piece_on(&game_state.board, game_state.side_to_move, mv.to);
    let mut next = *game_state;
    let moved = next.board.take(mv.from);
    next.board.set(mv.to, moved)?;
    next.side_to_move = game_state.side_to_move.opposite();

    trace!(%mv, ?moved, ?captured, "applied move");
    Ok(next)
}
