//! Pawn capture masks and push targets.
//!
//! Light pawns advance toward row 0, Dark pawns toward row 7.

use crate::game_state::chess_types::{Color, Square};

pub const LIGHT_PAWN_CAPTURES: [u64; 64] = generate_pawn_captures(-1);
pub const DARK_PAWN_CAPTURES: [u64; 64] = generate_pawn_captures(1);

/// Diagonal-forward squares a pawn of `color` on `square` may capture on.
#[inline]
pub const fn pawn_captures(color: Color, square: Square) -> u64 {
    match color {
        Color::Light => LIGHT_PAWN_CAPTURES[square.index()],
        Color::Dark => DARK_PAWN_CAPTURES[square.index()],
    }
}

/// Forward destinations for a pawn: one step onto an empty square, and two
/// steps from the home row when both squares are empty.
pub fn pawn_push_targets(color: Color, square: Square, occupancy: u64) -> u64 {
    let dir = color.pawn_direction();
    let Some(one) = square.offset(dir, 0) else {
        return 0;
    };
    if occupancy & one.bit() != 0 {
        return 0;
    }

    let mut targets = one.bit();
    if square.row == color.pawn_home_row() {
        if let Some(two) = one.offset(dir, 0) {
            if occupancy & two.bit() == 0 {
                targets |= two.bit();
            }
        }
    }
    targets
}

const fn generate_pawn_captures(row_step: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let col = (sq % 8) as i32;
        let row = (sq / 8) as i32 + row_step;
        let mut targets = 0u64;

        if row >= 0 && row < 8 {
            if col > 0 {
                targets |= 1u64 << (row as usize * 8 + (col - 1) as usize);
            }
            if col < 7 {
                targets |= 1u64 << (row as usize * 8 + (col + 1) as usize);
            }
        }

        table[sq] = targets;
        sq += 1;
    }

    table
}
