//! Knight target masks.
//!
//! One precomputed mask per square, indexed by `Square::index`.

use crate::game_state::chess_types::Square;

pub const KNIGHT_TARGETS: [u64; 64] = generate_knight_targets();

#[inline]
pub const fn knight_targets(square: Square) -> u64 {
    KNIGHT_TARGETS[square.index()]
}

const fn generate_knight_targets() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let col = (sq % 8) as i32;
        let row = (sq / 8) as i32;
        let mut targets = 0u64;

        targets |= set_if_valid(row + 1, col + 2);
        targets |= set_if_valid(row + 1, col - 2);
        targets |= set_if_valid(row - 1, col + 2);
        targets |= set_if_valid(row - 1, col - 2);
        targets |= set_if_valid(row + 2, col + 1);
        targets |= set_if_valid(row + 2, col - 1);
        targets |= set_if_valid(row - 2, col + 1);
        targets |= set_if_valid(row - 2, col - 1);

        table[sq] = targets;
        sq += 1;
    }

    table
}

const fn set_if_valid(row: i32, col: i32) -> u64 {
    if row < 0 || row > 7 || col < 0 || col > 7 {
        return 0;
    }

    1u64 << ((row as usize) * 8 + (col as usize))
}
