//! King target masks.
//!
//! Adjacent steps come from a precomputed table. The same-row slide that
//! stands in for castling reuses the horizontal ray: every square strictly
//! between king and destination must be empty, which is exactly where a
//! horizontal ray stops.

use crate::game_state::chess_types::Square;
use crate::moves::sliding_moves::horizontal_attacks;

pub const KING_TARGETS: [u64; 64] = generate_king_targets();

#[inline]
pub const fn king_targets(square: Square) -> u64 {
    KING_TARGETS[square.index()]
}

/// Same-row destinations reachable by the simplified castling-like slide.
#[inline]
pub fn king_row_slide_targets(square: Square, occupancy: u64) -> u64 {
    horizontal_attacks(square, occupancy)
}

const fn generate_king_targets() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let col = (sq % 8) as i32;
        let row = (sq / 8) as i32;
        let mut targets = 0u64;

        targets |= set_if_valid(row - 1, col - 1);
        targets |= set_if_valid(row - 1, col);
        targets |= set_if_valid(row - 1, col + 1);
        targets |= set_if_valid(row, col - 1);
        targets |= set_if_valid(row, col + 1);
        targets |= set_if_valid(row + 1, col - 1);
        targets |= set_if_valid(row + 1, col);
        targets |= set_if_valid(row + 1, col + 1);

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

#[cfg(test)]
mod tests {
    use super::{king_row_slide_targets, king_targets, KING_TARGETS};
    use crate::game_state::chess_types::Square;

    #[test]
    fn king_in_corner_has_three_targets() {
        let a8 = Square::new(0, 0);
        assert_eq!(KING_TARGETS[a8.index()].count_ones(), 3);
        assert_eq!(king_targets(a8).count_ones(), 3);
    }

    #[test]
    fn row_slide_stops_at_first_occupied_square() {
        let e1 = Square::new(7, 4);
        let h1 = Square::new(7, 7);
        let b1 = Square::new(7, 1);
        let targets = king_row_slide_targets(e1, h1.bit() | b1.bit());

        assert_ne!(targets & h1.bit(), 0);
        assert_ne!(targets & b1.bit(), 0);
        assert_eq!(targets & Square::new(7, 0).bit(), 0);
        assert_eq!(targets & Square::new(6, 4).bit(), 0);
    }
}
