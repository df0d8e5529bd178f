//! Ray tracing for bishops, rooks and queens.
//!
//! A ray includes the first occupied square it meets and nothing beyond it.
//! Whether that square is a legal destination is decided by the caller from
//! the blocker's color.

use crate::game_state::chess_types::Square;

pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const BISHOP_RAYS: [u64; 64] = generate_rays(&BISHOP_DIRECTIONS);
pub const ROOK_RAYS: [u64; 64] = generate_rays(&ROOK_DIRECTIONS);

/// Bishop targets from `square`. The precomputed ray mask is the answer
/// whenever nothing stands on it.
#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    attacks_from_table(&BISHOP_RAYS, &BISHOP_DIRECTIONS, square, occupancy)
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    attacks_from_table(&ROOK_RAYS, &ROOK_DIRECTIONS, square, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

/// Left and right rays along the square's row.
#[inline]
pub fn horizontal_attacks(square: Square, occupancy: u64) -> u64 {
    trace_ray(square, 0, 1, occupancy) | trace_ray(square, 0, -1, occupancy)
}

fn attacks_from_table(
    rays: &[u64; 64],
    directions: &[(i32, i32); 4],
    square: Square,
    occupancy: u64,
) -> u64 {
    let full = rays[square.index()];
    if full & occupancy == 0 {
        return full;
    }
    directions
        .iter()
        .fold(0u64, |acc, (dr, dc)| acc | trace_ray(square, *dr, *dc, occupancy))
}

fn trace_ray(square: Square, row_step: i32, col_step: i32, occupancy: u64) -> u64 {
    let mut row = square.row as i32 + row_step;
    let mut col = square.col as i32 + col_step;
    let mut attacks = 0u64;

    while (0..8).contains(&row) && (0..8).contains(&col) {
        let bit = 1u64 << (row * 8 + col) as usize;
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        row += row_step;
        col += col_step;
    }

    attacks
}

const fn generate_rays(directions: &[(i32, i32); 4]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut rays = 0u64;
        let mut d = 0usize;

        while d < 4 {
            let (row_step, col_step) = directions[d];
            let mut row = (sq / 8) as i32 + row_step;
            let mut col = (sq % 8) as i32 + col_step;

            while row >= 0 && row < 8 && col >= 0 && col < 8 {
                rays |= 1u64 << (row as usize * 8 + col as usize);
                row += row_step;
                col += col_step;
            }
            d += 1;
        }

        table[sq] = rays;
        sq += 1;
    }

    table
}
