//! Canonical rule constants: the classic back rank and the limits used by
//! setup code.

use crate::game_state::chess_types::PieceKind;

/// Classic back rank order from file `a` to file `h`.
pub const STANDARD_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Shuffle budget for randomized back ranks. Roughly one shuffle in five is
/// valid, so hitting this cap means the validity check itself is broken.
pub const MAX_BACK_RANK_ATTEMPTS: u32 = 10_000;
