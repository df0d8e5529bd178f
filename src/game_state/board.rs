//! 8x8 piece grid.
//!
//! `Board` is a plain value: the standard and randomized layouts are built
//! here, and move application clones and edits a copy. On the wire it is
//! carried as eight token rows (see `utils::board_notation`).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::game_state::variants::BackRank;
use crate::utils::board_notation::{board_from_rows, board_to_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// Classic starting layout.
    pub fn standard() -> Self {
        Self::from_back_rank(&BackRank::STANDARD)
    }

    /// Starting layout with a random back rank, mirrored for both colors.
    pub fn randomized<R: Rng + ?Sized>(rng: &mut R) -> ChessResult<Self> {
        let back_rank = BackRank::random(rng)?;
        Ok(Self::from_back_rank(&back_rank))
    }

    /// Place `back_rank` on both back rows, fill both pawn rows, leave the
    /// middle four rows empty.
    pub fn from_back_rank(back_rank: &BackRank) -> Self {
        let mut board = Self::empty();
        for color in Color::BOTH {
            for (col, kind) in back_rank.pieces().iter().enumerate() {
                board.cells[color.back_row() as usize][col] = Some(Piece::new(*kind, color));
                board.cells[color.pawn_home_row() as usize][col] =
                    Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Piece on `square`; `None` for empty or off-board squares.
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        if !square.is_on_board() {
            return None;
        }
        self.cells[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> ChessResult<()> {
        if !square.is_on_board() {
            return Err(ChessError::InvalidSquare { square });
        }
        self.cells[square.row as usize][square.col as usize] = piece;
        Ok(())
    }

    /// Remove and return the piece on `square`.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        if !square.is_on_board() {
            return None;
        }
        self.cells[square.row as usize][square.col as usize].take()
    }

    pub fn row(&self, row: usize) -> &[Option<Piece>; 8] {
        &self.cells[row]
    }

    /// All pieces of `color` with their squares, row-major.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| {
            self.get(sq)
                .filter(|piece| piece.color == color)
                .map(|piece| (sq, piece))
        })
    }

    /// Bitmask of occupied squares, indexed by `Square::index`.
    pub fn occupancy(&self) -> u64 {
        Square::all()
            .filter(|sq| !self.is_empty(*sq))
            .fold(0u64, |acc, sq| acc | sq.bit())
    }

    /// Kings of `color`. Legal play does not enforce exactly one.
    pub fn king_count(&self, color: Color) -> usize {
        self.pieces(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .count()
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board_to_rows(&board)
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = ChessError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        board_from_rows(&rows)
    }
}
