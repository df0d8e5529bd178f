//! Core value types shared by the board, the legality predicate and sessions.
//!
//! Rows run from 0 (Dark's back rank) to 7 (Light's back rank); columns run
//! from 0 (file `a`) to 7 (file `h`). Square indices are `row * 8 + col`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ChessError;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Side to move, and the color of a piece.
///
/// Serialized as `"white"` / `"black"`, the same words `Display` uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "white")]
    Light,
    #[serde(rename = "black")]
    Dark,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::Light, Color::Dark];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a single pawn step.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn pawn_home_row(self) -> u8 {
        match self {
            Color::Light => 6,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Light => write!(f, "white"),
            Color::Dark => write!(f, "black"),
        }
    }
}

impl FromStr for Color {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" | "white" | "w" => Ok(Color::Light),
            "dark" | "black" | "b" => Ok(Color::Dark),
            _ => Err(ChessError::InvalidNotation {
                message: format!("unknown color '{s}'"),
            }),
        }
    }
}

/// Piece kind (color is carried separately in [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Uppercase token letter.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Letter token: uppercase for Light, lowercase for Dark.
    pub fn to_token(self) -> char {
        match self.color {
            Color::Light => self.kind.letter(),
            Color::Dark => self.kind.letter().to_ascii_lowercase(),
        }
    }

    pub fn from_token(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Light
        } else if ch.is_ascii_lowercase() {
            Color::Dark
        } else {
            return None;
        };
        PieceKind::from_letter(ch).map(|kind| Piece { kind, color })
    }
}

/// Board coordinate. Values outside `0..8` are representable so callers can
/// hand raw input to the legality predicate, which rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row < 8 && self.col < 8
    }

    /// Row-major index `0..64`. Only meaningful for on-board squares.
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / 8) as u8,
            col: (index % 8) as u8,
        }
    }

    #[inline]
    pub const fn bit(self) -> u64 {
        1u64 << self.index()
    }

    /// The square `dr` rows and `dc` columns away, if it is on the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match square_to_algebraic(*self) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        algebraic_to_square(s)
    }
}

/// A single from/to move. Constructed, validated, applied, discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Build a move from a `(from_row, from_col, to_row, to_col)` quadruple.
    #[inline]
    pub const fn from_coords(from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> Self {
        Self {
            from: Square::new(from_row, from_col),
            to: Square::new(to_row, to_col),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return Err(ChessError::InvalidNotation {
                message: format!("invalid long algebraic move '{s}'"),
            });
        }
        Ok(Move::new(s[0..2].parse()?, s[2..4].parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_encode_color_by_case() {
        let light_knight = Piece::new(PieceKind::Knight, Color::Light);
        assert_eq!(light_knight.to_token(), 'N');
        assert_eq!(Piece::from_token('n'), Some(Piece::new(PieceKind::Knight, Color::Dark)));
        assert_eq!(Piece::from_token('.'), None);
        assert_eq!(Piece::from_token('x'), None);
    }

    #[test]
    fn offset_stays_on_board() {
        let a8 = Square::new(0, 0);
        assert_eq!(a8.offset(-1, 0), None);
        assert_eq!(a8.offset(1, 2), Some(Square::new(1, 2)));
        assert!(!Square::new(8, 0).is_on_board());
    }

    #[test]
    fn move_parses_long_algebraic() {
        let mv: Move = "e2e4".parse().expect("e2e4 should parse");
        assert_eq!(mv, Move::from_coords(6, 4, 4, 4));
        assert_eq!(mv.to_string(), "e2e4");
        assert!("e2e9".parse::<Move>().is_err());
        assert!("e2".parse::<Move>().is_err());
    }

    #[test]
    fn pawn_geometry_per_color() {
        assert_eq!(Color::Light.pawn_direction(), -1);
        assert_eq!(Color::Dark.pawn_home_row(), 1);
        assert_eq!(Color::Light.back_row(), 7);
        assert_eq!("black".parse::<Color>().expect("color should parse"), Color::Dark);
    }

    #[test]
    fn color_wire_form_matches_display() {
        for color in Color::BOTH {
            let json = serde_json::to_value(color).expect("color serializes");
            assert_eq!(json, color.to_string());
            let back: Color = serde_json::from_value(json).expect("color deserializes");
            assert_eq!(back, color);
        }
        assert!(serde_json::from_str::<Color>("\"light\"").is_err());
    }
}
