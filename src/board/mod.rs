//! Board representation for the 30x30 sequence game

pub mod bitboard;
pub mod board;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, WireError};

// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Board size (30x30)
pub const BOARD_SIZE: usize = 30;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 900

/// Player symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the other player
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    /// Parse a board character; anything other than `X`/`O` is an empty cell.
    #[inline]
    pub fn from_symbol(ch: char) -> Option<Player> {
        match ch {
            'X' | 'x' => Some(Player::X),
            'O' | 'o' => Some(Player::O),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Position on the board
///
/// Serialized as a `[row, col]` pair; displayed and parsed as `"row,col"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Checked constructor from signed coordinates.
    pub fn try_new(row: i32, col: i32) -> Result<Self, RulesError> {
        if Self::is_valid(row, col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(RulesError::OutOfBounds { row, col })
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Whether this position lies on the grid. Fields are public, so a
    /// hand-built `Pos` may not.
    #[inline]
    pub fn in_bounds(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// Step `k` cells along `(dr, dc)`. `None` when the target is off the board.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, k: i32) -> Option<Pos> {
        let r = self.row as i32 + dr * k;
        let c = self.col as i32 + dc * k;
        if Self::is_valid(r, c) {
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }

    /// Euclidean distance to the board centre (14.5, 14.5).
    pub fn center_distance(self) -> f64 {
        let mid = (BOARD_SIZE as f64 - 1.0) / 2.0;
        let dr = self.row as f64 - mid;
        let dc = self.col as f64 - mid;
        (dr * dr + dc * dc).sqrt()
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl TryFrom<(u8, u8)> for Pos {
    type Error = WireError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Pos::try_new(row as i32, col as i32)
            .map_err(|_| WireError::PositionKey(format!("{row},{col}")))
    }
}

impl From<Pos> for (u8, u8) {
    fn from(pos: Pos) -> Self {
        (pos.row, pos.col)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Pos {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || WireError::PositionKey(s.to_string());
        let (r, c) = s.split_once(',').ok_or_else(bad)?;
        let row: i32 = r.trim().parse().map_err(|_| bad())?;
        let col: i32 = c.trim().parse().map_err(|_| bad())?;
        Pos::try_new(row, col).map_err(|_| bad())
    }
}
