//! Board structure

use std::fmt;

use super::bitboard::Bitboard;
use super::{Player, Pos, BOARD_SIZE, TOTAL_CELLS};
use crate::error::WireError;

/// Game board: one occupancy bitboard per player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// X marks
    pub x: Bitboard,
    /// O marks
    pub o: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            x: Bitboard::new(),
            o: Bitboard::new(),
        }
    }

    /// Get the mark at position; `None` off the board
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Player> {
        if !pos.in_bounds() {
            None
        } else if self.x.get(pos) {
            Some(Player::X)
        } else if self.o.get(pos) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Check if position is an empty cell. Off-board positions are not cells.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        pos.in_bounds() && !self.x.get(pos) && !self.o.get(pos)
    }

    /// Place a mark, overwriting whatever was there. Off-board positions
    /// are ignored.
    /// Game moves go through `Match::make_move`, which rejects occupied cells.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, player: Player) {
        if !pos.in_bounds() {
            return;
        }
        self.remove_stone(pos);
        match player {
            Player::X => self.x.set(pos),
            Player::O => self.o.set(pos),
        }
    }

    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.x.clear(pos);
        self.o.clear(pos);
    }

    /// Copy of this board with one extra mark, for what-if evaluation.
    pub fn with_stone(&self, pos: Pos, player: Player) -> Board {
        let mut next = self.clone();
        next.place_stone(pos, player);
        next
    }

    /// Total marks on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.x.count() + self.o.count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.x.is_empty() && self.o.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == TOTAL_CELLS
    }

    /// All empty cells in row-major order
    pub fn available_moves(&self) -> Vec<Pos> {
        let occupied = self.x.union(&self.o);
        (0..TOTAL_CELLS)
            .map(Pos::from_index)
            .filter(|&p| !occupied.get(p))
            .collect()
    }

    /// Whether any of the 8 neighbours holds a mark
    pub fn has_adjacent_stone(&self, pos: Pos) -> bool {
        for dr in -1i32..=1 {
            for dc in -1i32..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(n) = pos.offset(dr, dc, 1) {
                    if !self.is_empty(n) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Build a board from text rows, top row first. `X`/`O` are marks,
    /// any other character is empty. Missing rows and columns are empty.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Board, WireError> {
        if rows.len() > BOARD_SIZE {
            return Err(WireError::BoardShape(format!(
                "{} rows, at most {BOARD_SIZE} allowed",
                rows.len()
            )));
        }
        let mut board = Board::new();
        for (r, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let width = line.chars().count();
            if width > BOARD_SIZE {
                return Err(WireError::BoardShape(format!(
                    "row {r} has {width} cells, at most {BOARD_SIZE} allowed"
                )));
            }
            for (c, ch) in line.chars().enumerate() {
                if let Some(player) = Player::from_symbol(ch) {
                    board.place_stone(Pos::new(r as u8, c as u8), player);
                }
            }
        }
        Ok(board)
    }

    /// Text rows, `.` for empty cells
    pub fn to_rows(&self) -> Vec<String> {
        (0..BOARD_SIZE)
            .map(|r| {
                (0..BOARD_SIZE)
                    .map(|c| {
                        self.get(Pos::new(r as u8, c as u8))
                            .map_or('.', Player::symbol)
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..BOARD_SIZE {
            write!(f, "{:3}", c)?;
        }
        writeln!(f)?;
        for (r, row) in self.to_rows().iter().enumerate() {
            write!(f, "{:2} ", r)?;
            for ch in row.chars() {
                write!(f, "  {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
