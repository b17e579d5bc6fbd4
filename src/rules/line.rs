//! Line scanning primitives
//!
//! Every rule in the game is phrased in terms of straight runs along one of
//! four axes. The scanner walks outward from a cell in both senses of an
//! axis and never steps off the 30x30 grid.

use crate::board::{Board, Player, Pos};

/// One of the four line axes. Each axis covers both senses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// (0, 1)
    Horizontal,
    /// (1, 0)
    Vertical,
    /// (1, 1)
    DiagonalDownRight,
    /// (1, -1)
    DiagonalDownLeft,
}

/// Direction vectors for line checking (4 directions)
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Horizontal,
    Direction::Vertical,
    Direction::DiagonalDownRight,
    Direction::DiagonalDownLeft,
];

impl Direction {
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalDownLeft => (1, -1),
        }
    }

    /// Axis joining two distinct cells, if they share one.
    pub fn between(a: Pos, b: Pos) -> Option<Direction> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let dr = hi.row as i32 - lo.row as i32;
        let dc = hi.col as i32 - lo.col as i32;
        match (dr, dc) {
            (0, 0) => None,
            (0, _) => Some(Direction::Horizontal),
            (_, 0) => Some(Direction::Vertical),
            _ if dr == dc => Some(Direction::DiagonalDownRight),
            _ if dr == -dc => Some(Direction::DiagonalDownLeft),
            _ => None,
        }
    }
}

/// Find the maximal contiguous run of `player` through `pos` along `dir`.
///
/// Extends in both senses, stopping at an empty cell, the other player's
/// mark or the board edge. Returned from the negative extreme to the
/// positive one. `pos` itself is always included; callers that require it
/// to hold `player` check that first.
pub fn scan_line(board: &Board, pos: Pos, player: Player, dir: Direction) -> Vec<Pos> {
    let (dr, dc) = dir.delta();
    let mut line = vec![pos];

    // Negative direction first
    let mut k = 1;
    while let Some(prev) = pos.offset(dr, dc, -k) {
        if board.get(prev) != Some(player) {
            break;
        }
        line.insert(0, prev);
        k += 1;
    }

    // Positive direction
    k = 1;
    while let Some(next) = pos.offset(dr, dc, k) {
        if board.get(next) != Some(player) {
            break;
        }
        line.push(next);
        k += 1;
    }

    line
}

/// Shape of the `player` line a mark at `pos` would join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineShape {
    /// Same-player marks adjacent on both sides (excluding `pos`)
    pub length: u32,
    /// Ends of that run which are on the board and empty (0-2)
    pub open_ends: u32,
}

/// Count `player` marks contiguous with `pos` on both sides along `dir`,
/// plus the open ends of that run. `pos` itself is not counted.
pub fn measure_line(board: &Board, player: Player, pos: Pos, dir: Direction) -> LineShape {
    let (dr, dc) = dir.delta();
    let mut shape = LineShape::default();

    for sign in [1, -1] {
        let mut k = 1;
        loop {
            match pos.offset(dr * sign, dc * sign, k) {
                Some(p) if board.get(p) == Some(player) => {
                    shape.length += 1;
                    k += 1;
                }
                Some(p) if board.is_empty(p) => {
                    shape.open_ends += 1;
                    break;
                }
                _ => break,
            }
        }
    }

    shape
}
