//! Scored sequences and their canonical form

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::line::Direction;
use crate::board::Pos;
use crate::error::WireError;

/// Minimum run length that scores
pub const SEQUENCE_LEN: usize = 5;

/// Cells already claimed by credited sequences
pub type UsedPositions = HashSet<Pos>;

/// A credited run of 5+ marks on one straight line.
///
/// Positions are always kept sorted by `(row, col)`, so equality and
/// hashing are by position set: a sequence recorded end-to-start compares
/// equal to the same cells recorded start-to-end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<Pos>", into = "Vec<Pos>")]
pub struct Sequence(Vec<Pos>);

impl Sequence {
    /// Canonicalize an arbitrary ordering of positions.
    pub fn from_positions<I: IntoIterator<Item = Pos>>(positions: I) -> Self {
        let mut cells: Vec<Pos> = positions.into_iter().collect();
        cells.sort_unstable();
        cells.dedup();
        Self(cells)
    }

    #[inline]
    pub fn positions(&self) -> &[Pos] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        self.0.binary_search(&pos).is_ok()
    }

    /// Axis the sequence lies on (`None` for fewer than two cells).
    pub fn direction(&self) -> Option<Direction> {
        match self.0.as_slice() {
            [first, second, ..] => Direction::between(*first, *second),
            _ => None,
        }
    }

    /// Whether `other` lies on the same line as `self` and shares a cell.
    pub fn overlaps_on_line(&self, other: &Sequence) -> bool {
        self.direction().is_some()
            && self.direction() == other.direction()
            && other.0.iter().any(|&p| self.contains(p))
    }

    /// Whether the cells form one contiguous straight run.
    pub fn is_straight(&self) -> bool {
        let Some(dir) = self.direction() else {
            return false;
        };
        let (dr, dc) = dir.delta();
        // Sorted order walks the axis in its positive sense
        self.0
            .windows(2)
            .all(|w| w[0].offset(dr, dc, 1) == Some(w[1]))
    }

    /// Stable string key, `"r,c|r,c|..."` in canonical order.
    pub fn canonical_key(&self) -> String {
        self.0
            .iter()
            .map(Pos::to_string)
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Parse a key produced by [`Sequence::canonical_key`] (any order).
    pub fn from_key(key: &str) -> Result<Self, WireError> {
        if key.is_empty() {
            return Ok(Self(Vec::new()));
        }
        let cells = key
            .split('|')
            .map(str::parse)
            .collect::<Result<Vec<Pos>, _>>()?;
        Ok(Self::from_positions(cells))
    }
}

impl From<Vec<Pos>> for Sequence {
    fn from(positions: Vec<Pos>) -> Self {
        Self::from_positions(positions)
    }
}

impl From<Sequence> for Vec<Pos> {
    fn from(seq: Sequence) -> Self {
        seq.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.canonical_key())
    }
}
