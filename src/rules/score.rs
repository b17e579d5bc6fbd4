//! Sequence scoring
//!
//! Scoring rules:
//! 1. A maximal straight run of 5 or more marks scores exactly one point,
//!    however long it is (a run of 7 is one event, not three 5-windows).
//! 2. A run already credited is never credited again, whatever order its
//!    cells were stored in and whichever end the new mark was placed at.
//! 3. Runs along different axes through the same mark score separately, so
//!    one move can earn several points.

use std::collections::HashSet;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::line::{scan_line, DIRECTIONS};
use super::sequence::{Sequence, UsedPositions, SEQUENCE_LEN};
use crate::board::{Board, Player, Pos};
use crate::error::{RulesError, WireError};

/// Per-player score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    #[serde(rename = "X")]
    pub x: u32,
    #[serde(rename = "O")]
    pub o: u32,
}

impl Scores {
    pub fn new(x: u32, o: u32) -> Self {
        Self { x, o }
    }

    #[inline]
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Add points for a player (saturating)
    #[inline]
    pub fn add(&mut self, player: Player, points: u32) {
        match player {
            Player::X => self.x = self.x.saturating_add(points),
            Player::O => self.o = self.o.saturating_add(points),
        }
    }

    pub fn total(&self) -> u32 {
        self.x + self.o
    }

    /// Player with the strictly higher score
    pub fn leader(&self) -> Option<Player> {
        match self.x.cmp(&self.o) {
            std::cmp::Ordering::Greater => Some(Player::X),
            std::cmp::Ordering::Less => Some(Player::O),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// What a single move earned
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoreOutcome {
    /// Newly credited sequences, canonical order
    pub new_sequences: Vec<Sequence>,
    /// `current_scores` plus one point per new sequence
    pub updated_scores: Scores,
    /// Cells of the new sequences
    pub new_used_positions: Vec<Pos>,
}

impl ScoreOutcome {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.new_sequences.is_empty()
    }
}

/// Score the mark `player` just placed at `pos`.
///
/// Scans the four axes through `pos`; every maximal run of 5+ that is not
/// already credited becomes one new sequence worth one point. A run is
/// treated as already credited when:
/// - its position set equals an entry of `used_sequences`, or
/// - it contains an entry of `used_sequences` lying on the same line (the
///   credited streak grew longer), or
/// - 5 or more consecutive cells of it are in `used_positions`.
///
/// Crossing a cell credited along another axis does not block a run.
///
/// # Errors
/// `OutOfBounds` if `pos` is off the board, `SymbolMismatch` if the cell
/// does not hold `player`.
pub fn check_win_conditions(
    board: &Board,
    player: Player,
    pos: Pos,
    used_sequences: &[Sequence],
    current_scores: Scores,
    used_positions: &UsedPositions,
) -> Result<ScoreOutcome, RulesError> {
    if !pos.in_bounds() {
        return Err(RulesError::OutOfBounds {
            row: pos.row as i32,
            col: pos.col as i32,
        });
    }
    let found = board.get(pos);
    if found != Some(player) {
        return Err(RulesError::SymbolMismatch {
            pos,
            expected: player,
            found,
        });
    }

    let used_keys: HashSet<&Sequence> = used_sequences.iter().collect();
    let mut outcome = ScoreOutcome {
        updated_scores: current_scores,
        ..ScoreOutcome::default()
    };

    for dir in DIRECTIONS {
        let run = scan_line(board, pos, player, dir);
        if run.len() < SEQUENCE_LEN {
            continue;
        }

        let candidate = Sequence::from_positions(run.iter().copied());
        if used_keys.contains(&candidate) {
            trace!("{dir:?} run {candidate} already credited");
            continue;
        }
        if used_sequences.iter().any(|u| candidate.overlaps_on_line(u)) {
            trace!("{dir:?} run {candidate} extends a credited streak");
            continue;
        }
        if has_claimed_streak(&run, used_positions) {
            trace!("{dir:?} run {candidate} covers claimed cells");
            continue;
        }

        outcome
            .new_used_positions
            .extend_from_slice(candidate.positions());
        outcome.new_sequences.push(candidate);
        outcome.updated_scores.add(player, 1);
    }

    if !outcome.is_empty() {
        debug!(
            "{player} at {pos} scored {} sequence(s), scores now X={} O={}",
            outcome.new_sequences.len(),
            outcome.updated_scores.x,
            outcome.updated_scores.o
        );
    }

    Ok(outcome)
}

/// Whether `SEQUENCE_LEN` consecutive cells of `run` are already claimed.
fn has_claimed_streak(run: &[Pos], used_positions: &UsedPositions) -> bool {
    if used_positions.is_empty() {
        return false;
    }
    let mut streak = 0;
    for p in run {
        if used_positions.contains(p) {
            streak += 1;
            if streak >= SEQUENCE_LEN {
                return true;
            }
        } else {
            streak = 0;
        }
    }
    false
}

/// Score a single line of marks as if each mark had been played in order.
///
/// `line` is laid out on row 0; `X`/`O` are marks, anything else is empty.
/// Each mark is fed through [`check_win_conditions`] left to right and the
/// results merged the way a game store merges them.
pub fn score_line(line: &str) -> Result<Scores, WireError> {
    let board = Board::from_rows(&[line])?;
    let mut scores = Scores::default();
    let mut used_sequences: Vec<Sequence> = Vec::new();
    let mut used_positions = UsedPositions::new();

    for (col, ch) in line.chars().enumerate() {
        let Some(player) = Player::from_symbol(ch) else {
            continue;
        };
        // Cells come straight from the parsed board, so the call cannot fail
        let Ok(outcome) = check_win_conditions(
            &board,
            player,
            Pos::new(0, col as u8),
            &used_sequences,
            scores,
            &used_positions,
        ) else {
            continue;
        };
        used_positions.extend(outcome.new_used_positions.iter().copied());
        used_sequences.extend(outcome.new_sequences);
        scores = outcome.updated_scores;
    }

    Ok(scores)
}
