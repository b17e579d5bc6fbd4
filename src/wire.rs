//! Persisted shapes
//!
//! Credited cells and sequences are stored as `"row,col"` strings so that a
//! stored match reads the same as the keys used in logs. Missing lists
//! (`None`) load as empty.

use serde::{Deserialize, Serialize};

use crate::board::{Player, Pos};
use crate::error::WireError;
use crate::game::{GameMode, GameStatus, MoveRecord};
use crate::rules::{Scores, Sequence, UsedPositions};

/// JSON snapshot of a [`Match`](crate::game::Match).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    /// Board rows, top first; `X`, `O`, `.` for empty
    pub board: Vec<String>,
    pub current_player: Player,
    pub status: GameStatus,
    pub mode: GameMode,
    /// Clock for timed matches; older snapshots omit it
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
    pub scores: Scores,
    #[serde(default)]
    pub used_sequences: Vec<Vec<String>>,
    #[serde(default)]
    pub used_positions: Vec<String>,
    #[serde(default)]
    pub history: Vec<MoveRecord>,
}

/// Credited cells as sorted `"row,col"` keys.
pub fn serialize_used_positions(used: &UsedPositions) -> Vec<String> {
    let mut cells: Vec<Pos> = used.iter().copied().collect();
    cells.sort_unstable();
    cells.iter().map(Pos::to_string).collect()
}

pub fn deserialize_used_positions(keys: Option<&[String]>) -> Result<UsedPositions, WireError> {
    keys.unwrap_or_default()
        .iter()
        .map(|key| key.parse::<Pos>())
        .collect()
}

/// Each sequence as its `"row,col"` keys, in canonical order.
pub fn serialize_used_sequences(sequences: &[Sequence]) -> Vec<Vec<String>> {
    sequences
        .iter()
        .map(|seq| seq.positions().iter().map(Pos::to_string).collect())
        .collect()
}

/// Parse stored sequences; cells may be in any order but must form one
/// straight, gap-free line.
pub fn deserialize_used_sequences(lists: Option<&[Vec<String>]>) -> Result<Vec<Sequence>, WireError> {
    lists
        .unwrap_or_default()
        .iter()
        .map(|keys| {
            let cells = keys
                .iter()
                .map(|key| key.parse::<Pos>())
                .collect::<Result<Vec<_>, _>>()?;
            let seq = Sequence::from_positions(cells);
            if !seq.is_straight() {
                return Err(WireError::Sequence(format!(
                    "{seq} is not a straight line"
                )));
            }
            Ok(seq)
        })
        .collect()
}
