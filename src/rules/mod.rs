//! Game rules for the 30x30 sequence game
//!
//! This module implements the scoring rule set:
//! - Line scanning along the four axes
//! - Canonical sequences (order-independent identity)
//! - Move scoring (5+ in a row scores once per streak)

pub mod line;
pub mod score;
pub mod sequence;

// Re-exports for convenient access
pub use line::{measure_line, scan_line, Direction, LineShape, DIRECTIONS};
pub use score::{check_win_conditions, score_line, ScoreOutcome, Scores};
pub use sequence::{Sequence, UsedPositions, SEQUENCE_LEN};
