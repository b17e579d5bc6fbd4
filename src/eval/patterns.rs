//! Line weights for the opponent heuristic
//!
//! All weights are integers scaled so that half-steps in the tuning stay
//! exact. They only need to order candidate cells, not mean anything alone.

use crate::rules::LineShape;

/// Weighting constants for line shapes
pub struct LineWeight;

impl LineWeight {
    // Opponent threats (defence)
    /// Multiplier for a threat open at both ends
    pub const THREAT_OPEN_BOTH: i32 = 6;
    /// Multiplier for a threat open at one end
    pub const THREAT_OPEN_ONE: i32 = 4;
    /// Multiplier for a fully closed threat (still worth blocking)
    pub const THREAT_CLOSED: i32 = 2;
    /// Boost for lines of 4+ so they are always blocked first
    pub const LONG_BOOST: i32 = 5;
    /// Boost for lines of exactly 3
    pub const THREE_BOOST: i32 = 3;
    /// Boost for shorter lines
    pub const BASE_BOOST: i32 = 2;

    // Own lines (offence)
    /// Extra factor for own lines of 3+
    pub const OWN_FOUR_BOOST: i32 = 3;
    /// Bonus factor when two or more axes carry a line
    pub const FORK_BONUS: i32 = 10;

    /// Lines this long or longer count as a fork axis
    pub const FORK_AXIS_LEN: u32 = 3;
}

/// Value of blocking an opponent line of this shape.
///
/// Cubic in length so one long line outweighs several short ones.
pub fn threat_weight(shape: LineShape) -> i32 {
    let len = shape.length as i32;
    let ends = match shape.open_ends {
        2 => LineWeight::THREAT_OPEN_BOTH,
        1 => LineWeight::THREAT_OPEN_ONE,
        _ => LineWeight::THREAT_CLOSED,
    };
    let boost = match shape.length {
        0..=2 => LineWeight::BASE_BOOST,
        3 => LineWeight::THREE_BOOST,
        _ => LineWeight::LONG_BOOST,
    };
    len * len * len * ends * boost
}

/// Value of extending an own line of this shape. Dead lines are worth 0.
pub fn offense_weight(shape: LineShape) -> i32 {
    if shape.length == 0 || shape.open_ends == 0 {
        return 0;
    }
    let len = shape.length as i32;
    let ends = if shape.open_ends == 2 { 2 } else { 1 };
    let boost = if shape.length >= 3 {
        LineWeight::OWN_FOUR_BOOST
    } else {
        1
    };
    len * len * ends * boost
}

/// Value of the line a cell would join, counting the cell itself and scaled
/// by `2 + open_ends`. `exponent` is 2 for own lines, 3 for the opponent's.
pub fn potential_weight(shape: LineShape, exponent: u32) -> i32 {
    let len = shape.length as i32 + 1;
    if len < 2 {
        return 0;
    }
    len.pow(exponent) * (2 + shape.open_ends as i32)
}
