//! Cell evaluation for the opponent heuristic

pub mod heuristic;
pub mod patterns;

pub use heuristic::{
    center_bonus, fork_potential, self_strategic_score, strategic_score, threat_block_score,
};
pub use patterns::LineWeight;
