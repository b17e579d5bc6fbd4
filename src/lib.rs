//! Move-sequence scoring engine for a 30x30 five-in-a-row game
//!
//! Two players, X and O, take turns marking cells. Every straight run of
//! five or more marks earns its owner one point, and the match goes on
//! after a score until the clock runs out or the grid is full:
//! - 30x30 board, X moves first
//! - A maximal run of 5+ scores once, however long it grows
//! - One move can score along several axes at once
//! - A credited run is never credited again
//!
//! # Architecture
//!
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Line scanning and sequence scoring
//! - [`eval`]: Cell evaluation for the computer opponent
//! - [`opponent`]: Priority-ladder computer opponent
//! - [`game`]: Match state machine
//! - [`wire`]: Serialized shapes for stored matches
//! - [`config`]: TOML configuration
//!
//! # Quick Start
//!
//! ```
//! use moooves::{GameMode, Match, Opponent, Pos};
//!
//! let mut game = Match::new(GameMode::FullGrid);
//! game.start();
//!
//! // X plays, then the computer answers as O
//! game.make_move(Pos::new(14, 14)).unwrap();
//! let reply = game.play_opponent(&Opponent::new()).unwrap();
//! assert!(reply.is_some());
//! assert_eq!(game.history().len(), 2);
//! ```
//!
//! # Scoring
//!
//! ```
//! use moooves::{score_line, Scores};
//!
//! // Two separate X streaks, one of them seven long
//! assert_eq!(score_line("XXXXXXXOXXXXX").unwrap(), Scores::new(2, 0));
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod opponent;
pub mod rules;
pub mod wire;

// Re-export commonly used types for convenience
pub use board::{Board, Player, Pos, BOARD_SIZE};
pub use config::AppConfig;
pub use error::{ConfigError, GameError, RulesError, WireError};
pub use game::{GameConfig, GameMode, GameResult, GameStatus, Match, MoveRecord};
pub use opponent::{mock_opponent_move, MoveKind, MoveResult, Opponent, OpponentConfig};
pub use rules::{check_win_conditions, scan_line, score_line, Scores, Sequence, UsedPositions};
pub use wire::MatchSnapshot;
