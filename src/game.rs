//! Match state
//!
//! A [`Match`] owns everything a running game needs: the board, whose turn
//! it is, credited sequences and cells, scores and the move history. Every
//! move goes through [`Match::make_move`], which scores it and merges the
//! result before the turn passes.

use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, Pos};
use crate::error::{ConfigError, GameError, RulesError, WireError};
use crate::opponent::Opponent;
use crate::rules::{check_win_conditions, Scores, Sequence, UsedPositions, SEQUENCE_LEN};
use crate::wire::{
    deserialize_used_positions, deserialize_used_sequences, serialize_used_positions,
    serialize_used_sequences, MatchSnapshot,
};

/// Lifecycle of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Waiting,
    Playing,
    Paused,
    Finished,
}

/// How a match ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Ends when the caller's clock runs out (or the grid fills up)
    #[default]
    Timed,
    /// Ends when every cell is taken
    FullGrid,
}

/// Match settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Clock for timed matches, in seconds
    pub time_limit_secs: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Timed,
            time_limit_secs: 600,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode == GameMode::Timed && self.time_limit_secs == 0 {
            return Err(ConfigError::Validation(
                "game.time_limit_secs must be > 0 for timed matches".to_string(),
            ));
        }
        Ok(())
    }
}

/// One applied move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub player: Player,
    pub pos: Pos,
    /// New sequences this move was credited with
    pub sequences_scored: usize,
}

/// Final standing of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub winner: Option<Player>,
    pub is_draw: bool,
    pub final_scores: Scores,
    pub total_moves: usize,
    pub used_sequences: Vec<Sequence>,
}

/// A single match between X and O. X always moves first.
#[derive(Debug, Clone)]
pub struct Match {
    board: Board,
    current_player: Player,
    status: GameStatus,
    config: GameConfig,
    scores: Scores,
    used_sequences: Vec<Sequence>,
    used_positions: UsedPositions,
    history: Vec<MoveRecord>,
}

impl Default for Match {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

impl Match {
    pub fn new(mode: GameMode) -> Self {
        Self::with_config(GameConfig {
            mode,
            ..GameConfig::default()
        })
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::Waiting,
            config,
            scores: Scores::default(),
            used_sequences: Vec::new(),
            used_positions: UsedPositions::new(),
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn used_sequences(&self) -> &[Sequence] {
        &self.used_sequences
    }

    pub fn used_positions(&self) -> &UsedPositions {
        &self.used_positions
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Clock the caller should run for a timed match.
    pub fn time_limit(&self) -> Option<Duration> {
        match self.config.mode {
            GameMode::Timed => Some(Duration::from_secs(self.config.time_limit_secs)),
            GameMode::FullGrid => None,
        }
    }

    /// Clear the board and start playing with X to move.
    pub fn start(&mut self) {
        *self = Self::with_config(self.config.clone());
        self.status = GameStatus::Playing;
        info!("match started ({:?})", self.config.mode);
    }

    /// Returns whether the match was playing.
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.status = GameStatus::Paused;
        true
    }

    /// Returns whether the match was paused.
    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Playing;
        true
    }

    /// Stop the match where it stands. Timed matches end here when the
    /// caller's clock runs out.
    pub fn end(&mut self) {
        if self.status == GameStatus::Finished {
            return;
        }
        self.status = GameStatus::Finished;
        info!(
            "match finished after {} moves: X={} O={}",
            self.history.len(),
            self.scores.x,
            self.scores.o
        );
    }

    /// Place the current player's mark at `pos`, score it and pass the turn.
    pub fn make_move(&mut self, pos: Pos) -> Result<MoveRecord, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::NotPlaying(self.status));
        }
        if !pos.in_bounds() {
            return Err(RulesError::OutOfBounds {
                row: pos.row as i32,
                col: pos.col as i32,
            }
            .into());
        }
        if !self.board.is_empty(pos) {
            return Err(GameError::Occupied(pos));
        }

        let player = self.current_player;
        self.board.place_stone(pos, player);
        let outcome = check_win_conditions(
            &self.board,
            player,
            pos,
            &self.used_sequences,
            self.scores,
            &self.used_positions,
        )?;

        let record = MoveRecord {
            player,
            pos,
            sequences_scored: outcome.new_sequences.len(),
        };
        self.scores = outcome.updated_scores;
        self.used_positions.extend(outcome.new_used_positions);
        self.used_sequences.extend(outcome.new_sequences);
        self.history.push(record);

        if self.board.is_full() {
            self.end();
        } else {
            self.current_player = player.opponent();
        }
        Ok(record)
    }

    /// Let `opponent` pick and play the current player's move.
    ///
    /// Returns `Ok(None)` and ends the match if no cell is left.
    pub fn play_opponent(&mut self, opponent: &Opponent) -> Result<Option<MoveRecord>, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::NotPlaying(self.status));
        }
        let choice = opponent.choose_move(&self.board, self.current_player, &self.used_sequences);
        match choice.best_move {
            Some(pos) => self.make_move(pos).map(Some),
            None => {
                self.end();
                Ok(None)
            }
        }
    }

    /// Player with the higher score; `None` on a tie.
    pub fn winner(&self) -> Option<Player> {
        self.scores.leader()
    }

    /// Finished with equal scores.
    pub fn is_draw(&self) -> bool {
        self.status == GameStatus::Finished && self.winner().is_none()
    }

    pub fn result(&self) -> GameResult {
        GameResult {
            winner: self.winner(),
            is_draw: self.is_draw(),
            final_scores: self.scores,
            total_moves: self.history.len(),
            used_sequences: self.used_sequences.clone(),
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            board: self.board.to_rows(),
            current_player: self.current_player,
            status: self.status,
            mode: self.config.mode,
            time_limit_secs: Some(self.config.time_limit_secs),
            scores: self.scores,
            used_sequences: serialize_used_sequences(&self.used_sequences),
            used_positions: serialize_used_positions(&self.used_positions),
            history: self.history.clone(),
        }
    }

    /// Rebuild a match from a snapshot. The board must agree with the
    /// move history, the player to move with its length, and every used
    /// sequence must sit on one player's marks.
    pub fn from_snapshot(snapshot: MatchSnapshot) -> Result<Match, WireError> {
        let board = Board::from_rows(&snapshot.board)?;
        for record in &snapshot.history {
            if board.get(record.pos) != Some(record.player) {
                return Err(WireError::BoardShape(format!(
                    "history move {} by {} is not on the board",
                    record.pos, record.player
                )));
            }
        }
        if board.stone_count() as usize != snapshot.history.len() {
            return Err(WireError::BoardShape(format!(
                "board has {} marks but history has {} moves",
                board.stone_count(),
                snapshot.history.len()
            )));
        }

        // A full board keeps the last mover; otherwise X moves on even turns
        let to_move = match snapshot.history.last() {
            Some(last) if board.is_full() => last.player,
            _ if snapshot.history.len() % 2 == 0 => Player::X,
            _ => Player::O,
        };
        if snapshot.current_player != to_move {
            return Err(WireError::BoardShape(format!(
                "{} to move after {} moves, expected {to_move}",
                snapshot.current_player,
                snapshot.history.len()
            )));
        }

        let used_sequences =
            deserialize_used_sequences(Some(snapshot.used_sequences.as_slice()))?;
        for seq in &used_sequences {
            let owner = seq.positions().first().and_then(|&p| board.get(p));
            let held = owner.is_some()
                && seq.len() >= SEQUENCE_LEN
                && seq.positions().iter().all(|&p| board.get(p) == owner);
            if !held {
                return Err(WireError::Sequence(format!(
                    "{seq} is not a run of one player's marks on the board"
                )));
            }
        }

        let defaults = GameConfig::default();
        Ok(Match {
            board,
            current_player: snapshot.current_player,
            status: snapshot.status,
            config: GameConfig {
                mode: snapshot.mode,
                time_limit_secs: snapshot.time_limit_secs.unwrap_or(defaults.time_limit_secs),
            },
            scores: snapshot.scores,
            used_sequences,
            used_positions: deserialize_used_positions(Some(snapshot.used_positions.as_slice()))?,
            history: snapshot.history,
        })
    }
}
