//! Computer opponent
//!
//! The opponent picks a cell with a fixed priority ladder. The first rung
//! that produces a move wins:
//!
//! 1. **Immediate win**: a cell that completes a new sequence for us
//! 2. **Block**: a cell that would complete a new sequence for the opponent
//! 3. **Threat block**: cut the strongest emerging opponent line
//! 4. **Fork**: a cell that opens two or more of our lines at once
//! 5. **Strategic**: best combined line value plus centre bonus
//! 6. **Nearby**: a cell touching existing marks
//! 7. **Fallback**: the empty cell closest to the centre
//!
//! Every rung is deterministic: ties go to the earliest cell in row-major
//! order, so the same board always gets the same answer.
//!
//! # Example
//!
//! ```
//! use moooves::{mock_opponent_move, Board, Player, Pos};
//!
//! let mut board = Board::new();
//! for col in 5..9 {
//!     board.place_stone(Pos::new(5, col), Player::X);
//! }
//!
//! // O must stop X from completing five on row 5
//! let block = mock_opponent_move(&board, Player::O).unwrap();
//! assert_eq!(block.row, 5);
//! assert!(block.col == 4 || block.col == 9);
//! ```

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Bitboard, Board, Player, Pos};
use crate::error::ConfigError;
use crate::eval::{
    center_bonus, fork_potential, self_strategic_score, strategic_score, threat_block_score,
};
use crate::rules::{check_win_conditions, Scores, Sequence, UsedPositions};

/// Which rung of the ladder produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Completes a new sequence for the mover
    ImmediateWin,
    /// Takes the cell the opponent needed for a sequence
    Block,
    /// Cuts an emerging opponent line
    ThreatBlock,
    /// Opens two or more own lines at once
    Fork,
    /// Best line/centre evaluation
    Strategic,
    /// Next to existing marks
    Nearby,
    /// Closest empty cell to the centre
    Fallback,
}

/// Result of a move choice with the evaluation behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Chosen cell, `None` only on a full board
    pub best_move: Option<Pos>,
    /// Rung-specific evaluation of the chosen cell
    pub score: i32,
    /// Rung that produced the move
    pub kind: MoveKind,
    /// Number of candidate cells evaluated
    pub evaluated: u64,
}

impl MoveResult {
    #[inline]
    fn found(pos: Pos, kind: MoveKind, score: i32, evaluated: u64) -> Self {
        Self {
            best_move: Some(pos),
            score,
            kind,
            evaluated,
        }
    }

    #[inline]
    fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0,
            kind: MoveKind::Fallback,
            evaluated: 0,
        }
    }
}

/// Tunables for the opponent heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentConfig {
    /// Strategic candidates are empty cells within this Chebyshev distance
    /// of an existing mark
    pub candidate_radius: u8,
    /// Shortest opponent line the threat-block rung reacts to
    pub min_threat_length: u32,
    /// Skip cells that extend an already scored line
    pub avoid_scored_extensions: bool,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            candidate_radius: 2,
            min_threat_length: 3,
            avoid_scored_extensions: true,
        }
    }
}

impl OpponentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.candidate_radius == 0 {
            return Err(ConfigError::Validation(
                "opponent.candidate_radius must be >= 1".to_string(),
            ));
        }
        if !(2..=4).contains(&self.min_threat_length) {
            return Err(ConfigError::Validation(format!(
                "opponent.min_threat_length must be in 2..=4, got {}",
                self.min_threat_length
            )));
        }
        Ok(())
    }
}

/// Heuristic computer opponent.
///
/// Stateless between calls; holds only its configuration.
#[derive(Debug, Clone, Default)]
pub struct Opponent {
    config: OpponentConfig,
}

impl Opponent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: OpponentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OpponentConfig {
        &self.config
    }

    /// Best move for `player`, ignoring already scored sequences.
    #[must_use]
    pub fn get_move(&self, board: &Board, player: Player) -> Option<Pos> {
        self.choose_move(board, player, &[]).best_move
    }

    /// Best move for `player` with the rung and evaluation that produced it.
    ///
    /// `used_sequences` are the sequences already credited in this match;
    /// cells that would only recreate them do not count as wins, and (when
    /// configured) cells extending them are avoided.
    #[must_use]
    pub fn choose_move(&self, board: &Board, player: Player, used_sequences: &[Sequence]) -> MoveResult {
        let available = board.available_moves();
        if available.is_empty() {
            return MoveResult::no_move();
        }
        let opponent = player.opponent();

        // Only cells touching a mark can join a line
        let frontier: Vec<Pos> = available
            .iter()
            .copied()
            .filter(|&p| board.has_adjacent_stone(p))
            .collect();
        let mut evaluated = frontier.len() as u64;

        // 1. Complete our own sequence
        if let Some((pos, count)) = best_winning_cell(board, player, &frontier, used_sequences, |_| 0) {
            return self.log_choice(
                player,
                MoveResult::found(pos, MoveKind::ImmediateWin, count as i32, evaluated),
            );
        }

        // 2. Take the cell the opponent needs; prefer the block that also helps us
        if let Some((pos, count)) = best_winning_cell(board, opponent, &frontier, used_sequences, |p| {
            self_strategic_score(board, player, p)
        }) {
            return self.log_choice(
                player,
                MoveResult::found(pos, MoveKind::Block, count as i32, evaluated),
            );
        }

        // 3. Cut the strongest emerging opponent line
        if let Some((pos, score)) = self.find_threat_block(board, player, &frontier) {
            return self.log_choice(
                player,
                MoveResult::found(pos, MoveKind::ThreatBlock, score, evaluated),
            );
        }

        let candidates = self.candidate_cells(board, &available);
        evaluated += candidates.len() as u64;

        // 4. Open two lines at once
        if let Some((pos, axes)) = find_fork(board, player, &candidates) {
            return self.log_choice(
                player,
                MoveResult::found(pos, MoveKind::Fork, axes as i32, evaluated),
            );
        }

        // 5. Best overall evaluation away from scored lines
        let forbidden = if self.config.avoid_scored_extensions {
            forbidden_extensions(board, used_sequences)
        } else {
            HashSet::new()
        };
        if let Some((pos, score)) = best_by(
            candidates.iter().copied().filter(|p| !forbidden.contains(p)),
            |p| strategic_score(board, player, p),
        ) {
            return self.log_choice(
                player,
                MoveResult::found(pos, MoveKind::Strategic, score, evaluated),
            );
        }

        // 6. Anything touching a mark, nearest the centre
        if let Some((pos, score)) = best_by(frontier.iter().copied(), center_bonus) {
            return self.log_choice(
                player,
                MoveResult::found(pos, MoveKind::Nearby, score, evaluated),
            );
        }

        // 7. Any empty cell, nearest the centre
        match best_by(available.iter().copied(), center_bonus) {
            Some((pos, score)) => self.log_choice(
                player,
                MoveResult::found(pos, MoveKind::Fallback, score, evaluated),
            ),
            None => MoveResult::no_move(),
        }
    }

    /// Strongest opponent line to cut; ties go to the cell that also
    /// extends our own lines.
    fn find_threat_block(&self, board: &Board, player: Player, frontier: &[Pos]) -> Option<(Pos, i32)> {
        let opponent = player.opponent();
        let mut best: Option<(Pos, i32, i32)> = None;
        for &pos in frontier {
            let score = threat_block_score(board, opponent, pos, self.config.min_threat_length);
            if score == 0 {
                continue;
            }
            let own = self_strategic_score(board, player, pos);
            let better = match best {
                None => true,
                Some((_, s, o)) => score > s || (score == s && own > o),
            };
            if better {
                best = Some((pos, score, own));
            }
        }
        best.map(|(pos, score, _)| (pos, score))
    }

    /// Empty cells within `candidate_radius` of any mark, row-major.
    /// On an empty board every cell is a candidate.
    fn candidate_cells(&self, board: &Board, available: &[Pos]) -> Vec<Pos> {
        if board.is_board_empty() {
            return available.to_vec();
        }
        let radius = self.config.candidate_radius as i32;
        let mut near = Bitboard::new();
        for mark in board.x.union(&board.o).iter_ones() {
            for dr in -radius..=radius {
                for dc in -radius..=radius {
                    if let Some(p) = mark.offset(dr, dc, 1) {
                        if board.is_empty(p) {
                            near.set(p);
                        }
                    }
                }
            }
        }
        near.iter_ones().collect()
    }

    fn log_choice(&self, player: Player, result: MoveResult) -> MoveResult {
        if let Some(pos) = result.best_move {
            debug!(
                "{player} opponent chose {pos} via {:?} (score {}, {} cells evaluated)",
                result.kind, result.score, result.evaluated
            );
        }
        result
    }
}

/// Move for `ai` using the default configuration.
///
/// Returns `None` only when the board is full.
#[must_use]
pub fn mock_opponent_move(board: &Board, ai: Player) -> Option<Pos> {
    Opponent::new().get_move(board, ai)
}

/// Number of new sequences `player` would score by playing `pos`.
pub fn winning_sequences_at(board: &Board, player: Player, pos: Pos, used_sequences: &[Sequence]) -> usize {
    if !pos.in_bounds() || !board.is_empty(pos) {
        return 0;
    }
    let next = board.with_stone(pos, player);
    check_win_conditions(
        &next,
        player,
        pos,
        used_sequences,
        Scores::default(),
        &UsedPositions::new(),
    )
    .map_or(0, |outcome| outcome.new_sequences.len())
}

/// Cell where `player` scores the most new sequences; ties broken by
/// `tie_break` (higher wins), then row-major order.
fn best_winning_cell<F>(
    board: &Board,
    player: Player,
    cells: &[Pos],
    used_sequences: &[Sequence],
    tie_break: F,
) -> Option<(Pos, usize)>
where
    F: Fn(Pos) -> i32,
{
    let mut best: Option<(Pos, usize, i32)> = None;
    for &pos in cells {
        let count = winning_sequences_at(board, player, pos, used_sequences);
        if count == 0 {
            continue;
        }
        let tie = tie_break(pos);
        let better = match best {
            None => true,
            Some((_, c, t)) => count > c || (count == c && tie > t),
        };
        if better {
            best = Some((pos, count, tie));
        }
    }
    best.map(|(pos, count, _)| (pos, count))
}

/// Cell opening the most open 3+ lines for `player` (at least two), ties
/// broken by total line length.
fn find_fork(board: &Board, player: Player, candidates: &[Pos]) -> Option<(Pos, u32)> {
    let mut best: Option<(Pos, u32, u32)> = None;
    for &pos in candidates {
        let (axes, sum_len) = fork_potential(board, player, pos);
        if axes < 2 {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, a, s)) => axes > a || (axes == a && sum_len > s),
        };
        if better {
            best = Some((pos, axes, sum_len));
        }
    }
    best.map(|(pos, axes, _)| (pos, axes))
}

/// Highest-scoring cell; the first one wins ties.
fn best_by<I, F>(cells: I, score: F) -> Option<(Pos, i32)>
where
    I: IntoIterator<Item = Pos>,
    F: Fn(Pos) -> i32,
{
    let mut best: Option<(Pos, i32)> = None;
    for pos in cells {
        let s = score(pos);
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((pos, s));
        }
    }
    best
}

/// Empty cells that only prolong an already scored line: the open cells
/// beyond each end along its axis, and the orthogonal neighbours of both
/// end cells.
fn forbidden_extensions(board: &Board, used_sequences: &[Sequence]) -> HashSet<Pos> {
    let mut forbidden = HashSet::new();
    for seq in used_sequences {
        let Some(dir) = seq.direction() else {
            continue;
        };
        let (dr, dc) = dir.delta();
        let cells = seq.positions();
        let (first, last) = (cells[0], cells[cells.len() - 1]);

        for (end, sign) in [(first, -1), (last, 1)] {
            let mut k = 1;
            while let Some(p) = end.offset(dr * sign, dc * sign, k) {
                if !board.is_empty(p) {
                    break;
                }
                forbidden.insert(p);
                k += 1;
            }
        }

        for end in [first, last] {
            for (odr, odc) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                if let Some(p) = end.offset(odr, odc, 1) {
                    if board.is_empty(p) {
                        forbidden.insert(p);
                    }
                }
            }
        }
    }
    forbidden
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn board_with(stones: &[(u8, u8, Player)]) -> Board {
        let mut board = Board::new();
        for &(r, c, p) in stones {
            board.place_stone(Pos::new(r, c), p);
        }
        board
    }

    #[test]
    fn test_takes_winning_move() {
        let board = board_with(&[
            (7, 7, Player::O),
            (7, 8, Player::O),
            (7, 9, Player::O),
            (7, 10, Player::O),
            (0, 0, Player::X),
            (1, 1, Player::X),
        ]);
        let result = Opponent::new().choose_move(&board, Player::O, &[]);
        assert_eq!(result.kind, MoveKind::ImmediateWin);

        let pos = result.best_move.unwrap();
        let after = board.with_stone(pos, Player::O);
        let outcome = check_win_conditions(
            &after,
            Player::O,
            pos,
            &[],
            Scores::default(),
            &UsedPositions::new(),
        )
        .unwrap();
        assert!(!outcome.new_sequences.is_empty());
    }

    #[test]
    fn test_blocks_open_four() {
        let board = board_with(&[
            (5, 5, Player::X),
            (5, 6, Player::X),
            (5, 7, Player::X),
            (5, 8, Player::X),
            (10, 10, Player::O),
            (11, 11, Player::O),
        ]);
        let result = Opponent::new().choose_move(&board, Player::O, &[]);
        assert_eq!(result.kind, MoveKind::Block);
        let m = result.best_move.unwrap();
        assert!(m == Pos::new(5, 4) || m == Pos::new(5, 9));
    }

    #[test]
    fn test_block_beats_own_three() {
        // X threatens (10,10) or (10,5); O only has three of its own
        let board = board_with(&[
            (10, 6, Player::X),
            (10, 7, Player::X),
            (10, 8, Player::X),
            (10, 9, Player::X),
            (5, 5, Player::O),
            (5, 6, Player::O),
            (5, 7, Player::O),
        ]);
        let m = mock_opponent_move(&board, Player::O).unwrap();
        assert_eq!(m.row, 10);
        assert!((5..=10).contains(&m.col));

        // The opponent can no longer complete five on the next move
        let after = board.with_stone(m, Player::O);
        let remaining: usize = after
            .available_moves()
            .into_iter()
            .map(|p| winning_sequences_at(&after, Player::X, p, &[]))
            .sum();
        assert!(remaining <= 1, "only the far end of the four may remain");
        assert_eq!(winning_sequences_at(&after, Player::X, m, &[]), 0);
    }

    #[test]
    fn test_blocks_split_four() {
        // X X _ X X on row 3: only the gap completes five
        let board = board_with(&[
            (3, 3, Player::X),
            (3, 4, Player::X),
            (3, 6, Player::X),
            (3, 7, Player::X),
            (20, 20, Player::O),
        ]);
        let result = Opponent::new().choose_move(&board, Player::O, &[]);
        assert_eq!(result.kind, MoveKind::Block);
        assert_eq!(result.best_move, Some(Pos::new(3, 5)));
    }

    #[test]
    fn test_win_beats_block() {
        let board = board_with(&[
            (5, 5, Player::X),
            (5, 6, Player::X),
            (5, 7, Player::X),
            (5, 8, Player::X),
            (12, 1, Player::O),
            (12, 2, Player::O),
            (12, 3, Player::O),
            (12, 4, Player::O),
        ]);
        let result = Opponent::new().choose_move(&board, Player::O, &[]);
        assert_eq!(result.kind, MoveKind::ImmediateWin);
        assert_eq!(result.best_move.unwrap().row, 12);
    }

    #[test]
    fn test_credited_line_is_not_a_win() {
        // O already scored (4,0)-(4,4); extending it scores nothing
        let board = board_with(&[
            (4, 0, Player::O),
            (4, 1, Player::O),
            (4, 2, Player::O),
            (4, 3, Player::O),
            (4, 4, Player::O),
        ]);
        let used = vec![Sequence::from_positions((0..5).map(|c| Pos::new(4, c)))];
        let result = Opponent::new().choose_move(&board, Player::O, &used);
        assert_ne!(result.kind, MoveKind::ImmediateWin);
        assert_ne!(result.best_move, Some(Pos::new(4, 5)));
    }

    #[test]
    fn test_threat_block_open_three() {
        let board = board_with(&[
            (8, 8, Player::X),
            (8, 9, Player::X),
            (8, 10, Player::X),
            (15, 15, Player::O),
        ]);
        let result = Opponent::new().choose_move(&board, Player::O, &[]);
        assert_eq!(result.kind, MoveKind::ThreatBlock);
        let m = result.best_move.unwrap();
        assert_eq!(m.row, 8);
        assert!(m.col == 7 || m.col == 11);
    }

    #[test]
    fn test_fork_when_nothing_to_block() {
        let board = board_with(&[
            (10, 8, Player::O),
            (10, 9, Player::O),
            (8, 10, Player::O),
            (9, 10, Player::O),
            (0, 29, Player::X),
        ]);
        let result = Opponent::new().choose_move(&board, Player::O, &[]);
        assert_eq!(result.kind, MoveKind::Fork);
        assert_eq!(result.best_move, Some(Pos::new(10, 10)));
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_empty_board_plays_center() {
        let board = Board::new();
        let result = Opponent::new().choose_move(&board, Player::O, &[]);
        assert_eq!(result.kind, MoveKind::Strategic);
        let m = result.best_move.unwrap();
        assert!(m.center_distance() < 5.0);
        assert_eq!(m, Pos::new(14, 14));
    }

    #[test]
    fn test_strategic_stays_empty_cell() {
        let board = board_with(&[
            (7, 7, Player::X),
            (7, 9, Player::X),
            (9, 7, Player::X),
            (9, 9, Player::X),
            (8, 8, Player::O),
            (8, 7, Player::X),
        ]);
        let m = mock_opponent_move(&board, Player::O).unwrap();
        assert!(board.is_empty(m));
    }

    #[test]
    fn test_full_board_returns_none() {
        let mut board = Board::new();
        for idx in 0..crate::board::TOTAL_CELLS {
            let p = if (idx / 2) % 2 == 0 { Player::X } else { Player::O };
            board.place_stone(Pos::from_index(idx), p);
        }
        let result = Opponent::new().choose_move(&board, Player::O, &[]);
        assert_eq!(result.best_move, None);
        assert_eq!(mock_opponent_move(&board, Player::X), None);
    }

    #[test]
    fn test_last_empty_cell_is_found() {
        let mut board = Board::new();
        for idx in 0..crate::board::TOTAL_CELLS {
            let p = if (idx / 2) % 2 == 0 { Player::X } else { Player::O };
            board.place_stone(Pos::from_index(idx), p);
        }
        board.remove_stone(Pos::new(29, 0));
        assert_eq!(mock_opponent_move(&board, Player::O), Some(Pos::new(29, 0)));
    }

    #[test]
    fn test_off_board_cell_never_wins() {
        let board = board_with(&[
            (29, 0, Player::X),
            (29, 1, Player::X),
            (29, 2, Player::X),
            (29, 3, Player::X),
        ]);
        assert_eq!(winning_sequences_at(&Board::new(), Player::X, Pos { row: 40, col: 0 }, &[]), 0);
        assert_eq!(winning_sequences_at(&board, Player::X, Pos { row: 30, col: 4 }, &[]), 0);
        assert_eq!(winning_sequences_at(&board, Player::X, Pos::new(29, 4), &[]), 1);
    }

    #[test]
    fn test_forbidden_extensions() {
        let board = board_with(&[
            (4, 0, Player::O),
            (4, 1, Player::O),
            (4, 2, Player::O),
            (4, 3, Player::O),
            (4, 4, Player::O),
            (4, 8, Player::X),
        ]);
        let used = vec![Sequence::from_positions((0..5).map(|c| Pos::new(4, c)))];
        let forbidden = forbidden_extensions(&board, &used);
        assert!(forbidden.contains(&Pos::new(4, 5)));
        assert!(forbidden.contains(&Pos::new(4, 7)));
        assert!(!forbidden.contains(&Pos::new(4, 9)), "stops at the X mark");
        assert!(forbidden.contains(&Pos::new(3, 0)));
        assert!(forbidden.contains(&Pos::new(5, 4)));
        assert!(!forbidden.contains(&Pos::new(3, 2)));
    }

    #[test]
    fn test_with_config_keeps_settings() {
        let config = OpponentConfig {
            candidate_radius: 4,
            ..OpponentConfig::default()
        };
        assert_eq!(Opponent::with_config(config.clone()).config(), &config);
        assert_eq!(Opponent::new().config(), &OpponentConfig::default());
    }

    #[test]
    fn test_config_validation() {
        assert!(OpponentConfig::default().validate().is_ok());
        let bad = OpponentConfig {
            candidate_radius: 0,
            ..OpponentConfig::default()
        };
        assert!(bad.validate().is_err());
        let bad = OpponentConfig {
            min_threat_length: 7,
            ..OpponentConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_deterministic() {
        let board = board_with(&[(14, 14, Player::X), (15, 15, Player::O), (14, 15, Player::X)]);
        let opponent = Opponent::new();
        let a = opponent.choose_move(&board, Player::O, &[]);
        let b = opponent.choose_move(&board, Player::O, &[]);
        assert_eq!(a, b);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_move_is_empty_cell(
            cells in proptest::collection::vec((0u8..30, 0u8..30, any::<bool>()), 0..120),
            ai_is_x in any::<bool>(),
        ) {
            let mut board = Board::new();
            for &(r, c, is_x) in &cells {
                board.place_stone(Pos::new(r, c), if is_x { Player::X } else { Player::O });
            }
            let ai = if ai_is_x { Player::X } else { Player::O };
            let m = mock_opponent_move(&board, ai);
            prop_assert!(m.is_some());
            prop_assert!(board.is_empty(m.unwrap()));
        }
    }
}
