//! Candidate-cell evaluation for the opponent heuristic
//!
//! Every function here scores one empty cell without touching the board:
//! - how much of an opponent line it would block
//! - how much it extends the mover's own lines
//! - how many axes it would turn into threats at once (forks)
//! - a combined strategic value with a centre bonus

use crate::board::{Board, Player, Pos};
use crate::rules::{measure_line, DIRECTIONS};

use super::patterns::{offense_weight, potential_weight, threat_weight, LineWeight};

/// Centre bonus at distance 0, in the same (doubled) units as the line
/// weights. Falls by one unit per cell of distance.
const CENTER_BONUS: f64 = 30.0;

/// Value of occupying `pos` to cut `opponent` lines of at least
/// `min_length` marks. Open and closed lines both count.
pub fn threat_block_score(board: &Board, opponent: Player, pos: Pos, min_length: u32) -> i32 {
    DIRECTIONS
        .iter()
        .map(|&dir| measure_line(board, opponent, pos, dir))
        .filter(|shape| shape.length >= min_length.max(1))
        .map(threat_weight)
        .sum()
}

/// Offensive value of `pos` for `player`, with a bonus when two or more
/// axes already carry a line.
pub fn self_strategic_score(board: &Board, player: Player, pos: Pos) -> i32 {
    let mut score = 0;
    let mut fork_axes = 0;
    for dir in DIRECTIONS {
        let shape = measure_line(board, player, pos, dir);
        let value = offense_weight(shape);
        score += value;
        if value > 0 && shape.length >= 2 {
            fork_axes += 1;
        }
    }
    if fork_axes >= 2 {
        score += fork_axes * fork_axes * LineWeight::FORK_BONUS;
    }
    score
}

/// Fork potential of `pos` for `player`: the number of axes where the mark
/// would make an open line of 3+, and the summed length of those lines.
pub fn fork_potential(board: &Board, player: Player, pos: Pos) -> (u32, u32) {
    let mut axes = 0;
    let mut sum_len = 0;
    for dir in DIRECTIONS {
        let shape = measure_line(board, player, pos, dir);
        if shape.open_ends > 0 && shape.length + 1 >= LineWeight::FORK_AXIS_LEN {
            axes += 1;
            sum_len += shape.length;
        }
    }
    (axes, sum_len)
}

/// Combined value of `pos` for `player`: own lines (quadratic), opponent
/// lines it sits on (cubic) and closeness to the centre.
pub fn strategic_score(board: &Board, player: Player, pos: Pos) -> i32 {
    let opponent = player.opponent();
    let mut score = 0;
    for dir in DIRECTIONS {
        score += potential_weight(measure_line(board, player, pos, dir), 2);
        score += potential_weight(measure_line(board, opponent, pos, dir), 3);
    }
    score + center_bonus(pos)
}

/// Positional bonus, highest at the four centre cells.
pub fn center_bonus(pos: Pos) -> i32 {
    (CENTER_BONUS - pos.center_distance()).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threat_block_prefers_longer_line() {
        let mut board = Board::new();
        // X four on row 5, X two on row 20
        for c in 5..9 {
            board.place_stone(Pos::new(5, c), Player::X);
        }
        board.place_stone(Pos::new(20, 5), Player::X);
        board.place_stone(Pos::new(20, 6), Player::X);

        let four_end = threat_block_score(&board, Player::X, Pos::new(5, 9), 2);
        let two_end = threat_block_score(&board, Player::X, Pos::new(20, 7), 2);
        assert!(four_end > two_end);
        assert_eq!(threat_block_score(&board, Player::X, Pos::new(20, 7), 3), 0);
    }

    #[test]
    fn test_threat_block_ignores_empty_area() {
        let board = Board::new();
        assert_eq!(threat_block_score(&board, Player::O, Pos::new(15, 15), 0), 0);
    }

    #[test]
    fn test_self_strategic_fork_bonus() {
        let mut board = Board::new();
        // O pairs meeting at (10, 10) horizontally and vertically
        board.place_stone(Pos::new(10, 8), Player::O);
        board.place_stone(Pos::new(10, 9), Player::O);
        board.place_stone(Pos::new(8, 10), Player::O);
        board.place_stone(Pos::new(9, 10), Player::O);

        let fork = self_strategic_score(&board, Player::O, Pos::new(10, 10));
        let single = self_strategic_score(&board, Player::O, Pos::new(10, 7));
        assert!(fork > single);
    }

    #[test]
    fn test_fork_potential_counts_axes() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Player::O);
        board.place_stone(Pos::new(8, 8), Player::O);
        board.place_stone(Pos::new(7, 9), Player::O);
        board.place_stone(Pos::new(8, 10), Player::O);

        // (9, 9) extends the (7,7)-(8,8) diagonal; (6, 8) extends (7,9)-(8,10)
        let (axes, _) = fork_potential(&board, Player::O, Pos::new(9, 9));
        assert_eq!(axes, 1);
        let (axes, _) = fork_potential(&board, Player::O, Pos::new(6, 8));
        assert_eq!(axes, 1);
        let (axes, sum) = fork_potential(&board, Player::O, Pos::new(20, 20));
        assert_eq!((axes, sum), (0, 0));
    }

    #[test]
    fn test_center_bonus_peaks_in_middle() {
        assert!(center_bonus(Pos::new(14, 14)) > center_bonus(Pos::new(0, 0)));
        assert_eq!(center_bonus(Pos::new(14, 15)), center_bonus(Pos::new(15, 14)));
        assert_eq!(center_bonus(Pos::new(14, 14)), 29);
    }

    #[test]
    fn test_strategic_score_empty_board_is_center_only() {
        let board = Board::new();
        let pos = Pos::new(3, 3);
        assert_eq!(strategic_score(&board, Player::X, pos), center_bonus(pos));
    }
}
