use super::*;

#[test]
fn test_player_opponent() {
    assert_eq!(Player::X.opponent(), Player::O);
    assert_eq!(Player::O.opponent(), Player::X);
}

#[test]
fn test_pos_new() {
    let pos = Pos::new(15, 15);
    assert_eq!(pos.row, 15);
    assert_eq!(pos.col, 15);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(15, 15);
    assert_eq!(pos.to_index(), 15 * 30 + 15);
    assert_eq!(pos.to_index(), 465);

    let pos2 = Pos::from_index(465);
    assert_eq!(pos2, pos);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(29, 29));
    assert!(Pos::is_valid(15, 15));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, -1));
    assert!(!Pos::is_valid(30, 0));
    assert!(!Pos::is_valid(0, 30));
}

#[test]
fn test_pos_try_new() {
    assert_eq!(Pos::try_new(3, 4).unwrap(), Pos::new(3, 4));
    assert!(Pos::try_new(30, 4).is_err());
    assert!(!Pos { row: 31, col: 0 }.in_bounds());
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 30);
    assert_eq!(TOTAL_CELLS, 900);
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 29);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
    assert!(pos1 < pos3);
}

#[test]
fn test_pos_offset_stops_at_edges() {
    let corner = Pos::new(0, 29);
    assert_eq!(corner.offset(0, 1, 1), None);
    assert_eq!(corner.offset(-1, 0, 1), None);
    assert_eq!(corner.offset(1, -1, 2), Some(Pos::new(2, 27)));
}

#[test]
fn test_pos_key_roundtrip() {
    let pos: Pos = "12,7".parse().unwrap();
    assert_eq!(pos, Pos::new(12, 7));
    assert_eq!(pos.to_string(), "12,7");
    assert!("12".parse::<Pos>().is_err());
    assert!("12,x".parse::<Pos>().is_err());
    assert!("30,0".parse::<Pos>().is_err());
}

#[test]
fn test_pos_serde_pair() {
    let json = serde_json::to_string(&Pos::new(5, 10)).unwrap();
    assert_eq!(json, "[5,10]");
    let back: Pos = serde_json::from_str("[5,10]").unwrap();
    assert_eq!(back, Pos::new(5, 10));
    assert!(serde_json::from_str::<Pos>("[40,1]").is_err());
}

#[test]
fn test_board_place_and_get() {
    let mut board = Board::new();
    let pos = Pos::new(3, 4);
    assert!(board.is_empty(pos));
    board.place_stone(pos, Player::X);
    assert_eq!(board.get(pos), Some(Player::X));
    board.place_stone(pos, Player::O);
    assert_eq!(board.get(pos), Some(Player::O));
    assert_eq!(board.stone_count(), 1);
    board.remove_stone(pos);
    assert!(board.is_board_empty());
}

#[test]
fn test_available_moves() {
    let mut board = Board::new();
    assert_eq!(board.available_moves().len(), 900);

    board.place_stone(Pos::new(0, 0), Player::X);
    board.place_stone(Pos::new(15, 15), Player::O);
    let moves = board.available_moves();
    assert_eq!(moves.len(), 898);
    assert!(!moves.contains(&Pos::new(0, 0)));
    assert!(!moves.contains(&Pos::new(15, 15)));
}

#[test]
fn test_full_board() {
    let mut board = Board::new();
    for idx in 0..TOTAL_CELLS {
        let player = if idx % 2 == 0 { Player::X } else { Player::O };
        board.place_stone(Pos::from_index(idx), player);
    }
    assert!(board.is_full());
    assert!(board.available_moves().is_empty());
}

#[test]
fn test_with_stone_leaves_original() {
    let board = Board::new();
    let next = board.with_stone(Pos::new(2, 2), Player::O);
    assert!(board.is_board_empty());
    assert_eq!(next.get(Pos::new(2, 2)), Some(Player::O));
}

#[test]
fn test_board_rows() {
    let board = Board::from_rows(&["X.O", "", "..X"]).unwrap();
    assert_eq!(board.get(Pos::new(0, 0)), Some(Player::X));
    assert_eq!(board.get(Pos::new(0, 2)), Some(Player::O));
    assert_eq!(board.get(Pos::new(2, 2)), Some(Player::X));
    assert_eq!(board.stone_count(), 3);

    let rows = board.to_rows();
    assert_eq!(rows.len(), 30);
    assert!(rows[0].starts_with("X.O..."));
    assert_eq!(Board::from_rows(&rows).unwrap(), board);
}

#[test]
fn test_board_rows_too_wide() {
    let wide = "X".repeat(31);
    assert!(Board::from_rows(&[wide]).is_err());
}

#[test]
fn test_has_adjacent_stone() {
    let mut board = Board::new();
    board.place_stone(Pos::new(0, 0), Player::X);
    assert!(board.has_adjacent_stone(Pos::new(1, 1)));
    assert!(!board.has_adjacent_stone(Pos::new(2, 2)));
    assert!(!board.has_adjacent_stone(Pos::new(0, 0)));
}

#[test]
fn test_off_board_pos_is_not_a_cell() {
    let mut board = Board::new();
    for pos in [Pos { row: 30, col: 5 }, Pos { row: 40, col: 0 }, Pos { row: 3, col: 200 }] {
        board.place_stone(pos, Player::X);
        assert_eq!(board.get(pos), None);
        assert!(!board.is_empty(pos));
        board.remove_stone(pos);
    }
    assert_eq!(board.stone_count(), 0);
    assert!(board.is_board_empty());
    assert_eq!(board.available_moves().len(), 900);
}
