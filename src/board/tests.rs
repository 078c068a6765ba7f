use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_stone_chars() {
    for stone in [Stone::Empty, Stone::White, Stone::Black] {
        assert_eq!(Stone::from_char(stone.to_char()), Some(stone));
    }
    assert_eq!(Stone::from_char('X'), None);
    assert_eq!(Stone::from_name("White"), Some(Stone::White));
    assert_eq!(Stone::from_name("white"), None);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(9, 9); // Center
    assert_eq!(pos.to_index(), 180);
    assert_eq!(Pos::from_index(180), pos);
    assert_eq!(Pos::CENTER, pos);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(18, 18));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, -1));
    assert!(!Pos::is_valid(19, 0));
    assert!(!Pos::is_valid(0, 19));
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 19);
    assert_eq!(TOTAL_CELLS, 361);
    assert_eq!(CENTER_INDEX, 9);
}

#[test]
fn test_pos_parse() {
    assert_eq!("J10".parse::<Pos>().unwrap(), Pos::new(9, 9));
    assert_eq!("a1".parse::<Pos>().unwrap(), Pos::new(0, 0));
    assert_eq!("S19".parse::<Pos>().unwrap(), Pos::new(18, 18));
    assert_eq!("c05".parse::<Pos>().unwrap(), Pos::new(4, 2));
}

#[test]
fn test_pos_parse_errors() {
    for text in ["", "J", "J100", "10", "JJ", "J1a", "1J", "J-1", "É1"] {
        assert_eq!(text.parse::<Pos>(), Err(PenteError::Parse), "{text}");
    }
    // Well formed but off the board
    for text in ["T1", "Z5", "A0", "A20", "A99"] {
        assert_eq!(text.parse::<Pos>(), Err(PenteError::OutOfBounds), "{text}");
    }
}

#[test]
fn test_pos_display() {
    assert_eq!(Pos::new(9, 9).to_string(), "J10");
    assert_eq!(Pos::new(0, 0).to_string(), "A1");
    assert_eq!(Pos::new(18, 18).to_string(), "S19");
    for pos in Pos::all() {
        assert_eq!(pos.to_string().parse::<Pos>().unwrap(), pos);
    }
}

#[test]
fn test_distance_from_center() {
    assert_eq!(Pos::CENTER.distance_from_center(), 0);
    assert_eq!(Pos::new(0, 0).distance_from_center(), 9);
    assert_eq!(Pos::new(12, 8).distance_from_center(), 3);
    for ring in CENTER_RING {
        assert_eq!(ring.distance_from_center(), 3);
    }
    let names: Vec<String> = CENTER_RING.iter().map(|p| p.to_string()).collect();
    assert_eq!(names, ["J7", "M10", "J13", "G10"]);
}

#[test]
fn test_directions_are_paired() {
    for dir in 0..NUM_AXES {
        let (dr, dc) = DIRECTIONS[dir];
        assert_eq!(DIRECTIONS[dir + NUM_AXES], (-dr, -dc));
    }
    assert_eq!(Pos::new(0, 0).offset(4, 1), None);
    assert_eq!(Pos::new(0, 0).offset(1, 2), Some(Pos::new(2, 2)));
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
    assert!(pos1 < pos3);
}
