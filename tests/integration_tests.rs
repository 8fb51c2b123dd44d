//! Integration tests for kifu-rust
//!
//! These exercise the whole pipeline (text -> forest -> main line -> moves ->
//! board) and the laws the pieces are expected to obey. Randomized checks use
//! fixed seeds so failures reproduce.

use kifu_rust::board::{Board, Color, simulate};
use kifu_rust::coord::{display_to_xy, sgf_to_xy, xy_to_display, xy_to_sgf};
use kifu_rust::mainline::{MainLine, extract_main_route, reduce_to_main_line};
use kifu_rust::moves::{GameRecord, Move, extract_moves};
use kifu_rust::sgf::{Collection, PropIdent, Properties, parse, parse_report};
use kifu_rust::turn::next_turn;

// =============================================================================
// Helper functions
// =============================================================================

/// Build a main-line SGF text from a list of moves.
fn record_text(moves: &[Move]) -> String {
    let mut text = String::from("(;SZ[19]");
    for mv in moves {
        text.push(';');
        text.push(mv.color.letter());
        text.push('[');
        text.push_str(&xy_to_sgf(mv.x, mv.y).unwrap());
        text.push(']');
    }
    text.push(')');
    text
}

/// A random game that only ever plays on empty points.
fn random_game(rng: &mut fastrand::Rng, len: usize) -> Vec<Move> {
    let mut board = Board::new(19);
    let mut moves = Vec::new();
    let mut color = Color::Black;
    while moves.len() < len {
        let (x, y) = (rng.usize(0..19), rng.usize(0..19));
        if board.get(x, y).is_some() {
            continue;
        }
        board.play(x, y, color);
        moves.push(Move::new(color, x, y));
        color = color.opposite();
    }
    moves
}

/// A random forest with branching, built straight into the arena.
fn random_forest(rng: &mut fastrand::Rng, nodes: usize) -> Collection {
    let mut collection = Collection::new();
    let mut ids = Vec::new();
    for i in 0..nodes {
        let parent = if ids.is_empty() || rng.u8(0..10) == 0 {
            None
        } else {
            Some(ids[rng.usize(0..ids.len())])
        };
        let mut props = Properties::new();
        let ident = if i % 2 == 0 { PropIdent::Black } else { PropIdent::White };
        props.push(ident, vec![xy_to_sgf(rng.usize(0..19), rng.usize(0..19)).unwrap()]);
        ids.push(collection.add_node(parent, props));
    }
    collection
}

// =============================================================================
// Coordinate transcoding
// =============================================================================

#[test]
fn test_coordinate_roundtrip_law() {
    for x in 0..19 {
        for y in 0..19 {
            assert_eq!(sgf_to_xy(&xy_to_sgf(x, y).unwrap()), Some((x, y)));
            assert_eq!(display_to_xy(&xy_to_display(x, y).unwrap()), Some((x, y)));
        }
    }
}

#[test]
fn test_display_alphabet_excludes_i() {
    assert_eq!(display_to_xy("I5"), None);
    for x in 0..19 {
        assert!(!xy_to_display(x, 0).unwrap().starts_with('I'));
    }
}

#[test]
fn test_transcoders_are_total() {
    let mut rng = fastrand::Rng::with_seed(7);
    let alphabet: Vec<char> = "abstzABIST019 \u{00e9}-".chars().collect();
    for _ in 0..2000 {
        let len = rng.usize(0..5);
        let s: String = (0..len)
            .map(|_| alphabet[rng.usize(0..alphabet.len())])
            .collect();
        if let Some((x, y)) = sgf_to_xy(&s) {
            assert!(x < 19 && y < 19);
        }
        if let Some((x, y)) = display_to_xy(&s) {
            assert_eq!(xy_to_display(x, y).as_deref(), Some(s.as_str()));
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parser_tolerates_missing_paren() {
    let forest = parse("(;B[aa]");
    let line = reduce_to_main_line(&forest);
    assert_eq!(line.len(), 1);
    assert_eq!(line.root().unwrap().black_move(), Some("aa"));
}

#[test]
fn test_parser_never_panics_on_noise() {
    let mut rng = fastrand::Rng::with_seed(11);
    let alphabet: Vec<char> = "()[];\\BWASZC abtp\n".chars().collect();
    for _ in 0..500 {
        let len = rng.usize(0..60);
        let text: String = (0..len)
            .map(|_| alphabet[rng.usize(0..alphabet.len())])
            .collect();
        let (forest, _) = parse_report(&text);
        // Whatever was recovered serializes to text that parses back the same.
        assert_eq!(parse(&forest.to_sgf()), forest, "input: {text:?}");
        let _ = GameRecord::from_sgf(&text).simulate(None);
        let _ = next_turn(&text, None);
    }
}

// =============================================================================
// Main line
// =============================================================================

#[test]
fn test_main_line_idempotence() {
    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..50 {
        let forest = random_forest(&mut rng, 40);
        let once = reduce_to_main_line(&forest);
        let twice = reduce_to_main_line(&Collection::from(once.clone()));
        assert_eq!(once, twice);
    }
}

#[test]
fn test_main_line_is_strictly_linear() {
    let mut rng = fastrand::Rng::with_seed(5);
    let forest = random_forest(&mut rng, 200);
    let chain = Collection::from(reduce_to_main_line(&forest));
    let mut id = chain.first_root();
    while let Some(current) = id {
        let node = chain.node(current);
        assert!(node.children.len() <= 1);
        id = node.children.first().copied();
    }
}

#[test]
fn test_extract_main_route_roundtrip() {
    let text = "(;SZ[19];B[pd](;W[dd];B[pp])(;W[dp]))";
    let pruned = extract_main_route(text);
    assert_eq!(pruned, "(;SZ[19];B[pd];W[dd];B[pp])");
    assert_eq!(extract_main_route(&pruned), pruned);
}

// =============================================================================
// Simulation
// =============================================================================

#[test]
fn test_corner_capture_scenario() {
    let record = GameRecord::from_sgf("(;SZ[19];B[aa];W[ba];B[pd];W[ab])");
    assert_eq!(record.moves.len(), 4);

    let before = record.simulate(Some(3));
    assert_eq!(before.board.get(0, 0), Some(Color::Black));

    let after = record.simulate(None);
    assert_eq!(after.board.get(0, 0), None);
    assert_eq!(after.board.get(1, 0), Some(Color::White));
    assert_eq!(after.board.get(0, 1), Some(Color::White));
    assert_eq!(after.last_move, Some(Move::new(Color::White, 0, 1)));
}

#[test]
fn test_suicide_scenario() {
    // White plays into a point enclosed by Black and vanishes.
    let record = GameRecord::from_sgf("(;SZ[19];B[ba];W[pd];B[ab];W[aa])");
    let sim = record.simulate(None);
    assert_eq!(sim.board.get(0, 0), None);
    assert_eq!(sim.board.count(Color::Black), 2);
    assert_eq!(sim.board.count(Color::White), 1);
}

#[test]
fn test_upto_zero_is_setup_only() {
    let record = GameRecord::from_sgf("(;AB[dd][pp]AW[dp];B[pd];W[qq])");
    let sim = record.simulate(Some(0));
    let stones: Vec<Move> = sim.board.stones().collect();
    assert_eq!(stones.len(), 3);
    assert!(record.setup.iter().all(|s| stones.contains(s)));
    assert_eq!(sim.last_move, None);

    let empty = GameRecord::from_sgf("(;SZ[19])").simulate(None);
    assert_eq!(empty.board.stones().count(), 0);
}

#[test]
fn test_move_count_monotonicity() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..10 {
        let moves = random_game(&mut rng, 120);
        let record = GameRecord::from_sgf(&record_text(&moves));
        assert_eq!(record.moves, moves);

        for k in 0..moves.len() {
            let a = record.simulate(Some(k)).board;
            let b = record.simulate(Some(k + 1)).board;
            let mut added = Vec::new();
            for x in 0..19 {
                for y in 0..19 {
                    match (a.get(x, y), b.get(x, y)) {
                        (before, Some(color)) if before != Some(color) => {
                            added.push(Move::new(color, x, y))
                        }
                        _ => {}
                    }
                }
            }
            assert!(added.len() <= 1, "move {k} added {added:?}");
            if let Some(stone) = added.first() {
                assert_eq!(*stone, moves[k]);
            }
        }
    }
}

#[test]
fn test_simulate_matches_incremental_play() {
    let mut rng = fastrand::Rng::with_seed(99);
    let moves = random_game(&mut rng, 200);
    let mut board = Board::new(19);
    for mv in &moves {
        board.play(mv.x, mv.y, mv.color);
    }
    assert_eq!(simulate(19, &[], &moves, None).board, board);
}

#[test]
fn test_fresh_board_per_call() {
    let record = GameRecord::from_sgf("(;B[dd];W[pp])");
    let first = record.simulate(None);
    let second = record.simulate(None);
    assert_eq!(first, second);
    assert_eq!(record.simulate(Some(1)).board.count(Color::White), 0);
}

// =============================================================================
// Turn oracle
// =============================================================================

#[test]
fn test_turn_default_and_inference() {
    assert_eq!(next_turn("", None), Color::Black);
    assert_eq!(next_turn("(;SZ[19];B[pd])", None), Color::White);
    assert_eq!(next_turn("(;SZ[19];B[pd];W[dd])", Some(3)), Color::White);
}

#[test]
fn test_turn_agrees_with_move_list() {
    let mut rng = fastrand::Rng::with_seed(17);
    let moves = random_game(&mut rng, 31);
    let text = record_text(&moves);
    let line: MainLine = reduce_to_main_line(&parse(&text));
    assert_eq!(extract_moves(&line).len(), 31);
    assert_eq!(next_turn(&text, None), Color::White);
    assert_eq!(next_turn(&text, Some(31)), Color::White);
}
