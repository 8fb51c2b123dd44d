//! Move extraction from a main line, plus setup stones and board size.
//!
//! `B`/`W` values become timed moves in play order. An empty value, or `tt`
//! on boards of 19 lines or fewer, is a pass and yields nothing. `AB`/`AW`
//! values are setup stones: they form the starting position and are never
//! interleaved with moves. Malformed coordinates are skipped.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{self, Color, Point, Simulation};
use crate::constants::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE, PASS_TOKEN};
use crate::coord::{sgf_to_xy_on, xy_to_display_on, xy_to_sgf_on};
use crate::error::{KifuError, Result};
use crate::mainline::{MainLine, reduce_to_main_line};
use crate::sgf::{self, PropIdent, Properties};

/// A stone of one color at a grid point. Used for moves and setup stones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub color: Color,
    pub x: usize,
    pub y: usize,
}

impl Move {
    pub fn new(color: Color, x: usize, y: usize) -> Self {
        Self { color, x, y }
    }

    pub fn point(&self) -> Point {
        (self.x, self.y)
    }

    pub fn sgf_coord(&self, size: usize) -> Option<String> {
        xy_to_sgf_on(self.x, self.y, size)
    }

    pub fn display_coord(&self, size: usize) -> Option<String> {
        xy_to_display_on(self.x, self.y, size)
    }
}

/// Parse an `SZ` value: `"19"`, or a square `"19:19"`.
pub fn parse_board_size(value: &str) -> Result<usize> {
    let malformed = || KifuError::MalformedBoardSize {
        value: value.to_string(),
    };
    let value = value.trim();
    let size = match value.split_once(':') {
        Some((w, h)) if w.trim() == h.trim() => w.trim().parse::<usize>(),
        Some(_) => return Err(malformed()),
        None => value.parse::<usize>(),
    }
    .map_err(|_| malformed())?;

    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(KifuError::BoardSizeOutOfRange {
            size,
            min: MIN_BOARD_SIZE,
            max: MAX_BOARD_SIZE,
        });
    }
    Ok(size)
}

/// Board size declared on the root node, or 19.
pub fn board_size(line: &MainLine) -> usize {
    let Some(value) = line.root().and_then(Properties::size) else {
        return DEFAULT_BOARD_SIZE;
    };
    match parse_board_size(value) {
        Ok(size) => size,
        Err(err) => {
            warn!(%err, "falling back to {DEFAULT_BOARD_SIZE}x{DEFAULT_BOARD_SIZE}");
            DEFAULT_BOARD_SIZE
        }
    }
}

/// What a `B`/`W` value means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveValue {
    Play(Point),
    Pass,
}

fn decode_move(value: &str, size: usize) -> Result<MoveValue> {
    if value.is_empty() || (value == PASS_TOKEN && size <= 19) {
        return Ok(MoveValue::Pass);
    }
    sgf_to_xy_on(value, size)
        .map(MoveValue::Play)
        .ok_or_else(|| KifuError::MalformedCoordinate {
            coord: value.to_string(),
        })
}

/// Ordered moves of a main line, sized by its `SZ` property.
pub fn extract_moves(line: &MainLine) -> Vec<Move> {
    extract_moves_on(line, board_size(line))
}

/// Ordered moves of a main line for a board of the given size.
///
/// Only the first value of a move property counts. A node carrying both
/// `B` and `W` (malformed) yields the black move first.
pub fn extract_moves_on(line: &MainLine, size: usize) -> Vec<Move> {
    let mut moves = Vec::new();
    for (depth, props) in line.nodes().iter().enumerate() {
        for (color, value) in [
            (Color::Black, props.black_move()),
            (Color::White, props.white_move()),
        ] {
            let Some(value) = value else { continue };
            match decode_move(value, size) {
                Ok(MoveValue::Play((x, y))) => moves.push(Move::new(color, x, y)),
                Ok(MoveValue::Pass) => {}
                Err(err) => debug!(depth, %color, %err, "skipping move"),
            }
        }
    }
    moves
}

/// Expand one setup value: a point, or a compressed rectangle `"aa:cc"`.
fn expand_points(value: &str, size: usize) -> Result<Vec<Point>> {
    let malformed = || KifuError::MalformedCoordinate {
        coord: value.to_string(),
    };
    match value.split_once(':') {
        None => Ok(vec![sgf_to_xy_on(value, size).ok_or_else(malformed)?]),
        Some((from, to)) => {
            let (x1, y1) = sgf_to_xy_on(from, size).ok_or_else(malformed)?;
            let (x2, y2) = sgf_to_xy_on(to, size).ok_or_else(malformed)?;
            let mut points = Vec::new();
            for y in y1.min(y2)..=y1.max(y2) {
                for x in x1.min(x2)..=x1.max(x2) {
                    points.push((x, y));
                }
            }
            Ok(points)
        }
    }
}

/// Setup stones from every `AB`/`AW` on the main line, black before white per node.
pub fn setup_stones(line: &MainLine, size: usize) -> Vec<Move> {
    let mut stones = Vec::new();
    for props in line.nodes() {
        for (color, ident) in [
            (Color::Black, PropIdent::AddBlack),
            (Color::White, PropIdent::AddWhite),
        ] {
            for value in props.values(&ident) {
                match expand_points(value, size) {
                    Ok(points) => {
                        stones.extend(points.into_iter().map(|(x, y)| Move::new(color, x, y)))
                    }
                    Err(err) => debug!(%color, %err, "skipping setup stone"),
                }
            }
        }
    }
    stones
}

/// Everything the board needs from one record: size, setup and moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub size: usize,
    pub setup: Vec<Move>,
    pub moves: Vec<Move>,
    pub line: MainLine,
}

impl GameRecord {
    /// Parse, reduce and extract in one go. Never fails; bad input gives an
    /// empty 19x19 record.
    pub fn from_sgf(text: &str) -> Self {
        Self::from_main_line(reduce_to_main_line(&sgf::parse(text)))
    }

    pub fn from_main_line(line: MainLine) -> Self {
        let size = board_size(&line);
        Self {
            size,
            setup: setup_stones(&line, size),
            moves: extract_moves_on(&line, size),
            line,
        }
    }

    pub fn simulate(&self, up_to: Option<usize>) -> Simulation {
        board::simulate(self.size, &self.setup, &self.moves, up_to)
    }
}
