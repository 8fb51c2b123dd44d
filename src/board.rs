//! Board grid and capture engine.
//!
//! A [`Board`] is a square grid of optional stones indexed by `(x, y)` with
//! `(0, 0)` at the top-left corner. Stones are placed without any legality
//! check beyond bounds: a recorded game is replayed as written. After each
//! placement, adjacent enemy groups left without liberties are removed, then
//! the played group itself is removed if it has none (suicide vanishes
//! rather than being rejected). Ko is not tracked.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{CELL_BLACK, CELL_EMPTY, CELL_WHITE, DISPLAY_COLUMNS};
use crate::moves::Move;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Numeric cell value shared with rendering consumers.
    pub fn cell_value(self) -> i8 {
        match self {
            Color::Black => CELL_BLACK,
            Color::White => CELL_WHITE,
        }
    }

    /// The SGF move property letter.
    pub fn letter(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Color::Black),
            "w" | "white" => Ok(Color::White),
            _ => Err(format!("unknown color '{s}' (expected black or white)")),
        }
    }
}

pub type Point = (usize, usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.cells[self.idx(x, y)]
    }

    fn set(&mut self, x: usize, y: usize, value: Option<Color>) {
        let i = self.idx(x, y);
        self.cells[i] = value;
    }

    fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = Point> + '_ {
        let s = self.size;
        let mut v = Vec::with_capacity(4);
        if x > 0 {
            v.push((x - 1, y));
        }
        if x + 1 < s {
            v.push((x + 1, y));
        }
        if y > 0 {
            v.push((x, y - 1));
        }
        if y + 1 < s {
            v.push((x, y + 1));
        }
        v.into_iter()
    }

    /// Put a stone down with no capture resolution (setup stones).
    ///
    /// Returns false if the point is off the board.
    pub fn place(&mut self, x: usize, y: usize, color: Color) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        self.set(x, y, Some(color));
        true
    }

    /// Play a stone and resolve captures.
    ///
    /// An occupied point is overwritten. Enemy groups adjacent to the new
    /// stone that have no liberty left are removed first; then the played
    /// group is removed if it has no liberty either.
    pub fn play(&mut self, x: usize, y: usize, color: Color) -> MoveResult {
        if !self.in_bounds(x, y) {
            return MoveResult::off_board();
        }
        if let Some(previous) = self.get(x, y) {
            debug!(x, y, %previous, "move overwrites an occupied point");
        }
        self.set(x, y, Some(color));

        let opp = color.opposite();
        let mut captures = 0;
        let adjacent: Vec<Point> = self.neighbors(x, y).collect();
        for (nx, ny) in adjacent {
            // A group touching the stone twice is already gone on the second visit.
            if self.get(nx, ny) == Some(opp) && !self.has_liberty(nx, ny) {
                captures += self.remove_group(nx, ny);
            }
        }

        if !self.has_liberty(x, y) {
            let lost = self.remove_group(x, y);
            debug!(x, y, lost, "suicide removes the played group");
            return MoveResult {
                legal: true,
                captures,
                suicide: true,
            };
        }
        MoveResult {
            legal: true,
            captures,
            suicide: false,
        }
    }

    /// Every stone connected to `(x, y)` through same-colored neighbors.
    pub fn group(&self, x: usize, y: usize) -> Vec<Point> {
        let mut out = Vec::new();
        self.collect_group(x, y, &mut out);
        out
    }

    fn collect_group(&self, x: usize, y: usize, out: &mut Vec<Point>) -> usize {
        let Some(color) = self.get(x, y) else {
            return 0;
        };
        let mut stack = vec![(x, y)];
        let mut visited = vec![false; self.size * self.size];
        let mut count = 0;
        while let Some((cx, cy)) = stack.pop() {
            let i = self.idx(cx, cy);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            if self.get(cx, cy) == Some(color) {
                out.push((cx, cy));
                count += 1;
                for (nx, ny) in self.neighbors(cx, cy) {
                    let ni = self.idx(nx, ny);
                    if !visited[ni] && self.get(nx, ny) == Some(color) {
                        stack.push((nx, ny));
                    }
                }
            }
        }
        count
    }

    fn remove_group(&mut self, x: usize, y: usize) -> usize {
        let mut group = Vec::new();
        let count = self.collect_group(x, y, &mut group);
        for (gx, gy) in group {
            self.set(gx, gy, None);
        }
        count
    }

    /// Whether the group at `(x, y)` touches any empty point.
    ///
    /// Stops at the first liberty found. An empty or off-board point has none.
    pub fn has_liberty(&self, x: usize, y: usize) -> bool {
        let Some(color) = self.get(x, y) else {
            return false;
        };
        let mut stack = vec![(x, y)];
        let mut visited = vec![false; self.size * self.size];
        while let Some((cx, cy)) = stack.pop() {
            let i = self.idx(cx, cy);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            for (nx, ny) in self.neighbors(cx, cy) {
                match self.get(nx, ny) {
                    None => return true,
                    Some(c) if c == color && !visited[self.idx(nx, ny)] => stack.push((nx, ny)),
                    _ => {}
                }
            }
        }
        false
    }

    /// Count distinct liberties of the group at `(x, y)`.
    pub fn group_liberties(&self, x: usize, y: usize) -> usize {
        let Some(color) = self.get(x, y) else {
            return 0;
        };
        let mut stack = vec![(x, y)];
        let mut visited = vec![false; self.size * self.size];
        let mut liberty_visited = vec![false; self.size * self.size];
        let mut liberties = 0;
        while let Some((cx, cy)) = stack.pop() {
            let i = self.idx(cx, cy);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            for (nx, ny) in self.neighbors(cx, cy) {
                let ni = self.idx(nx, ny);
                match self.get(nx, ny) {
                    None if !liberty_visited[ni] => {
                        liberty_visited[ni] = true;
                        liberties += 1;
                    }
                    Some(c) if c == color && !visited[ni] => stack.push((nx, ny)),
                    _ => {}
                }
            }
        }
        liberties
    }

    /// All stones on the board, in row-major order.
    pub fn stones(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            cell.map(|color| Move {
                color,
                x: i % self.size,
                y: i / self.size,
            })
        })
    }

    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    /// The grid as numbers (black 1, white -1, empty 0), indexed `[x][y]`.
    pub fn to_matrix(&self) -> Vec<Vec<i8>> {
        (0..self.size)
            .map(|x| {
                (0..self.size)
                    .map(|y| self.get(x, y).map_or(CELL_EMPTY, Color::cell_value))
                    .collect()
            })
            .collect()
    }

    /// Text diagram with display coordinates, marking `last` with brackets.
    pub fn render(&self, last: Option<Point>) -> String {
        let mut out = String::from("  ");
        for &c in DISPLAY_COLUMNS.iter().take(self.size) {
            out.push(' ');
            out.push(c as char);
        }
        out.push('\n');
        for y in 0..self.size {
            out.push_str(&format!("{:>2}", self.size - y));
            for x in 0..self.size {
                let sep = if last == Some((x, y)) {
                    '['
                } else if x > 0 && last == Some((x - 1, y)) {
                    ']'
                } else {
                    ' '
                };
                out.push(sep);
                out.push(match self.get(x, y) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                });
            }
            if self.size > 0 && last == Some((self.size - 1, y)) {
                out.push(']');
            }
            out.push('\n');
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// False only when the point is off the board; nothing changed then.
    pub legal: bool,
    pub captures: usize,
    pub suicide: bool,
}

impl MoveResult {
    fn off_board() -> Self {
        MoveResult {
            legal: false,
            captures: 0,
            suicide: false,
        }
    }
}

/// Board state after replaying a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Simulation {
    pub board: Board,
    /// Last move replayed, for "last move" markers.
    pub last_move: Option<Move>,
    /// Number of moves replayed.
    pub applied: usize,
}

/// Replay `moves` on a fresh board after placing `setup` stones.
///
/// Setup stones go down without capture checks. Only the first `up_to`
/// moves are replayed when given; a limit past the end replays everything.
/// Moves off the board are skipped.
pub fn simulate(size: usize, setup: &[Move], moves: &[Move], up_to: Option<usize>) -> Simulation {
    let mut board = Board::new(size);
    for stone in setup {
        if !board.place(stone.x, stone.y, stone.color) {
            debug!(x = stone.x, y = stone.y, "setup stone off the board");
        }
    }

    let limit = up_to.unwrap_or(moves.len()).min(moves.len());
    let mut last_move = None;
    for mv in &moves[..limit] {
        if board.play(mv.x, mv.y, mv.color).legal {
            last_move = Some(*mv);
        } else {
            debug!(x = mv.x, y = mv.y, "move off the board");
        }
    }

    Simulation {
        board,
        last_move,
        applied: limit,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}
