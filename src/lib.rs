//! Kifu-Rust: a Go game record engine.
//!
//! This crate reads game records in SGF, reduces them to their main line,
//! replays the moves on a board with capture resolution, and converts between
//! the coordinate systems used to talk about points. Every operation is a pure
//! function of its input; malformed records degrade to empty results instead
//! of failing.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, alphabets and cell encoding
//! - [`coord`] - SGF, display and grid coordinate conversion
//! - [`sgf`] - Tolerant SGF parser, node arena and serializer
//! - [`mainline`] - Variation pruning
//! - [`moves`] - Move and setup-stone extraction
//! - [`board`] - Board grid, capture engine and replay
//! - [`turn`] - Whose move is next
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use kifu_rust::board::Color;
//! use kifu_rust::moves::GameRecord;
//! use kifu_rust::turn::next_turn;
//!
//! let sgf = "(;SZ[19];B[aa];W[ba];B[pd];W[ab])";
//! let record = GameRecord::from_sgf(sgf);
//! let sim = record.simulate(None);
//!
//! // White's second move captured the black corner stone.
//! assert_eq!(sim.board.get(0, 0), None);
//! assert_eq!(next_turn(sgf, None), Color::Black);
//! ```

pub mod board;
pub mod constants;
pub mod coord;
pub mod error;
pub mod mainline;
pub mod moves;
pub mod sgf;
pub mod turn;
