//! Constants for board geometry, coordinate alphabets and record parsing.
//!
//! The engine targets the standard 19x19 board. Other sizes declared through
//! the `SZ` property are handled on a best-effort basis up to
//! [`MAX_BOARD_SIZE`], which is bounded by the display alphabet.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size used when a record declares none, or declares one we reject.
pub const DEFAULT_BOARD_SIZE: usize = 19;

/// Smallest board size accepted from an `SZ` property.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest board size accepted from an `SZ` property.
pub const MAX_BOARD_SIZE: usize = 25;

// =============================================================================
// Coordinate Alphabets
// =============================================================================

/// Column letters for display coordinates. `I` is never used.
pub const DISPLAY_COLUMNS: &[u8; 25] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// First letter of an SGF coordinate (index 0).
pub const SGF_BASE: u8 = b'a';

/// Legacy pass token, only meaningful on boards of 19 lines or fewer.
pub const PASS_TOKEN: &str = "tt";

// =============================================================================
// Cell Encoding
// =============================================================================

/// Numeric value of a black stone in exported grids.
pub const CELL_BLACK: i8 = 1;

/// Numeric value of a white stone in exported grids.
pub const CELL_WHITE: i8 = -1;

/// Numeric value of an empty point in exported grids.
pub const CELL_EMPTY: i8 = 0;
