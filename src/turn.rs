//! Deciding whose move is next.
//!
//! Sources are consulted in priority order:
//! 1. an explicit turn annotation supplied by the caller
//! 2. an explicit count of moves already played (even: Black, odd: White)
//! 3. the move property on the last node of the record's main line
//!
//! With nothing to go on, Black is to play. Malformed records never fail;
//! they simply fall through to that default.

use crate::board::Color;
use crate::mainline::{MainLine, reduce_to_main_line};
use crate::sgf::{self, PropIdent};

/// Next player for a record, optionally after `explicit_move_count` moves.
pub fn next_turn(sgf_text: &str, explicit_move_count: Option<usize>) -> Color {
    next_turn_with(sgf_text, None, explicit_move_count)
}

/// Like [`next_turn`], but an `annotation` from the caller wins outright.
pub fn next_turn_with(
    sgf_text: &str,
    annotation: Option<Color>,
    explicit_move_count: Option<usize>,
) -> Color {
    if let Some(color) = annotation {
        return color;
    }
    if let Some(count) = explicit_move_count {
        return turn_after(count);
    }
    turn_after_line(&reduce_to_main_line(&sgf::parse(sgf_text)))
}

/// Player to move once `count` moves have been played from an empty board.
pub fn turn_after(count: usize) -> Color {
    if count % 2 == 0 {
        Color::Black
    } else {
        Color::White
    }
}

/// Opposite of the color that moved on the last node; `W` wins a tie.
///
/// Only the last node is inspected. A trailing node without a move
/// (a comment, a setup node) yields Black.
pub fn turn_after_line(line: &MainLine) -> Color {
    match line.last() {
        Some(props) if props.has(&PropIdent::White) => Color::Black,
        Some(props) if props.has(&PropIdent::Black) => Color::White,
        _ => Color::Black,
    }
}
