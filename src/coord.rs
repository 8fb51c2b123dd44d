//! Coordinate transcoding between SGF, display and grid forms.
//!
//! Three encodings name the same point:
//! - SGF letter pairs, column then row, both from `a` (`"pd"`)
//! - display labels, a column letter skipping `I` and a row counted from the
//!   bottom edge (`"Q16"`)
//! - integer grid indices `(x, y)` with `(0, 0)` at the top-left corner
//!
//! Every function is total: out-of-range or malformed input yields `None`.
//! The plain functions assume a 19x19 board; the `_on` variants take the
//! board size explicitly.

use crate::board::Point;
use crate::constants::{DEFAULT_BOARD_SIZE, DISPLAY_COLUMNS, SGF_BASE};

/// Parse an SGF coordinate (`"pd"`) on a 19x19 board.
pub fn sgf_to_xy(s: &str) -> Option<Point> {
    sgf_to_xy_on(s, DEFAULT_BOARD_SIZE)
}

/// Parse an SGF coordinate for a board of the given size.
pub fn sgf_to_xy_on(s: &str, size: usize) -> Option<Point> {
    match s.as_bytes() {
        &[cx, cy] => Some((sgf_index(cx, size)?, sgf_index(cy, size)?)),
        _ => None,
    }
}

fn sgf_index(b: u8, size: usize) -> Option<usize> {
    if !b.is_ascii_lowercase() {
        return None;
    }
    let i = (b - SGF_BASE) as usize;
    (i < size).then_some(i)
}

/// Format grid indices as an SGF coordinate on a 19x19 board.
pub fn xy_to_sgf(x: usize, y: usize) -> Option<String> {
    xy_to_sgf_on(x, y, DEFAULT_BOARD_SIZE)
}

/// Format grid indices as an SGF coordinate for a board of the given size.
pub fn xy_to_sgf_on(x: usize, y: usize, size: usize) -> Option<String> {
    if x >= size || y >= size || size > 26 {
        return None;
    }
    let mut s = String::with_capacity(2);
    s.push((SGF_BASE + x as u8) as char);
    s.push((SGF_BASE + y as u8) as char);
    Some(s)
}

/// Parse a display coordinate (`"Q16"`) on a 19x19 board.
///
/// The column letter must be uppercase and may not be `I`. The row is one or
/// two decimal digits without a leading zero.
pub fn display_to_xy(s: &str) -> Option<Point> {
    display_to_xy_on(s, DEFAULT_BOARD_SIZE)
}

/// Parse a display coordinate for a board of the given size.
pub fn display_to_xy_on(s: &str, size: usize) -> Option<Point> {
    let columns = DISPLAY_COLUMNS.get(..size)?;
    let (&letter, digits) = s.as_bytes().split_first()?;
    let x = columns.iter().position(|&c| c == letter)?;

    if digits.is_empty() || digits.len() > 2 || digits[0] == b'0' {
        return None;
    }
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let row = digits
        .iter()
        .fold(0usize, |acc, &d| acc * 10 + (d - b'0') as usize);
    if row > size {
        return None;
    }

    Some((x, size - row))
}

/// Format grid indices as a display coordinate on a 19x19 board.
pub fn xy_to_display(x: usize, y: usize) -> Option<String> {
    xy_to_display_on(x, y, DEFAULT_BOARD_SIZE)
}

/// Format grid indices as a display coordinate for a board of the given size.
pub fn xy_to_display_on(x: usize, y: usize, size: usize) -> Option<String> {
    let columns = DISPLAY_COLUMNS.get(..size)?;
    if y >= size {
        return None;
    }
    let letter = *columns.get(x)? as char;
    Some(format!("{letter}{}", size - y))
}

/// Convert `"pd"` to `"Q16"`.
pub fn sgf_to_display(s: &str) -> Option<String> {
    let (x, y) = sgf_to_xy(s)?;
    xy_to_display(x, y)
}

/// Convert `"Q16"` to `"pd"`.
pub fn display_to_sgf(s: &str) -> Option<String> {
    let (x, y) = display_to_xy(s)?;
    xy_to_sgf(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sgf_corners() {
        assert_eq!(sgf_to_xy("aa"), Some((0, 0)));
        assert_eq!(sgf_to_xy("sa"), Some((18, 0)));
        assert_eq!(sgf_to_xy("as"), Some((0, 18)));
        assert_eq!(sgf_to_xy("pd"), Some((15, 3)));
    }

    #[test]
    fn test_sgf_rejects_malformed() {
        assert_eq!(sgf_to_xy(""), None);
        assert_eq!(sgf_to_xy("a"), None);
        assert_eq!(sgf_to_xy("aaa"), None);
        assert_eq!(sgf_to_xy("tt"), None);
        assert_eq!(sgf_to_xy("Aa"), None);
        assert_eq!(sgf_to_xy("a1"), None);
        assert_eq!(sgf_to_xy("é"), None);
    }

    #[test]
    fn test_sgf_sized() {
        assert_eq!(sgf_to_xy_on("ii", 9), Some((8, 8)));
        assert_eq!(sgf_to_xy_on("jj", 9), None);
        assert_eq!(sgf_to_xy_on("ja", 9), None);
        assert_eq!(sgf_to_xy_on("hh", 9), Some((7, 7)));
        assert_eq!(sgf_to_xy_on("tt", 21), Some((19, 19)));
    }

    #[test]
    fn test_xy_to_sgf_out_of_range() {
        assert_eq!(xy_to_sgf(19, 0), None);
        assert_eq!(xy_to_sgf(0, 19), None);
        assert_eq!(xy_to_sgf(3, 15).as_deref(), Some("dp"));
    }

    #[test]
    fn test_display_parse() {
        assert_eq!(display_to_xy("A19"), Some((0, 0)));
        assert_eq!(display_to_xy("A1"), Some((0, 18)));
        assert_eq!(display_to_xy("T1"), Some((18, 18)));
        assert_eq!(display_to_xy("J10"), Some((8, 9)));
        assert_eq!(display_to_xy("Q4"), Some((15, 15)));
    }

    #[test]
    fn test_display_skips_i() {
        assert_eq!(display_to_xy("I5"), None);
        assert_eq!(display_to_xy("H5"), Some((7, 14)));
        assert_eq!(display_to_xy("J5"), Some((8, 14)));
    }

    #[test]
    fn test_display_rejects_malformed() {
        for s in ["", "A", "A0", "A20", "A05", "U3", "a3", "A1x", "A100", "3A"] {
            assert_eq!(display_to_xy(s), None, "{s} should be invalid");
        }
    }

    #[test]
    fn test_display_format() {
        assert_eq!(xy_to_display(0, 0).as_deref(), Some("A19"));
        assert_eq!(xy_to_display(8, 18).as_deref(), Some("J1"));
        assert_eq!(xy_to_display(19, 0), None);
        assert_eq!(xy_to_display_on(8, 0, 9).as_deref(), Some("J9"));
        assert_eq!(xy_to_display_on(0, 0, 26), None);
    }

    #[test]
    fn test_roundtrip_all_points() {
        for x in 0..19 {
            for y in 0..19 {
                let sgf = xy_to_sgf(x, y).unwrap();
                assert_eq!(sgf_to_xy(&sgf), Some((x, y)), "sgf roundtrip for {sgf}");
                let disp = xy_to_display(x, y).unwrap();
                assert_eq!(display_to_xy(&disp), Some((x, y)), "display roundtrip for {disp}");
            }
        }
    }

    #[test]
    fn test_cross_conversion() {
        assert_eq!(sgf_to_display("pd").as_deref(), Some("Q16"));
        assert_eq!(display_to_sgf("D4").as_deref(), Some("dp"));
        assert_eq!(display_to_sgf("I4"), None);
    }
}
