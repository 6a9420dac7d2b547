//! Board coordinates and the notations used to exchange them.
//!
//! Three systems are in play:
//! - zero-based grid cells, `(0, 0)` being the top-left corner;
//! - SGF notation, two lowercase letters (`"dp"`), used by every packed
//!   stone/move list the engine receives;
//! - GTP notation, a column letter skipping `I` plus a row counted from the
//!   bottom (`"D4"`).
//!
//! A pass is the reserved cell `x == -1` and round-trips through both
//! notations (`".."` and `"PASS"`).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Color;
use crate::constants::{GTP_COLUMNS, GTP_PASS, PASS_X, SGF_PASS};
use crate::position::Mark;

/// A board coordinate, or the pass sentinel.
///
/// Serialized as a `[x, y]` array. Deserialization accepts longer arrays and
/// ignores the tail, which is how move records carry their timing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "[i32; 2]")]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// The canonical pass move.
    pub const PASS: Cell = Cell { x: PASS_X, y: PASS_X };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Only `x` is significant for the sentinel.
    #[inline]
    pub fn is_pass(self) -> bool {
        self.x == PASS_X
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass() {
            write!(f, "pass")
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

impl TryFrom<Vec<i32>> for Cell {
    type Error = CoordError;

    fn try_from(v: Vec<i32>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [x, y, ..] => Ok(Cell::new(*x, *y)),
            _ => Err(CoordError::Truncated { offset: v.len() }),
        }
    }
}

impl From<Cell> for [i32; 2] {
    fn from(c: Cell) -> Self {
        [c.x, c.y]
    }
}

/// Malformed coordinate input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordError {
    /// Input ended in the middle of a record.
    #[error("encoded coordinates truncated at offset {offset}")]
    Truncated { offset: usize },
    /// Column character outside the notation's alphabet.
    #[error("invalid column '{0}'")]
    InvalidColumn(char),
    /// Row outside the notation's range.
    #[error("invalid row '{0}'")]
    InvalidRow(String),
    /// Stone record tagged with something other than `B` or `W`.
    #[error("invalid colour tag '{0}'")]
    InvalidTag(char),
    /// Record at `offset` is not wrapped in `[` and `]`.
    #[error("missing brackets in record at offset {offset}")]
    MissingBrackets { offset: usize },
}

fn sgf_axis(b: u8) -> Option<i32> {
    b.is_ascii_lowercase().then(|| (b - b'a') as i32)
}

/// Decode the two SGF characters starting at `offset` in `code`.
///
/// Packed lists are concatenations of fixed-size records, hence the offset.
pub fn cell_from_sgf(code: &str, offset: usize) -> Result<Cell, CoordError> {
    let bytes = code.as_bytes();
    let pair = bytes
        .get(offset..offset + 2)
        .ok_or(CoordError::Truncated { offset })?;
    if pair == SGF_PASS.as_bytes() {
        return Ok(Cell::PASS);
    }
    let x = sgf_axis(pair[0]).ok_or(CoordError::InvalidColumn(pair[0] as char))?;
    let y = sgf_axis(pair[1]).ok_or_else(|| CoordError::InvalidRow((pair[1] as char).to_string()))?;
    Ok(Cell::new(x, y))
}

/// Encode a cell as two SGF characters. A pass encodes as `".."`.
pub fn cell_to_sgf(cell: Cell) -> String {
    if cell.is_pass() {
        return SGF_PASS.to_string();
    }
    format!("{}{}", sgf_char(cell.x), sgf_char(cell.y))
}

/// `'?'` for values outside `a..=z`, which no decoder accepts.
fn sgf_char(v: i32) -> char {
    u8::try_from(v)
        .ok()
        .filter(|&v| v < 26)
        .map_or('?', |v| (b'a' + v) as char)
}

/// Parse a GTP vertex such as `"D4"` or `"pass"`.
///
/// GTP numbers rows from the bottom, so the board height is needed to map
/// back onto top-left based cells.
pub fn cell_from_gtp(code: &str, board_height: i32) -> Result<Cell, CoordError> {
    let code = code.trim();
    if code.eq_ignore_ascii_case(GTP_PASS) {
        return Ok(Cell::PASS);
    }
    let mut chars = code.chars();
    let col_char = chars
        .next()
        .ok_or(CoordError::Truncated { offset: 0 })?
        .to_ascii_uppercase();
    let x = GTP_COLUMNS
        .iter()
        .position(|&c| c as char == col_char)
        .ok_or(CoordError::InvalidColumn(col_char))? as i32;

    let row_str = chars.as_str();
    let row: i32 = row_str
        .parse()
        .map_err(|_| CoordError::InvalidRow(row_str.to_string()))?;
    if row < 1 || row > board_height {
        return Err(CoordError::InvalidRow(row_str.to_string()));
    }
    Ok(Cell::new(x, board_height - row))
}

/// Format a cell as a GTP vertex. A pass formats as `"PASS"`.
pub fn cell_to_gtp(cell: Cell, board_height: i32) -> String {
    if cell.is_pass() {
        return GTP_PASS.to_string();
    }
    let column = GTP_COLUMNS.get(cell.x as usize).map_or('?', |&b| b as char);
    format!("{column}{}", board_height - cell.y)
}

/// Decode a packed list of two-character SGF cells (`"pddp"`).
pub fn decode_cells(encoded: &str) -> Result<Vec<Cell>, CoordError> {
    (0..encoded.len())
        .step_by(2)
        .map(|i| cell_from_sgf(encoded, i))
        .collect()
}

/// Inverse of [`decode_cells`].
pub fn encode_cells<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> String {
    cells.into_iter().map(|&c| cell_to_sgf(c)).collect()
}

/// The `len`-byte record at `offset`: a one-byte tag, then a bracketed body.
fn record_tag(encoded: &str, offset: usize, len: usize) -> Result<u8, CoordError> {
    let bytes = encoded
        .as_bytes()
        .get(offset..offset + len)
        .ok_or(CoordError::Truncated { offset })?;
    if bytes[1] != b'[' || bytes[len - 1] != b']' {
        return Err(CoordError::MissingBrackets { offset });
    }
    Ok(bytes[0])
}

/// Decode colour-tagged stones packed as `B[dd]W[pp]`, five characters each.
pub fn decode_stones(encoded: &str) -> Result<Vec<(Color, Cell)>, CoordError> {
    (0..encoded.len())
        .step_by(5)
        .map(|i| {
            let color = match record_tag(encoded, i, 5)? {
                b'B' => Color::Black,
                b'W' => Color::White,
                tag => return Err(CoordError::InvalidTag(tag as char)),
            };
            Ok((color, cell_from_sgf(encoded, i + 2)?))
        })
        .collect()
}

/// Decode labelled marks packed as `A[dd]`, five characters each.
pub fn decode_marks(encoded: &str) -> Result<Vec<Mark>, CoordError> {
    (0..encoded.len())
        .step_by(5)
        .map(|i| {
            let label = record_tag(encoded, i, 5)?;
            Ok(Mark {
                placement: cell_from_sgf(encoded, i + 2)?,
                text: (label as char).to_string(),
            })
        })
        .collect()
}

/// Decode labelled rectangles packed as `A[ddff]`, seven characters each.
///
/// Every rectangle is expanded into one mark per covered cell; the two
/// corners may come in any order.
pub fn decode_areas(encoded: &str) -> Result<Vec<Mark>, CoordError> {
    let mut marks = Vec::new();
    for i in (0..encoded.len()).step_by(7) {
        let label = record_tag(encoded, i, 7)?;
        let c1 = cell_from_sgf(encoded, i + 2)?;
        let c2 = cell_from_sgf(encoded, i + 4)?;
        let text = (label as char).to_string();
        for x in c1.x.min(c2.x)..=c1.x.max(c2.x) {
            for y in c1.y.min(c2.y)..=c1.y.max(c2.y) {
                marks.push(Mark {
                    placement: Cell::new(x, y),
                    text: text.clone(),
                });
            }
        }
    }
    Ok(marks)
}
