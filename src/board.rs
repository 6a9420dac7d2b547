//! Stone colours, board adjacency and group liberty analysis.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DELTA;
use crate::coord::Cell;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Character used when drawing the board.
    pub fn symbol(self) -> char {
        match self {
            Color::Black => 'X',
            Color::White => 'O',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown color '{0}'")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Color::Black),
            "w" | "white" => Ok(Color::White),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

/// Whether `cell` lies on a `width` x `height` board. A pass never does.
#[inline]
pub fn on_board(cell: Cell, width: i32, height: i32) -> bool {
    cell.x >= 0 && cell.y >= 0 && cell.x < width && cell.y < height
}

/// The up to 4 orthogonal neighbours of `cell` that lie on the board.
pub fn neighbors(cell: Cell, width: i32, height: i32) -> impl Iterator<Item = Cell> {
    DELTA
        .into_iter()
        .map(move |(dx, dy)| Cell::new(cell.x + dx, cell.y + dy))
        .filter(move |&n| on_board(n, width, height))
}

/// Find the group containing `origin` if it has no liberties.
///
/// `group_stones` holds the stones of the group's colour, `other_stones` the
/// other colour. The walk stops as soon as any visited stone touches a cell
/// that is in neither set, in which case the group is alive and `None` is
/// returned. Otherwise the whole surrounded group is returned.
///
/// Capture detection calls this with the opponent's stones as `group_stones`;
/// suicide detection with the mover's own.
pub fn find_dead_group(
    group_stones: &FxHashSet<Cell>,
    other_stones: &FxHashSet<Cell>,
    origin: Cell,
    width: i32,
    height: i32,
) -> Option<FxHashSet<Cell>> {
    let mut stack = vec![origin];
    let mut visited = FxHashSet::default();
    visited.insert(origin);

    while let Some(current) = stack.pop() {
        for n in neighbors(current, width, height) {
            if group_stones.contains(&n) {
                if visited.insert(n) {
                    stack.push(n);
                }
            } else if !other_stones.contains(&n) {
                return None;
            }
        }
    }
    Some(visited)
}
