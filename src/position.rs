//! Go position representation.
//!
//! A [`Position`] is a snapshot of the board after some number of moves: the
//! stones of both colours, capture counts, the scoring overlays (removed
//! spots and territory) and enough bookkeeping to keep replaying from it.
//!
//! Positions are produced by the [`engine`](crate::engine) and shared as
//! `Arc<Position>`. Once built they are never modified; every move, and every
//! dead-stone toggle, yields a new value. Each position may point at the one
//! it was derived from, which forms a forward-only history chain used for ko
//! and double-pass detection.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{Color, on_board};
use crate::coord::{Cell, CoordError, decode_areas, decode_marks, decode_stones};
use crate::handicap::determine_komi;

/// An annotation overlay (label or shape) attached to a cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mark {
    pub placement: Cell,
    pub text: String,
}

/// A Go position (board state).
#[derive(Clone, Debug)]
pub struct Position {
    pub board_width: i32,
    pub board_height: i32,
    pub black_stones: FxHashSet<Cell>,
    pub white_stones: FxHashSet<Cell>,
    /// Spots marked dead (stones) or dame (empty) during scoring
    pub removed_spots: FxHashSet<Cell>,
    pub white_territory: FxHashSet<Cell>,
    pub black_territory: FxHashSet<Cell>,
    /// Stones captured by White
    pub white_capture_count: u32,
    /// Stones captured by Black
    pub black_capture_count: u32,
    pub last_move: Option<Cell>,
    pub last_player_to_move: Option<Color>,
    pub next_to_move: Color,
    /// Compensation points for White
    pub komi: f32,
    pub handicap: u32,
    pub free_handicap_placement: bool,
    /// Number of moves applied since the initial position
    pub current_move_index: usize,
    pub custom_marks: Vec<Mark>,
    /// The position this one was derived from
    pub parent: Option<Arc<Position>>,
}

impl Position {
    /// An empty board with the default komi for its size.
    pub fn new(board_width: i32, board_height: i32) -> Self {
        Position {
            board_width,
            board_height,
            black_stones: FxHashSet::default(),
            white_stones: FxHashSet::default(),
            removed_spots: FxHashSet::default(),
            white_territory: FxHashSet::default(),
            black_territory: FxHashSet::default(),
            white_capture_count: 0,
            black_capture_count: 0,
            last_move: None,
            last_player_to_move: None,
            next_to_move: Color::Black,
            komi: determine_komi(board_height, 0),
            handicap: 0,
            free_handicap_placement: false,
            current_move_index: 0,
            custom_marks: Vec::new(),
            parent: None,
        }
    }

    /// A board with stones placed directly, without checking any rules.
    pub fn setup(board_width: i32, board_height: i32, black: &[Cell], white: &[Cell]) -> Self {
        let mut pos = Position::new(board_width, board_height);
        pos.black_stones.extend(black.iter().copied());
        pos.white_stones.extend(white.iter().copied());
        pos
    }

    /// Add stones from a packed `B[dd]W[pp]` list, as a tutorial or problem
    /// diagram would. Like [`setup`](Self::setup) no rules are checked; a
    /// later record for the same cell replaces the earlier stone.
    pub fn with_stones(mut self, encoded: &str) -> Result<Self, CoordError> {
        for (color, cell) in decode_stones(encoded)? {
            if cell.is_pass() {
                continue;
            }
            self.stones_mut(color.opponent()).remove(&cell);
            self.stones_mut(color).insert(cell);
        }
        Ok(self)
    }

    /// Attach labels packed as `A[dd]` to [`custom_marks`](Self::custom_marks).
    pub fn with_marks(mut self, encoded: &str) -> Result<Self, CoordError> {
        self.custom_marks.extend(decode_marks(encoded)?);
        Ok(self)
    }

    /// Attach labelled rectangles packed as `A[ddff]`, one mark per cell.
    pub fn with_areas(mut self, encoded: &str) -> Result<Self, CoordError> {
        self.custom_marks.extend(decode_areas(encoded)?);
        Ok(self)
    }

    #[inline]
    pub fn is_on_board(&self, cell: Cell) -> bool {
        on_board(cell, self.board_width, self.board_height)
    }

    /// All on-board cells, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let (w, h) = (self.board_width, self.board_height);
        (0..w).flat_map(move |x| (0..h).map(move |y| Cell::new(x, y)))
    }

    pub fn stone_at(&self, cell: Cell) -> Option<Color> {
        if self.black_stones.contains(&cell) {
            Some(Color::Black)
        } else if self.white_stones.contains(&cell) {
            Some(Color::White)
        } else {
            None
        }
    }

    pub fn stones(&self, color: Color) -> &FxHashSet<Cell> {
        match color {
            Color::Black => &self.black_stones,
            Color::White => &self.white_stones,
        }
    }

    pub(crate) fn stones_mut(&mut self, color: Color) -> &mut FxHashSet<Cell> {
        match color {
            Color::Black => &mut self.black_stones,
            Color::White => &mut self.white_stones,
        }
    }

    pub fn territory(&self, color: Color) -> &FxHashSet<Cell> {
        match color {
            Color::Black => &self.black_territory,
            Color::White => &self.white_territory,
        }
    }

    pub(crate) fn territory_mut(&mut self, color: Color) -> &mut FxHashSet<Cell> {
        match color {
            Color::Black => &mut self.black_territory,
            Color::White => &mut self.white_territory,
        }
    }

    /// Stones captured by `color` during play.
    pub fn capture_count(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black_capture_count,
            Color::White => self.white_capture_count,
        }
    }

    pub(crate) fn capture_count_mut(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::Black => &mut self.black_capture_count,
            Color::White => &mut self.white_capture_count,
        }
    }

    pub fn all_stones(&self) -> impl Iterator<Item = (Cell, Color)> + '_ {
        self.black_stones
            .iter()
            .map(|&c| (c, Color::Black))
            .chain(self.white_stones.iter().map(|&c| (c, Color::White)))
    }

    /// A stone that has not been marked dead.
    pub fn is_living_stone(&self, cell: Cell) -> bool {
        self.stone_at(cell).is_some() && !self.removed_spots.contains(&cell)
    }

    /// An empty point explicitly marked neutral.
    pub fn is_marked_dame(&self, cell: Cell) -> bool {
        self.stone_at(cell).is_none() && self.removed_spots.contains(&cell)
    }

    /// Stones of `color` currently marked dead.
    pub fn dead_stones(&self, color: Color) -> impl Iterator<Item = Cell> + '_ {
        self.stones(color)
            .iter()
            .copied()
            .filter(|c| self.removed_spots.contains(c))
    }

    pub fn living_stone_count(&self, color: Color) -> u32 {
        self.stones(color)
            .iter()
            .filter(|c| !self.removed_spots.contains(c))
            .count() as u32
    }

    pub fn has_same_stones_as(&self, other: &Position) -> bool {
        self.black_stones == other.black_stones && self.white_stones == other.white_stones
    }

    /// Ancestors of this position, nearest first.
    pub fn history(&self) -> impl Iterator<Item = &Position> + '_ {
        std::iter::successors(self.parent.as_deref(), |p| p.parent.as_deref())
    }

    /// Both of the last two plies were passes.
    pub fn is_game_over(&self) -> bool {
        let passed = |p: &Position| p.last_move.is_some_and(Cell::is_pass);
        passed(self) && self.parent.as_deref().is_some_and(passed)
    }

    /// The board repeats the one from two plies ago (simple ko).
    pub fn is_illegal_ko(&self) -> bool {
        self.history()
            .nth(1)
            .is_some_and(|grandparent| grandparent.has_same_stones_as(self))
    }

    /// Stones that were on the board in the parent position and are gone now.
    pub fn captured_in_last_move(&self) -> Vec<(Cell, Color)> {
        let Some(parent) = self.parent.as_deref() else {
            return Vec::new();
        };
        parent
            .all_stones()
            .filter(|&(c, color)| self.stone_at(c) != Some(color))
            .collect()
    }

    /// A copy of this position with `removed_spots` updated for `group`.
    ///
    /// Pair with [`toggle_removed`](crate::territory::toggle_removed). The
    /// result is not a new ply: it keeps the same parent and move index.
    pub fn with_removed_toggled(&self, removing: bool, group: &FxHashSet<Cell>) -> Position {
        let mut pos = self.clone();
        if removing {
            pos.removed_spots.extend(group.iter().copied());
        } else {
            pos.removed_spots.retain(|c| !group.contains(c));
        }
        pos
    }
}

impl PartialEq for Position {
    /// Board content and bookkeeping; history links are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.board_width == other.board_width
            && self.board_height == other.board_height
            && self.has_same_stones_as(other)
            && self.removed_spots == other.removed_spots
            && self.white_territory == other.white_territory
            && self.black_territory == other.black_territory
            && self.white_capture_count == other.white_capture_count
            && self.black_capture_count == other.black_capture_count
            && self.last_move == other.last_move
            && self.last_player_to_move == other.last_player_to_move
            && self.next_to_move == other.next_to_move
            && self.komi == other.komi
            && self.current_move_index == other.current_move_index
    }
}

/// Text diagram, top row first.
///
/// `X`/`O` living stones, `x`/`o` dead stones, `*`/`+` black/white
/// territory, `~` dame, `.` empty.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.board_height {
            for x in 0..self.board_width {
                let cell = Cell::new(x, y);
                let removed = self.removed_spots.contains(&cell);
                let ch = match self.stone_at(cell) {
                    Some(color) if removed => color.symbol().to_ascii_lowercase(),
                    Some(color) => color.symbol(),
                    None if self.black_territory.contains(&cell) => '*',
                    None if self.white_territory.contains(&cell) => '+',
                    None if removed => '~',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
