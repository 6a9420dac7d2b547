//! Territory estimation and dead-stone marking.
//!
//! The built-in estimator is a flood fill: every empty region (dead stones
//! count as empty) is explored until it hits living stones. A region touching
//! only one colour belongs to that colour; a region touching both, or none,
//! is neutral.
//!
//! An external [`OwnershipEstimator`] can be plugged in through
//! [`determine_territory`]; its output is mapped onto the same overlays the
//! flood fill produces, and any failure degrades to the flood fill.

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::warn;

use crate::board::{Color, neighbors};
use crate::constants::{ESTIMATOR_TOLERANCE, ESTIMATOR_TRIALS, OWNER_BLACK, OWNER_NONE, OWNER_WHITE};
use crate::coord::Cell;
use crate::position::Position;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EstimatorError {
    #[error("ownership estimator unavailable")]
    Unavailable,
    #[error("ownership estimator failed: {0}")]
    Failed(String),
}

/// Per-cell ownership classification of a board.
///
/// `board` is indexed `x * height + y` and holds [`OWNER_BLACK`],
/// [`OWNER_WHITE`] or [`OWNER_NONE`] per cell; the result uses the same
/// layout and values, meaning black-owned, white-owned and neutral.
pub trait OwnershipEstimator {
    fn estimate(
        &self,
        width: i32,
        height: i32,
        board: &[i8],
        player_to_move: i8,
        trials: u32,
        tolerance: f32,
    ) -> Result<Vec<i8>, EstimatorError>;
}

/// Deterministic estimator backed by the flood fill.
#[derive(Copy, Clone, Debug, Default)]
pub struct FloodFillEstimator;

impl OwnershipEstimator for FloodFillEstimator {
    fn estimate(
        &self,
        width: i32,
        height: i32,
        board: &[i8],
        _player_to_move: i8,
        _trials: u32,
        _tolerance: f32,
    ) -> Result<Vec<i8>, EstimatorError> {
        if board.len() != (width * height) as usize {
            return Err(EstimatorError::Failed(format!(
                "board has {} cells, expected {}",
                board.len(),
                width * height
            )));
        }
        let mut pos = Position::new(width, height);
        for cell in pos.cells() {
            match board[index(cell, height)] {
                OWNER_BLACK => {
                    pos.black_stones.insert(cell);
                }
                OWNER_WHITE => {
                    pos.white_stones.insert(cell);
                }
                _ => {}
            }
        }
        compute_territory(&mut pos, true);
        Ok(pos
            .cells()
            .map(|cell| {
                if pos.black_territory.contains(&cell) {
                    OWNER_BLACK
                } else if pos.white_territory.contains(&cell) {
                    OWNER_WHITE
                } else {
                    OWNER_NONE
                }
            })
            .collect())
    }
}

#[inline]
fn index(cell: Cell, height: i32) -> usize {
    (cell.x * height + cell.y) as usize
}

/// Explore the region around `start`, stopping at living stones.
///
/// Returns every visited cell together with the colours of the living
/// stones bordering the region. Marked dame is entered but not crossed.
fn explore_region(pos: &Position, start: Cell) -> (FxHashSet<Cell>, bool, bool) {
    let mut stack = vec![start];
    let mut visited = FxHashSet::default();
    visited.insert(start);
    let (mut found_black, mut found_white) = (false, false);

    while let Some(p) = stack.pop() {
        if found_black && found_white {
            break;
        }
        if pos.is_living_stone(p) {
            match pos.stone_at(p) {
                Some(Color::Black) => found_black = true,
                _ => found_white = true,
            }
            continue;
        }
        if pos.is_marked_dame(p) {
            continue;
        }
        for n in neighbors(p, pos.board_width, pos.board_height) {
            if visited.insert(n) {
                stack.push(n);
            }
        }
    }
    (visited, found_black, found_white)
}

/// Classify every unclassified region of `pos` into black or white territory.
///
/// With `score_stones` living stones also count as their colour's territory.
pub fn compute_territory(pos: &mut Position, score_stones: bool) {
    for cell in pos.cells() {
        if pos.is_marked_dame(cell)
            || pos.is_living_stone(cell)
            || pos.white_territory.contains(&cell)
            || pos.black_territory.contains(&cell)
        {
            continue;
        }
        let owner = match explore_region(pos, cell) {
            (region, true, false) => Some((region, Color::Black)),
            (region, false, true) => Some((region, Color::White)),
            _ => None,
        };
        if let Some((region, color)) = owner {
            let claimed: Vec<Cell> = region
                .into_iter()
                .filter(|&c| !pos.is_marked_dame(c) && !pos.is_living_stone(c))
                .collect();
            pos.territory_mut(color).extend(claimed);
        }
    }
    if score_stones {
        add_living_stones_to_territory(pos);
    }
}

fn add_living_stones_to_territory(pos: &mut Position) {
    for color in [Color::Black, Color::White] {
        let living: Vec<Cell> = pos
            .stones(color)
            .iter()
            .copied()
            .filter(|c| !pos.removed_spots.contains(c))
            .collect();
        pos.territory_mut(color).extend(living);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SpotClass {
    Stone(Color),
    Territory(Color),
    Dame,
    Open,
}

fn classify(pos: &Position, cell: Cell) -> SpotClass {
    if let Some(color) = pos.stone_at(cell) {
        SpotClass::Stone(color)
    } else if pos.white_territory.contains(&cell) {
        SpotClass::Territory(Color::White)
    } else if pos.black_territory.contains(&cell) {
        SpotClass::Territory(Color::Black)
    } else if pos.removed_spots.contains(&cell) {
        SpotClass::Dame
    } else {
        SpotClass::Open
    }
}

/// The group a dead-stone click on `cell` affects.
///
/// The group is the connected set of cells of the same kind as `cell`:
/// stones of one colour, territory of one colour, marked dame, or plain
/// unclassified empty points. Returns `true` when the click marks the group
/// as removed (the seed is not removed yet) and `false` when it restores it.
pub fn toggle_removed(pos: &Position, cell: Cell) -> (bool, FxHashSet<Cell>) {
    let removing = !pos.removed_spots.contains(&cell);
    let mut group = FxHashSet::default();
    if !pos.is_on_board(cell) {
        return (removing, group);
    }
    let seed = classify(pos, cell);
    let mut stack = vec![cell];
    group.insert(cell);
    while let Some(p) = stack.pop() {
        for n in neighbors(p, pos.board_width, pos.board_height) {
            if !group.contains(&n) && classify(pos, n) == seed {
                group.insert(n);
                stack.push(n);
            }
        }
    }
    (removing, group)
}

/// The board as an estimator sees it. Dead stones are left out.
pub fn estimator_board(pos: &Position) -> Vec<i8> {
    pos.cells()
        .map(|cell| {
            if !pos.is_living_stone(cell) {
                return OWNER_NONE;
            }
            match pos.stone_at(cell) {
                Some(Color::Black) => OWNER_BLACK,
                _ => OWNER_WHITE,
            }
        })
        .collect()
}

fn valid_ownership(out: &[i8], expected_len: usize) -> bool {
    out.len() == expected_len && out.iter().all(|v| (OWNER_WHITE..=OWNER_BLACK).contains(v))
}

/// Re-derive the scoring overlays of `pos` from an ownership estimate.
///
/// Any existing territory and removed marks are replaced. Stones inside the
/// other colour's area become dead, neutral empty points become dame.
/// Without an estimator, or when it fails or answers with a malformed
/// board, the flood fill is used instead.
pub fn determine_territory(
    pos: &Position,
    estimator: Option<&dyn OwnershipEstimator>,
    score_stones: bool,
) -> Position {
    let board = estimator_board(pos);
    let player = match pos.last_player_to_move.map(Color::opponent) {
        Some(Color::White) => OWNER_WHITE,
        _ => OWNER_BLACK,
    };
    let (w, h) = (pos.board_width, pos.board_height);
    let fallback = || {
        FloodFillEstimator
            .estimate(w, h, &board, player, ESTIMATOR_TRIALS, ESTIMATOR_TOLERANCE)
            .unwrap_or_else(|_| vec![OWNER_NONE; board.len()])
    };

    let ownership = match estimator.map(|e| e.estimate(w, h, &board, player, ESTIMATOR_TRIALS, ESTIMATOR_TOLERANCE)) {
        Some(Ok(out)) if valid_ownership(&out, board.len()) => out,
        Some(Ok(out)) => {
            warn!(len = out.len(), "ownership estimate malformed, using flood fill");
            fallback()
        }
        Some(Err(e)) => {
            warn!(error = %e, "ownership estimator failed, using flood fill");
            fallback()
        }
        None => fallback(),
    };

    let mut next = pos.clone();
    next.white_territory.clear();
    next.black_territory.clear();
    next.removed_spots.clear();
    for cell in pos.cells() {
        let stone = pos.stone_at(cell);
        let owner = match ownership[index(cell, h)] {
            OWNER_BLACK => Some(Color::Black),
            OWNER_WHITE => Some(Color::White),
            _ => None,
        };
        match (owner, stone) {
            (Some(owner), Some(color)) if color != owner => {
                next.removed_spots.insert(cell);
                next.territory_mut(owner).insert(cell);
            }
            (Some(_), Some(_)) => {}
            (Some(owner), None) => {
                next.territory_mut(owner).insert(cell);
            }
            (None, None) => {
                next.removed_spots.insert(cell);
            }
            (None, Some(_)) => {}
        }
    }
    if score_stones {
        add_living_stones_to_territory(&mut next);
    }
    next
}
