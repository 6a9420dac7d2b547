//! Game records as supplied by the outside world.
//!
//! A [`Game`] carries everything that determines a replayed position: board
//! geometry, initial stones, the move list, handicap setup and the scoring
//! overlays decided during stone removal. It deserializes from the snake_case
//! JSON a game server hands out.

use serde::{Deserialize, Serialize};

use crate::coord::Cell;
use crate::scoring::Ruleset;

/// Stones on the board before the first move, as packed SGF cell lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialState {
    pub black: String,
    pub white: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    #[serde(default)]
    pub id: u64,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub initial_state: Option<InitialState>,
    #[serde(default)]
    pub white_goes_first: bool,
    #[serde(default)]
    pub moves: Vec<Cell>,
    #[serde(default)]
    pub handicap: u32,
    #[serde(default)]
    pub free_handicap_placement: bool,
    /// Packed SGF cells marked dead or dame
    #[serde(default)]
    pub removed_stones: Option<String>,
    /// Packed SGF cells White claims as territory
    #[serde(default)]
    pub white_scoring_positions: Option<String>,
    /// Packed SGF cells Black claims as territory
    #[serde(default)]
    pub black_scoring_positions: Option<String>,
    /// Overrides the size/handicap default when present
    #[serde(default)]
    pub komi: Option<f32>,
    #[serde(default)]
    pub ruleset: Ruleset,
}

impl Game {
    /// An even game on an empty `width` x `height` board.
    pub fn new(width: i32, height: i32) -> Self {
        Game {
            id: 0,
            width,
            height,
            initial_state: None,
            white_goes_first: false,
            moves: Vec::new(),
            handicap: 0,
            free_handicap_placement: false,
            removed_stones: None,
            white_scoring_positions: None,
            black_scoring_positions: None,
            komi: None,
            ruleset: Ruleset::default(),
        }
    }

    pub fn with_moves(mut self, moves: impl IntoIterator<Item = Cell>) -> Self {
        self.moves = moves.into_iter().collect();
        self
    }
}
