//! goban-rules: a Go board state and rules engine.
//!
//! This crate turns a move list plus initial conditions into a validated,
//! fully derived board position. It enforces captures, suicide and simple
//! ko, estimates territory, scores under several rulesets and memoizes
//! replays of game records.
//!
//! ## Modules
//!
//! - [`constants`] - Engine parameters
//! - [`coord`] - Cells and the SGF/GTP notations
//! - [`board`] - Colours, neighbours and the capture/suicide resolver
//! - [`position`] - Immutable board snapshots with history links
//! - [`handicap`] - Fixed handicap placement and default komi
//! - [`engine`] - Applying moves and replaying games
//! - [`territory`] - Territory estimation and dead-stone marking
//! - [`scoring`] - Rulesets and score breakdowns
//! - [`cache`] - Memoized replays
//! - [`game`] - Game records
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use goban_rules::board::Color;
//! use goban_rules::coord::cell_from_gtp;
//! use goban_rules::engine::play;
//! use goban_rules::position::Position;
//!
//! let empty = Arc::new(Position::new(9, 9));
//! let pos = play(&empty, Color::Black, cell_from_gtp("E5", 9).unwrap()).unwrap();
//! assert_eq!(pos.next_to_move, Color::White);
//! println!("{pos}");
//! ```

pub mod board;
pub mod cache;
pub mod constants;
pub mod coord;
pub mod engine;
pub mod game;
pub mod gtp;
pub mod handicap;
pub mod position;
pub mod scoring;
pub mod territory;
