//! Go Text Protocol (GTP) front end.
//!
//! Exposes the rules engine to GTP controllers and graphical boards such as
//! Sabaki or GoGui. Every move goes through [`engine::play`], so the
//! controller gets the same legality checks (occupied, suicide, simple ko)
//! as a replayed game.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`, `quit`
//! - `boardsize <size>` - Any size from 2 to 25
//! - `clear_board`
//! - `komi <value>`
//! - `fixed_handicap <n>` - Place 2 to 9 stones on a 9, 13 or 19 board
//! - `play <color> <vertex>`
//! - `genmove <color>` - A random legal move that fills no own eye
//! - `undo`
//! - `showboard`
//! - `final_score` - Flood-fill territory under Japanese rules
//!
//! ## Example
//!
//! ```ignore
//! use goban_rules::gtp::GtpEngine;
//! let mut engine = GtpEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing::debug;

use crate::board::{Color, neighbors};
use crate::constants::MAX_BOARD_SIZE;
use crate::coord::{Cell, cell_from_gtp, cell_to_gtp};
use crate::engine;
use crate::handicap::{determine_komi, initialize_position};
use crate::position::Position;
use crate::scoring::{Ruleset, score_margin, score_position_partial};
use crate::territory::compute_territory;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "fixed_handicap",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

const DEFAULT_SIZE: i32 = 19;

/// GTP engine state.
pub struct GtpEngine {
    /// Current position; its parent chain is the undo history
    pos: Arc<Position>,
    size: i32,
    komi: f32,
    /// Move generator randomness
    rng: fastrand::Rng,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    /// A 19x19 engine with the default komi and a fixed seed.
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_SIZE, None, 0)
    }

    /// Create an engine for a `size` board. Without `komi` the size's default
    /// applies.
    pub fn with_settings(size: i32, komi: Option<f32>, seed: u64) -> Self {
        let komi = komi.unwrap_or_else(|| determine_komi(size, 0));
        Self {
            pos: Arc::new(Self::empty_board(size, komi)),
            size,
            komi,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    fn empty_board(size: i32, komi: f32) -> Position {
        let mut pos = Position::new(size, size);
        pos.komi = komi;
        pos
    }

    pub fn position(&self) -> &Arc<Position> {
        &self.pos
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();
            debug!(command = %command, ?args, "gtp command");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn reset(&mut self) {
        self.pos = Arc::new(Self::empty_board(self.size, self.komi));
    }

    fn parse_color(arg: &str) -> Result<Color, String> {
        arg.parse::<Color>().map_err(|e| e.to_string())
    }

    /// A point whose every neighbour is a stone of `color`.
    fn is_own_eye(pos: &Position, cell: Cell, color: Color) -> bool {
        neighbors(cell, pos.board_width, pos.board_height).all(|n| pos.stone_at(n) == Some(color))
    }

    /// Play a random legal move for `color`, or pass.
    fn generate_move(&mut self, color: Color) -> Cell {
        let pos = &self.pos;
        let mut candidates: Vec<Cell> = pos
            .cells()
            .filter(|&c| pos.stone_at(c).is_none() && !Self::is_own_eye(pos, c, color))
            .collect();
        self.rng.shuffle(&mut candidates);

        for cell in candidates {
            if let Ok(next) = engine::play(&self.pos, color, cell) {
                self.pos = Arc::new(next);
                return cell;
            }
        }
        if let Ok(next) = engine::play(&self.pos, color, Cell::PASS) {
            self.pos = Arc::new(next);
        }
        Cell::PASS
    }

    fn final_score(&self) -> String {
        let mut pos = Position::clone(&self.pos);
        compute_territory(&mut pos, false);
        let (white, black) = score_position_partial(&pos, &Ruleset::japanese());
        let margin = score_margin(&white, &black);
        if margin > 0.0 {
            format!("B+{margin}")
        } else if margin < 0.0 {
            format!("W+{}", -margin)
        } else {
            "0".to_string()
        }
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&arg.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<i32>() {
                    Ok(size) if (2..=MAX_BOARD_SIZE).contains(&size) => {
                        self.size = size;
                        self.reset();
                        (true, String::new())
                    }
                    Ok(_) => (false, "unacceptable size".to_string()),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.reset();
                (true, String::new())
            }

            "komi" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<f32>() {
                    Ok(komi) => {
                        self.komi = komi;
                        let mut pos = Position::clone(&self.pos);
                        pos.komi = komi;
                        self.pos = Arc::new(pos);
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid komi".to_string()),
                }
            }

            "fixed_handicap" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(handicap) = arg.parse::<u32>() else {
                    return (false, "invalid number of stones".to_string());
                };
                if handicap < 2 {
                    return (false, "invalid number of stones".to_string());
                }
                if !self.pos.black_stones.is_empty() || !self.pos.white_stones.is_empty() {
                    return (false, "board not empty".to_string());
                }
                match initialize_position(self.size, self.size, handicap) {
                    Ok(mut pos) => {
                        pos.komi = self.komi;
                        let mut stones: Vec<Cell> = pos.black_stones.iter().copied().collect();
                        stones.sort();
                        self.pos = Arc::new(pos);
                        let vertices: Vec<String> = stones.iter().map(|&c| cell_to_gtp(c, self.size)).collect();
                        (true, vertices.join(" "))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let color = match Self::parse_color(color) {
                    Ok(color) => color,
                    Err(e) => return (false, e),
                };
                let cell = match cell_from_gtp(vertex, self.size) {
                    Ok(cell) => cell,
                    Err(e) => return (false, format!("invalid vertex: {e}")),
                };
                match engine::play(&self.pos, color, cell) {
                    Ok(next) => {
                        self.pos = Arc::new(next);
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let color = match Self::parse_color(arg) {
                    Ok(color) => color,
                    Err(e) => return (false, e),
                };
                let cell = self.generate_move(color);
                (true, cell_to_gtp(cell, self.size).to_lowercase())
            }

            "undo" => match self.pos.parent.clone() {
                Some(parent) => {
                    self.pos = parent;
                    (true, String::new())
                }
                None => (false, "cannot undo".to_string()),
            },

            "showboard" => {
                let pos = &self.pos;
                let board = format!(
                    "\n{pos}captures: black {} white {}",
                    pos.black_capture_count, pos.white_capture_count
                );
                (true, board)
            }

            "final_score" => (true, self.final_score()),

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
