//! goban-rules: Go rules engine command line.
//!
//! ## Usage
//!
//! - `goban-rules gtp` - Start a GTP server for GUI integration
//! - `goban-rules replay game.json` - Replay a game record and print the result
//!
//! Diagnostics go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=debug`) for more.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use goban_rules::cache::PositionCache;
use goban_rules::constants::DEFAULT_CACHE_CAPACITY;
use goban_rules::engine::{ReplayRequest, replay};
use goban_rules::game::Game;
use goban_rules::gtp::GtpEngine;
use goban_rules::position::Position;
use goban_rules::scoring::{Score, score_margin, score_position_partial};

/// goban-rules: Go board state and rules engine
#[derive(Parser)]
#[command(name = "goban-rules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp {
        /// Board size
        #[arg(long, default_value_t = 19)]
        size: i32,
        /// Komi; defaults to the board size's standard value
        #[arg(long)]
        komi: Option<f32>,
        /// Seed for the move generator
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Replay a JSON game record and print the resulting position
    Replay {
        /// Game record file
        file: PathBuf,
        /// Only replay the first N moves
        #[arg(long)]
        limit: Option<usize>,
        /// Estimate territory before scoring
        #[arg(long)]
        territory: bool,
        /// Position cache size
        #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
        cache_capacity: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Gtp { size, komi, seed } => {
            let mut engine = GtpEngine::with_settings(size, komi, seed);
            engine.run().context("GTP session failed")?;
        }
        Commands::Replay {
            file,
            limit,
            territory,
            cache_capacity,
        } => {
            let text = fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let game: Game =
                serde_json::from_str(&text).with_context(|| format!("parsing game record {}", file.display()))?;
            let cache = PositionCache::new(cache_capacity);
            let request = ReplayRequest {
                limit,
                compute_territory: territory,
                variation: None,
            };
            let pos = replay(&cache, &game, &request).with_context(|| format!("replaying game {}", game.id))?;
            print_position(&game, &pos);
        }
    }
    Ok(())
}

fn print_score(label: &str, score: &Score) {
    let field = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
    println!(
        "{label}: territory {} stones {} prisoners {} handicap {} komi {} total {}",
        field(score.territory.map(|v| v.to_string())),
        field(score.stones.map(|v| v.to_string())),
        field(score.prisoners.map(|v| v.to_string())),
        field(score.handicap.map(|v| v.to_string())),
        field(score.komi.map(|v| v.to_string())),
        field(score.total.map(|v| v.to_string())),
    );
}

fn print_position(game: &Game, pos: &Arc<Position>) {
    println!("{pos}");
    println!(
        "move {} next {} captures: black {} white {}",
        pos.current_move_index, pos.next_to_move, pos.black_capture_count, pos.white_capture_count
    );
    if pos.is_game_over() {
        println!("game over");
    }
    let (white, black) = score_position_partial(pos, &game.ruleset);
    print_score("black", &black);
    print_score("white", &white);
    let margin = score_margin(&white, &black);
    if margin > 0.0 {
        println!("result: B+{margin}");
    } else if margin < 0.0 {
        println!("result: W+{}", -margin);
    } else {
        println!("result: draw");
    }
}
