//! Fixed handicap placements and komi defaults.
//!
//! Placements are stored per board size as packed SGF cell lists, indexed by
//! the handicap. Handicaps 0 and 1 place no stones: with 1 Black simply
//! moves first without komi.

use thiserror::Error;

use crate::board::Color;
use crate::constants::MAX_HANDICAP;
use crate::coord::{Cell, CoordError, decode_cells};
use crate::position::Position;

const HANDICAPS_19: [&str; 10] = [
    "",
    "",
    "pddp",
    "pppddp",
    "ddpppddp",
    "jjddpppddp",
    "djpjddpppddp",
    "djpjjjddpppddp",
    "jdjpdjpjddpppddp",
    "jdjpdjpjjjddpppddp",
];

const HANDICAPS_13: [&str; 10] = [
    "",
    "",
    "jddj",
    "jjjddj",
    "ddjjjddj",
    "ggddjjjddj",
    "dgjgddjjjddj",
    "dgjgggddjjjddj",
    "gdgjdgjgddjjjddj",
    "gdgjdgjgggddjjjddj",
];

const HANDICAPS_9: [&str; 10] = [
    "",
    "",
    "gccg",
    "gggccg",
    "ccgggccg",
    "eeccgggccg",
    "cegeccgggccg",
    "cegeeeccgggccg",
    "ecegcegeccgggccg",
    "ecegcegeeeccgggccg",
];

/// Invalid game configuration. These never arise from a validated game.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("handicap {0} exceeds the maximum of 9")]
    TooManyHandicapStones(u32),
    #[error("fixed handicap placement needs a square board, got {width}x{height}")]
    NonSquareHandicapBoard { width: i32, height: i32 },
    #[error("no handicap table for board size {0}")]
    UnsupportedBoardSize(i32),
    #[error("board size {width}x{height} out of range")]
    InvalidBoardSize { width: i32, height: i32 },
    #[error("initial stone at {0} is off the board")]
    StoneOffBoard(Cell),
    #[error("invalid encoded stones: {0}")]
    InvalidEncoding(#[from] CoordError),
}

fn table(board_size: i32) -> Option<&'static [&'static str; 10]> {
    match board_size {
        19 => Some(&HANDICAPS_19),
        13 => Some(&HANDICAPS_13),
        9 => Some(&HANDICAPS_9),
        _ => None,
    }
}

/// The fixed placement of `handicap` black stones on a square board.
pub fn handicap_stones(board_size: i32, handicap: u32) -> Result<Vec<Cell>, ConfigError> {
    if handicap > MAX_HANDICAP {
        return Err(ConfigError::TooManyHandicapStones(handicap));
    }
    let table = table(board_size).ok_or(ConfigError::UnsupportedBoardSize(board_size))?;
    Ok(decode_cells(table[handicap as usize])?)
}

/// Default komi for a board size and handicap.
pub fn determine_komi(board_size: i32, handicap: u32) -> f32 {
    match (board_size, handicap) {
        (9, 0) => 5.5,
        (9, _) => 3.5,
        (_, 0) => 6.5,
        _ => 0.5,
    }
}

/// A fresh position with fixed handicap stones placed.
///
/// With more than one handicap stone White moves first.
pub fn initialize_position(width: i32, height: i32, handicap: u32) -> Result<Position, ConfigError> {
    if handicap > MAX_HANDICAP {
        return Err(ConfigError::TooManyHandicapStones(handicap));
    }
    let mut pos = Position::new(width, height);
    if handicap > 1 {
        if width != height {
            return Err(ConfigError::NonSquareHandicapBoard { width, height });
        }
        pos.black_stones.extend(handicap_stones(height, handicap)?);
        pos.next_to_move = Color::White;
    }
    pos.handicap = handicap;
    pos.komi = determine_komi(height, handicap);
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes_match_handicap() {
        for size in [9, 13, 19] {
            for h in 2..=MAX_HANDICAP {
                let stones = handicap_stones(size, h).unwrap();
                assert_eq!(stones.len(), h as usize, "size {size} handicap {h}");
                assert!(stones.iter().all(|c| c.x < size && c.y < size));
            }
        }
    }

    #[test]
    fn test_komi() {
        assert_eq!(determine_komi(9, 0), 5.5);
        assert_eq!(determine_komi(9, 3), 3.5);
        assert_eq!(determine_komi(19, 0), 6.5);
        assert_eq!(determine_komi(13, 2), 0.5);
    }

    #[test]
    fn test_four_stones_on_19() {
        let pos = initialize_position(19, 19, 4).unwrap();
        let expected: rustc_hash::FxHashSet<Cell> = decode_cells("ddpppddp").unwrap().into_iter().collect();
        assert_eq!(pos.black_stones, expected);
        assert!(pos.white_stones.is_empty());
        assert_eq!(pos.next_to_move, Color::White);
        assert_eq!(pos.komi, 0.5);
    }

    #[test]
    fn test_one_stone_handicap_places_nothing() {
        let pos = initialize_position(19, 19, 1).unwrap();
        assert!(pos.black_stones.is_empty());
        assert_eq!(pos.next_to_move, Color::Black);
        assert_eq!(pos.komi, 0.5);
    }

    #[test]
    fn test_config_errors() {
        assert_eq!(
            initialize_position(19, 19, 10).unwrap_err(),
            ConfigError::TooManyHandicapStones(10)
        );
        assert!(matches!(
            initialize_position(19, 13, 2),
            Err(ConfigError::NonSquareHandicapBoard { .. })
        ));
        assert_eq!(initialize_position(7, 7, 2).unwrap_err(), ConfigError::UnsupportedBoardSize(7));
        // Non-square boards are fine without handicap stones.
        assert!(initialize_position(19, 13, 0).is_ok());
    }
}
