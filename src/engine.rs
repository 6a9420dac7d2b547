//! The move engine.
//!
//! Everything that turns moves into positions goes through here:
//! [`make_move`] and [`play`] for single interactive moves, [`build_pos`]
//! for a whole move list, and [`replay`] for a [`Game`] record backed by a
//! [`PositionCache`].

use std::sync::Arc;

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::board::{Color, find_dead_group, neighbors};
use crate::cache::{CacheKey, PositionCache};
use crate::constants::{MAX_BOARD_SIZE, MAX_HANDICAP, REPLAY_HISTORY_DEPTH};
use crate::coord::{Cell, CoordError, decode_cells, decode_stones};
use crate::game::Game;
use crate::handicap::{ConfigError, determine_komi, initialize_position};
use crate::position::Position;
use crate::territory::compute_territory;

/// Reasons a move can be illegal.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Point is not empty
    #[error("illegal move: point not empty")]
    Occupied,
    /// Point is outside the board and not a pass
    #[error("illegal move: off the board")]
    OutOfBounds,
    /// Move recreates the position from two plies ago
    #[error("illegal move: retakes ko")]
    Ko,
    /// Move leaves its own group without liberties and captures nothing
    #[error("illegal move: suicide")]
    Suicide,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("move {index} at {cell}: {reason}")]
    IllegalMove {
        index: usize,
        cell: Cell,
        #[source]
        reason: MoveError,
    },
    #[error("invalid encoded moves: {0}")]
    InvalidEncoding(#[from] CoordError),
}

/// Inputs to [`build_pos`] besides the base position and the moves.
#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    /// First mover; the base position's `next_to_move` when unset
    pub player: Option<Color>,
    /// Spots to mark dead or dame once all moves are played
    pub removed: FxHashSet<Cell>,
    pub white_scoring_positions: Vec<Cell>,
    pub black_scoring_positions: Vec<Cell>,
    pub compute_territory: bool,
    pub score_stones: bool,
}

/// Put `player`'s stone on `cell` and resolve captures.
fn place_stone(pos: &mut Position, player: Color, cell: Cell) -> Result<(), MoveError> {
    if cell.is_pass() {
        return Ok(());
    }
    if !pos.is_on_board(cell) {
        return Err(MoveError::OutOfBounds);
    }
    if pos.stone_at(cell).is_some() {
        return Err(MoveError::Occupied);
    }
    let (w, h) = (pos.board_width, pos.board_height);
    let opponent = player.opponent();
    pos.stones_mut(player).insert(cell);

    let mut captured = 0;
    for n in neighbors(cell, w, h) {
        if !pos.stones(opponent).contains(&n) {
            continue;
        }
        if let Some(group) = find_dead_group(pos.stones(opponent), pos.stones(player), n, w, h) {
            let stones = pos.stones_mut(opponent);
            for c in &group {
                stones.remove(c);
            }
            captured += group.len() as u32;
        }
    }

    if captured > 0 {
        *pos.capture_count_mut(player) += captured;
    } else if find_dead_group(pos.stones(player), pos.stones(opponent), cell, w, h).is_some() {
        return Err(MoveError::Suicide);
    }
    Ok(())
}

/// Play one move on `pos` in place. Returns who moves next.
///
/// During free handicap placement Black keeps the move until the last
/// handicap stone is down.
fn step(pos: &mut Position, player: Color, cell: Cell) -> Result<Color, MoveError> {
    place_stone(pos, player, cell)?;
    pos.last_move = Some(cell);
    pos.last_player_to_move = Some(player);
    let placing_handicap =
        pos.free_handicap_placement && pos.current_move_index + 1 < pos.handicap as usize;
    pos.current_move_index += 1;
    pos.next_to_move = if placing_handicap { player } else { player.opponent() };
    Ok(pos.next_to_move)
}

fn clear_territory(pos: &mut Position) {
    pos.white_territory.clear();
    pos.black_territory.clear();
}

/// Apply `moves` to `base`, then derive the scoring overlays.
///
/// The whole call fails on the first illegal move. Only the snapshots of the
/// last [`REPLAY_HISTORY_DEPTH`] plies are kept as history, so a replayed
/// position supports ko and game-over checks without dragging the full game
/// along.
pub fn build_pos(base: &Arc<Position>, moves: &[Cell], opts: &BuildOptions) -> Result<Position, BuildError> {
    let mut pos = Position::clone(base);
    clear_territory(&mut pos);

    let first_snapshot = moves.len().saturating_sub(REPLAY_HISTORY_DEPTH);
    if first_snapshot > 0 {
        pos.parent = None;
    }
    let mut player = opts.player.unwrap_or(base.next_to_move);
    for (index, &cell) in moves.iter().enumerate() {
        if index >= first_snapshot {
            let snapshot = if index == 0 {
                Arc::clone(base)
            } else {
                Arc::new(pos.clone())
            };
            pos.parent = Some(snapshot);
        }
        player = step(&mut pos, player, cell).map_err(|reason| BuildError::IllegalMove { index, cell, reason })?;
    }

    for &cell in &opts.removed {
        if pos.is_on_board(cell) {
            pos.removed_spots.insert(cell);
        } else {
            warn!(%cell, "ignoring removed spot off the board");
        }
    }
    if opts.compute_territory {
        compute_territory(&mut pos, opts.score_stones);
    }
    let overlays = [
        (Color::White, &opts.white_scoring_positions),
        (Color::Black, &opts.black_scoring_positions),
    ];
    for (color, cells) in overlays {
        for &cell in cells {
            overlay_territory(&mut pos, color, cell);
        }
    }
    Ok(pos)
}

/// Hand `cell` to `color`, whatever the flood fill decided. Dame stays dame.
fn overlay_territory(pos: &mut Position, color: Color, cell: Cell) {
    if !pos.is_on_board(cell) {
        warn!(%cell, %color, "ignoring scoring position off the board");
        return;
    }
    if pos.is_marked_dame(cell) {
        return;
    }
    pos.territory_mut(color.opponent()).remove(&cell);
    pos.territory_mut(color).insert(cell);
}

/// Play a single move without the ko check.
///
/// The result's parent is `position` itself.
pub fn make_move(position: &Arc<Position>, player: Color, cell: Cell) -> Result<Position, MoveError> {
    let mut pos = Position::clone(position);
    clear_territory(&mut pos);
    pos.parent = Some(Arc::clone(position));
    step(&mut pos, player, cell)?;
    Ok(pos)
}

/// Play a single move, rejecting simple ko recaptures.
pub fn play(position: &Arc<Position>, player: Color, cell: Cell) -> Result<Position, MoveError> {
    let pos = make_move(position, player, cell)?;
    if !cell.is_pass() && pos.is_illegal_ko() {
        return Err(MoveError::Ko);
    }
    Ok(pos)
}

/// The position a game starts from, before any of its moves.
pub fn initial_position(game: &Game) -> Result<Position, ConfigError> {
    let (width, height) = (game.width, game.height);
    let sizes = 1..=MAX_BOARD_SIZE;
    if !sizes.contains(&width) || !sizes.contains(&height) {
        return Err(ConfigError::InvalidBoardSize { width, height });
    }
    if game.handicap > MAX_HANDICAP {
        return Err(ConfigError::TooManyHandicapStones(game.handicap));
    }
    let initial = game.initial_state.clone().unwrap_or_default();
    let black = decode_cells(&initial.black)?;
    let white = decode_cells(&initial.white)?;

    // Servers usually send fixed handicap stones as initial state already.
    let fixed = game.handicap > 1 && !game.free_handicap_placement && black.is_empty();
    let mut pos = if fixed {
        initialize_position(width, height, game.handicap)?
    } else {
        Position::new(width, height)
    };
    if let Some(&cell) = black.iter().chain(&white).find(|&&c| !pos.is_on_board(c)) {
        return Err(ConfigError::StoneOffBoard(cell));
    }
    pos.black_stones.extend(black);
    pos.white_stones.extend(white);
    pos.handicap = game.handicap;
    pos.free_handicap_placement = game.free_handicap_placement;
    pos.komi = game.komi.unwrap_or_else(|| determine_komi(height, game.handicap));
    if game.white_goes_first {
        pos.next_to_move = Color::White;
    }
    Ok(pos)
}

/// An alternate continuation branching off the game record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Variation {
    /// Number of game moves kept before the variation starts
    pub root_move_number: usize,
    pub moves: Vec<Cell>,
}

#[derive(Clone, Debug, Default)]
pub struct ReplayRequest {
    /// Stop after this many moves
    pub limit: Option<usize>,
    pub compute_territory: bool,
    pub variation: Option<Variation>,
}

/// The move list a request replays: the game record, spliced with the
/// variation if any, then cut at the limit.
pub fn effective_moves(game: &Game, request: &ReplayRequest) -> Vec<Cell> {
    let mut moves = match &request.variation {
        Some(v) => {
            let mut moves: Vec<Cell> = game.moves.iter().take(v.root_move_number).copied().collect();
            moves.extend_from_slice(&v.moves);
            moves
        }
        None => game.moves.clone(),
    };
    if let Some(limit) = request.limit {
        moves.truncate(limit);
    }
    moves
}

pub fn cache_key(game: &Game, request: &ReplayRequest) -> CacheKey {
    CacheKey {
        width: game.width,
        height: game.height,
        initial_state: game.initial_state.clone(),
        white_goes_first: game.white_goes_first,
        moves: effective_moves(game, request),
        free_handicap_placement: game.free_handicap_placement,
        handicap: game.handicap,
        removed_stones: game.removed_stones.clone(),
        white_scoring_positions: game.white_scoring_positions.clone(),
        black_scoring_positions: game.black_scoring_positions.clone(),
        compute_territory: request.compute_territory,
        score_stones: game.ruleset.score_stones,
        komi_bits: game.komi.map(f32::to_bits),
    }
}

fn decode_optional(encoded: Option<&str>) -> Result<Vec<Cell>, CoordError> {
    encoded.map_or(Ok(Vec::new()), decode_cells)
}

/// The position `game` reaches under `request`, served from `cache` when
/// possible.
///
/// An illegal move in the record is logged and yields an empty board of the
/// game's size; that fallback is cached like any other result. Invalid game
/// configuration is returned as an error and nothing is cached.
pub fn replay(cache: &PositionCache, game: &Game, request: &ReplayRequest) -> Result<Arc<Position>, ConfigError> {
    let key = cache_key(game, request);
    if let Some(pos) = cache.get(&key) {
        return Ok(pos);
    }
    debug!(game_id = game.id, moves = key.moves.len(), "replaying game");

    let base = Arc::new(initial_position(game)?);
    let opts = BuildOptions {
        player: None,
        removed: decode_optional(game.removed_stones.as_deref())?.into_iter().collect(),
        white_scoring_positions: decode_optional(game.white_scoring_positions.as_deref())?,
        black_scoring_positions: decode_optional(game.black_scoring_positions.as_deref())?,
        compute_territory: request.compute_territory,
        score_stones: game.ruleset.score_stones,
    };

    let pos = match build_pos(&base, &key.moves, &opts) {
        Ok(pos) => pos,
        Err(e) => {
            match &e {
                BuildError::IllegalMove { index, cell, reason } => {
                    error!(game_id = game.id, index, %cell, %reason, "server returned an invalid move");
                }
                BuildError::InvalidEncoding(_) => error!(game_id = game.id, error = %e, "replay failed"),
            }
            let mut empty = Position::new(game.width, game.height);
            empty.komi = base.komi;
            empty.handicap = base.handicap;
            empty
        }
    };
    let pos = Arc::new(pos);
    cache.put(key, Arc::clone(&pos));
    Ok(pos)
}

/// Every position along a packed `C[xy]` stone list on a `size` x `size`
/// board, the empty board first.
pub fn position_list_from_sgf(encoded: &str, size: i32) -> Result<Vec<Arc<Position>>, BuildError> {
    let mut current = Arc::new(Position::new(size, size));
    let mut positions = vec![Arc::clone(&current)];
    for (index, (color, cell)) in decode_stones(encoded)?.into_iter().enumerate() {
        let next =
            make_move(&current, color, cell).map_err(|reason| BuildError::IllegalMove { index, cell, reason })?;
        current = Arc::new(next);
        positions.push(Arc::clone(&current));
    }
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::cell_from_gtp;
    use crate::game::InitialState;

    fn c(x: i32, y: i32) -> Cell {
        Cell::new(x, y)
    }

    fn empty(size: i32) -> Arc<Position> {
        Arc::new(Position::new(size, size))
    }

    #[test]
    fn test_simple_capture() {
        let moves = [c(3, 4), c(4, 4), c(5, 4), c(0, 0), c(4, 3), c(8, 8), c(4, 5)];
        let pos = build_pos(&empty(9), &moves, &BuildOptions::default()).unwrap();
        assert_eq!(pos.stone_at(c(4, 4)), None);
        assert_eq!(pos.black_capture_count, 1);
        assert_eq!(pos.white_capture_count, 0);
        assert_eq!(pos.white_stones.len(), 2);
        assert_eq!(pos.current_move_index, 7);
        assert_eq!(pos.last_move, Some(c(4, 5)));
        assert_eq!(pos.last_player_to_move, Some(Color::Black));
        assert_eq!(pos.next_to_move, Color::White);
    }

    #[test]
    fn test_capture_group_on_edge() {
        let base = Arc::new(Position::setup(9, 9, &[c(0, 1), c(1, 1)], &[c(0, 0), c(1, 0)]));
        let pos = make_move(&base, Color::Black, c(2, 0)).unwrap();
        assert!(pos.white_stones.is_empty());
        assert_eq!(pos.black_capture_count, 2);
        assert_eq!(pos.captured_in_last_move().len(), 2);
    }

    #[test]
    fn test_suicide_rejected() {
        let base = Arc::new(Position::setup(9, 9, &[], &[c(1, 0), c(0, 1)]));
        assert_eq!(make_move(&base, Color::Black, c(0, 0)), Err(MoveError::Suicide));

        let err = build_pos(&base, &[c(5, 5), c(6, 6), c(0, 0)], &BuildOptions::default()).unwrap_err();
        assert_eq!(err, BuildError::IllegalMove { index: 2, cell: c(0, 0), reason: MoveError::Suicide });
    }

    #[test]
    fn test_capture_beats_suicide() {
        // Both white stones have their last liberty on the corner point.
        let base = Arc::new(Position::setup(9, 9, &[c(2, 0), c(1, 1), c(0, 2)], &[c(1, 0), c(0, 1)]));
        let pos = make_move(&base, Color::Black, c(0, 0)).unwrap();
        assert!(pos.white_stones.is_empty());
        assert_eq!(pos.black_capture_count, 2);
    }

    #[test]
    fn test_occupied_and_off_board() {
        let base = Arc::new(Position::setup(9, 9, &[c(4, 4)], &[]));
        assert_eq!(make_move(&base, Color::White, c(4, 4)), Err(MoveError::Occupied));
        assert_eq!(make_move(&base, Color::White, c(9, 0)), Err(MoveError::OutOfBounds));
        assert_eq!(make_move(&base, Color::White, c(0, -2)), Err(MoveError::OutOfBounds));
    }

    #[test]
    fn test_pass_places_nothing() {
        let base = empty(9);
        let pos = make_move(&base, Color::Black, Cell::PASS).unwrap();
        assert!(pos.black_stones.is_empty());
        assert_eq!(pos.last_move, Some(Cell::PASS));
        assert_eq!(pos.next_to_move, Color::White);
        assert!(!pos.is_game_over());

        let pos = make_move(&Arc::new(pos), Color::White, Cell::PASS).unwrap();
        assert!(pos.is_game_over());
    }

    #[test]
    fn test_make_move_links_parent() {
        let base = empty(9);
        let pos = make_move(&base, Color::Black, c(2, 2)).unwrap();
        assert!(Arc::ptr_eq(pos.parent.as_ref().unwrap(), &base));
        assert!(base.black_stones.is_empty(), "Base must stay untouched");
    }

    #[test]
    fn test_simple_ko() {
        let base = Arc::new(Position::setup(
            9,
            9,
            &[c(0, 1), c(1, 0), c(1, 2)],
            &[c(3, 1), c(2, 0), c(2, 2), c(1, 1)],
        ));
        let taken = Arc::new(play(&base, Color::Black, c(2, 1)).unwrap());
        assert_eq!(taken.black_capture_count, 1);

        assert_eq!(play(&taken, Color::White, c(1, 1)), Err(MoveError::Ko));
        // Without the ko check the recapture goes through.
        let retaken = make_move(&taken, Color::White, c(1, 1)).unwrap();
        assert!(retaken.has_same_stones_as(&base));

        // After a move elsewhere the recapture is legal again.
        let away = Arc::new(play(&taken, Color::White, c(8, 8)).unwrap());
        let away = Arc::new(play(&away, Color::Black, c(8, 0)).unwrap());
        assert!(play(&away, Color::White, c(1, 1)).is_ok());
    }

    #[test]
    fn test_history_depth() {
        let moves: Vec<Cell> = (0..6).map(|i| c(i, 0)).collect();
        let base = empty(9);
        let pos = build_pos(&base, &moves, &BuildOptions::default()).unwrap();
        assert_eq!(pos.history().count(), REPLAY_HISTORY_DEPTH);
        let parent = pos.parent.as_deref().unwrap();
        assert_eq!(parent.current_move_index, 5);
        assert_eq!(parent.last_move, Some(c(4, 0)));

        // Short lists reach back to the base itself.
        let pos = build_pos(&base, &moves[..1], &BuildOptions::default()).unwrap();
        assert!(Arc::ptr_eq(pos.parent.as_ref().unwrap(), &base));
    }

    #[test]
    fn test_free_handicap_turn_order() {
        let mut base = Position::new(9, 9);
        base.handicap = 3;
        base.free_handicap_placement = true;
        let moves = [c(0, 0), c(2, 2), c(4, 4), c(6, 6), c(8, 8)];
        let pos = build_pos(&Arc::new(base), &moves, &BuildOptions::default()).unwrap();
        assert_eq!(pos.black_stones.len(), 4);
        assert!(pos.white_stones.contains(&c(6, 6)));
        assert_eq!(pos.next_to_move, Color::White);
    }

    #[test]
    fn test_explicit_first_player() {
        let opts = BuildOptions { player: Some(Color::White), ..BuildOptions::default() };
        let pos = build_pos(&empty(9), &[c(0, 0)], &opts).unwrap();
        assert!(pos.white_stones.contains(&c(0, 0)));
    }

    #[test]
    fn test_overlays_skip_dame() {
        let opts = BuildOptions {
            removed: [c(0, 0)].into_iter().collect(),
            white_scoring_positions: vec![c(0, 0), c(1, 1)],
            black_scoring_positions: vec![c(5, 5)],
            ..BuildOptions::default()
        };
        let pos = build_pos(&empty(9), &[], &opts).unwrap();
        assert!(pos.is_marked_dame(c(0, 0)));
        assert_eq!(pos.white_territory, [c(1, 1)].into_iter().collect());
        assert_eq!(pos.black_territory, [c(5, 5)].into_iter().collect());
    }

    #[test]
    fn test_overlay_wins_over_flood_fill() {
        // Black wall on x=2, white wall on x=6.
        let walls = Position::setup(
            9,
            9,
            &(0..9).map(|y| c(2, y)).collect::<Vec<_>>(),
            &(0..9).map(|y| c(6, y)).collect::<Vec<_>>(),
        );
        let opts = BuildOptions {
            black_scoring_positions: vec![c(8, 0), c(4, 4)],
            white_scoring_positions: vec![c(4, 4)],
            compute_territory: true,
            ..BuildOptions::default()
        };
        let pos = build_pos(&Arc::new(walls), &[], &opts).unwrap();
        assert!(pos.black_territory.is_disjoint(&pos.white_territory));
        assert!(pos.black_territory.contains(&c(8, 0)));
        assert!(!pos.white_territory.contains(&c(8, 0)));
        // Black's overlay is applied last and takes the shared cell.
        assert!(pos.black_territory.contains(&c(4, 4)));
        assert_eq!(pos.white_territory.len(), 17);
    }

    #[test]
    fn test_off_board_overlays_ignored() {
        let opts = BuildOptions {
            removed: [c(9, 9), c(1, 1)].into_iter().collect(),
            white_scoring_positions: vec![c(25, 25), c(24, 24), c(-3, 0), c(2, 2)],
            ..BuildOptions::default()
        };
        let pos = build_pos(&empty(9), &[], &opts).unwrap();
        assert_eq!(pos.removed_spots, [c(1, 1)].into_iter().collect());
        assert_eq!(pos.white_territory, [c(2, 2)].into_iter().collect());
    }

    #[test]
    fn test_marks_carried_through_moves() {
        let base = Arc::new(Position::new(9, 9).with_stones("B[cc]").unwrap().with_marks("A[dd]B[ee]").unwrap());
        let after_move = make_move(&base, Color::White, c(3, 3)).unwrap();
        assert_eq!(after_move.custom_marks, base.custom_marks);
        assert!(after_move.black_stones.contains(&c(2, 2)));

        let built = build_pos(&base, &[c(0, 0), c(1, 1), c(5, 5)], &BuildOptions::default()).unwrap();
        assert_eq!(built.custom_marks.len(), 2);
        assert_eq!(built.custom_marks[1].placement, c(4, 4));
    }

    #[test]
    fn test_initial_position_from_game() {
        let mut game = Game::new(19, 19);
        game.handicap = 4;
        let pos = initial_position(&game).unwrap();
        assert_eq!(pos.black_stones.len(), 4);
        assert!(pos.black_stones.contains(&cell_from_gtp("D4", 19).unwrap()));
        assert_eq!(pos.next_to_move, Color::White);
        assert_eq!(pos.komi, 0.5);

        // Explicit initial stones win over the table.
        game.initial_state = Some(InitialState { black: "aabb".into(), white: "cc".into() });
        game.komi = Some(7.5);
        let pos = initial_position(&game).unwrap();
        assert_eq!(pos.black_stones.len(), 2);
        assert_eq!(pos.white_stones.len(), 1);
        assert_eq!(pos.next_to_move, Color::Black);
        assert_eq!(pos.komi, 7.5);

        game.white_goes_first = true;
        assert_eq!(initial_position(&game).unwrap().next_to_move, Color::White);
    }

    #[test]
    fn test_initial_position_errors() {
        assert!(matches!(
            initial_position(&Game::new(0, 9)),
            Err(ConfigError::InvalidBoardSize { .. })
        ));
        let mut game = Game::new(9, 9);
        game.initial_state = Some(InitialState { black: "zz".into(), white: String::new() });
        assert_eq!(initial_position(&game).unwrap_err(), ConfigError::StoneOffBoard(c(25, 25)));
        game.initial_state = Some(InitialState { black: "a".into(), white: String::new() });
        assert!(matches!(initial_position(&game), Err(ConfigError::InvalidEncoding(_))));
    }

    #[test]
    fn test_effective_moves() {
        let game = Game::new(9, 9).with_moves((0..5).map(|i| c(i, i)));
        let mut request = ReplayRequest::default();
        assert_eq!(effective_moves(&game, &request).len(), 5);

        request.limit = Some(3);
        assert_eq!(effective_moves(&game, &request), vec![c(0, 0), c(1, 1), c(2, 2)]);

        request.variation = Some(Variation { root_move_number: 2, moves: vec![c(8, 0), c(8, 1)] });
        assert_eq!(effective_moves(&game, &request), vec![c(0, 0), c(1, 1), c(8, 0)]);

        request.limit = None;
        assert_eq!(effective_moves(&game, &request).len(), 4);
    }

    #[test]
    fn test_replay_invalid_move_gives_empty_board() {
        let cache = PositionCache::new(8);
        let mut game = Game::new(9, 9).with_moves([c(0, 0), c(0, 0)]);
        game.komi = Some(7.5);
        let pos = replay(&cache, &game, &ReplayRequest::default()).unwrap();
        assert!(pos.black_stones.is_empty());
        assert!(pos.white_stones.is_empty());
        assert_eq!(pos.board_width, 9);
        assert_eq!(pos.komi, 7.5);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_replay_config_error_not_cached() {
        let cache = PositionCache::new(8);
        let mut game = Game::new(9, 9);
        game.handicap = 12;
        assert_eq!(
            replay(&cache, &game, &ReplayRequest::default()).unwrap_err(),
            ConfigError::TooManyHandicapStones(12)
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn test_position_list_from_sgf() {
        let list = position_list_from_sgf("B[cc]W[dd]B[..]", 9).unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list[0].black_stones.len(), 0);
        assert!(list[1].black_stones.contains(&c(2, 2)));
        assert!(list[2].white_stones.contains(&c(3, 3)));
        assert_eq!(list[3].last_move, Some(Cell::PASS));

        assert!(matches!(
            position_list_from_sgf("B[cc]W[cc]", 9),
            Err(BuildError::IllegalMove { index: 1, reason: MoveError::Occupied, .. })
        ));
        assert!(matches!(position_list_from_sgf("B[c", 9), Err(BuildError::InvalidEncoding(_))));
    }
}
