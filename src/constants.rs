//! Engine-wide constants.
//!
//! Board geometry is a runtime property of each [`Position`](crate::position::Position),
//! so unlike a fixed-size playing engine nothing here depends on the board size.

// =============================================================================
// Board Geometry
// =============================================================================

/// Largest board edge the coordinate converters can express (A..Z minus I).
pub const MAX_BOARD_SIZE: i32 = 25;

/// Column letters used by GTP notation. `I` is skipped to avoid confusion with `J`.
pub const GTP_COLUMNS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Orthogonal neighbour offsets: North, South, West, East.
pub const DELTA: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

// =============================================================================
// Special Move Values
// =============================================================================

/// Column value reserved for the pass sentinel.
pub const PASS_X: i32 = -1;

/// SGF encoding of a pass.
pub const SGF_PASS: &str = "..";

/// GTP encoding of a pass.
pub const GTP_PASS: &str = "PASS";

// =============================================================================
// Handicap
// =============================================================================

/// Highest handicap the placement tables cover.
pub const MAX_HANDICAP: u32 = 9;

// =============================================================================
// Replay and Caching
// =============================================================================

/// Number of ancestor snapshots kept on a position produced by a multi-move
/// replay. Two is what the ko and double-pass checks look at.
pub const REPLAY_HISTORY_DEPTH: usize = 2;

/// Default number of replayed positions kept by the position cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

// =============================================================================
// Ownership Estimation
// =============================================================================

/// Number of trials requested from an external ownership estimator.
pub const ESTIMATOR_TRIALS: u32 = 10_000;

/// Ownership tolerance passed to an external ownership estimator.
pub const ESTIMATOR_TOLERANCE: f32 = 0.3;

/// Board value of a black stone / black-owned point in estimator arrays.
pub const OWNER_BLACK: i8 = 1;

/// Board value of a white stone / white-owned point in estimator arrays.
pub const OWNER_WHITE: i8 = -1;

/// Board value of an empty / neutral point in estimator arrays.
pub const OWNER_NONE: i8 = 0;
