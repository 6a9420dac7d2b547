//! Numeric scoring under configurable rulesets.
//!
//! A [`Score`] only carries the components its ruleset counts; the others
//! stay `None`, which distinguishes "not counted" from "counted as zero".

use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::position::Position;

/// Which components count towards the score.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Ruleset {
    pub score_territory: bool,
    pub score_stones: bool,
    pub score_prisoners: bool,
    pub score_handicap: bool,
    /// AGA rules credit one stone less than the handicap
    pub aga_handicap_scoring: bool,
}

impl Ruleset {
    /// Territory plus prisoners.
    pub fn japanese() -> Self {
        Ruleset {
            score_territory: true,
            score_prisoners: true,
            ..Ruleset::default()
        }
    }

    /// Area scoring with full handicap compensation.
    pub fn chinese() -> Self {
        Ruleset {
            score_territory: true,
            score_stones: true,
            score_handicap: true,
            ..Ruleset::default()
        }
    }

    pub fn aga() -> Self {
        Ruleset {
            aga_handicap_scoring: true,
            ..Ruleset::chinese()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub handicap: Option<u32>,
    pub komi: Option<f32>,
    pub prisoners: Option<u32>,
    pub stones: Option<u32>,
    /// Empty or dead-stone points of the colour's territory set. Its own
    /// living stones are left out even when the set holds them (area
    /// scoring); those count under `stones`.
    pub territory: Option<u32>,
    pub total: Option<f32>,
}

impl Score {
    fn summed(mut self) -> Self {
        let counted = [self.handicap, self.prisoners, self.stones, self.territory];
        let points: u32 = counted.iter().flatten().sum();
        self.total = Some(points as f32 + self.komi.unwrap_or(0.0));
        self
    }
}

fn score_color(pos: &Position, color: Color, ruleset: &Ruleset) -> Score {
    let mut score = Score::default();
    if color == Color::White {
        if ruleset.score_handicap {
            score.handicap = Some(if ruleset.aga_handicap_scoring {
                pos.handicap.saturating_sub(1)
            } else {
                pos.handicap
            });
        }
        score.komi = Some(pos.komi);
    }
    if ruleset.score_prisoners {
        let dead = pos.dead_stones(color.opponent()).count() as u32;
        score.prisoners = Some(dead + pos.capture_count(color));
    }
    if ruleset.score_stones {
        score.stones = Some(pos.living_stone_count(color));
    }
    if ruleset.score_territory {
        // Area-style territory sets include the owner's stones; those are
        // reported under `stones` instead.
        let own = pos.stones(color);
        let territory = pos
            .territory(color)
            .iter()
            .filter(|c| !(own.contains(c) && !pos.removed_spots.contains(c)))
            .count();
        score.territory = Some(territory as u32);
    }
    score.summed()
}

/// Score both colours of `pos`, White first.
pub fn score_position_partial(pos: &Position, ruleset: &Ruleset) -> (Score, Score) {
    (
        score_color(pos, Color::White, ruleset),
        score_color(pos, Color::Black, ruleset),
    )
}

/// Black's total minus White's total.
pub fn score_margin(white: &Score, black: &Score) -> f32 {
    black.total.unwrap_or(0.0) - white.total.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Cell;

    fn sample() -> Position {
        // Black wall on column 2, white wall on column 4, one dead white stone
        // inside black's area.
        let black: Vec<Cell> = (0..5).map(|y| Cell::new(2, y)).collect();
        let mut white: Vec<Cell> = (0..5).map(|y| Cell::new(4, y)).collect();
        white.push(Cell::new(0, 0));
        let mut pos = Position::setup(5, 5, &black, &white);
        pos.removed_spots.insert(Cell::new(0, 0));
        pos.black_territory.extend((0..2).flat_map(|x| (0..5).map(move |y| Cell::new(x, y))));
        pos.white_territory.extend((0..5).map(|y| Cell::new(3, y)));
        pos.black_capture_count = 2;
        pos.white_capture_count = 1;
        pos.komi = 6.5;
        pos.handicap = 3;
        pos
    }

    #[test]
    fn test_japanese() {
        let (white, black) = score_position_partial(&sample(), &Ruleset::japanese());
        assert_eq!(black.territory, Some(10));
        assert_eq!(black.prisoners, Some(3));
        assert_eq!(black.stones, None);
        assert_eq!(black.komi, None);
        assert_eq!(black.total, Some(13.0));

        assert_eq!(white.territory, Some(5));
        assert_eq!(white.prisoners, Some(1));
        assert_eq!(white.komi, Some(6.5));
        assert_eq!(white.handicap, None);
        assert_eq!(white.total, Some(12.5));
    }

    #[test]
    fn test_chinese_counts_stones_once() {
        let mut pos = sample();
        // Area scoring adds living stones to the territory sets.
        let black_stones = pos.black_stones.clone();
        pos.black_territory.extend(black_stones);
        let (white, black) = score_position_partial(&pos, &Ruleset::chinese());
        assert_eq!(black.stones, Some(5));
        assert_eq!(black.territory, Some(10));
        assert_eq!(black.prisoners, None);
        assert_eq!(black.total, Some(15.0));

        assert_eq!(white.stones, Some(5));
        assert_eq!(white.handicap, Some(3));
        assert_eq!(white.total, Some(5.0 + 5.0 + 3.0 + 6.5));
    }

    #[test]
    fn test_aga_handicap() {
        let (white, _) = score_position_partial(&sample(), &Ruleset::aga());
        assert_eq!(white.handicap, Some(2));

        let mut even = sample();
        even.handicap = 0;
        let (white, _) = score_position_partial(&even, &Ruleset::aga());
        assert_eq!(white.handicap, Some(0));
    }

    #[test]
    fn test_nothing_counted() {
        let (white, black) = score_position_partial(&sample(), &Ruleset::default());
        assert_eq!(black, Score { total: Some(0.0), ..Score::default() });
        assert_eq!(white.total, Some(6.5));
        assert_eq!(score_margin(&white, &black), -6.5);
    }
}
