//! Scoring module - line scores, drop bonuses, leveling, gravity speed
//!
//! All score values are integers. The level/difficulty multiplier is
//! applied as `base * level_multiplier * difficulty_percent / 100` with
//! truncating integer division; a single soft-drop cell on Easy is worth
//! zero points.

use crate::types::Difficulty;

/// Base scores for 0..=4 simultaneously cleared lines
pub const LINE_SCORES: [i64; 5] = [0, 100, 300, 500, 800];

/// Soft drop bonus per cell descended (before the multiplier)
pub const SOFT_DROP_SCORE: i64 = 1;
/// Hard drop bonus per cell of drop distance (before the multiplier)
pub const HARD_DROP_SCORE: i64 = 2;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 20;

/// Base score for `lines` simultaneous clears.
/// Five or more (possible through combined item clears) extend the
/// four-line score by 100 per extra line.
pub fn line_clear_score(lines: usize) -> i64 {
    match lines {
        0 => 0,
        1..=4 => LINE_SCORES[lines],
        n => LINE_SCORES[4] + 100 * (n as i64 - 4),
    }
}

/// Integer level multiplier: 1 for levels 1-5, 2 for 6-10, and so on
pub fn level_multiplier(level: u32) -> i64 {
    (1 + (level.max(1) as i64 - 1) / 5).min(4)
}

/// Apply the level/difficulty multiplier to a base score
pub fn apply_score_factor(base: i64, level: u32, difficulty: Difficulty) -> i64 {
    base * level_multiplier(level) * difficulty.score_percent() / 100
}

/// Drop bonus before the multiplier
pub fn drop_score(cells: i64, hard: bool) -> i64 {
    if hard {
        cells * HARD_DROP_SCORE
    } else {
        cells * SOFT_DROP_SCORE
    }
}

/// Level for a line total: one level per `level_factor` lines, capped
pub fn level_for_lines(lines: u32, difficulty: Difficulty) -> u32 {
    (lines / difficulty.level_factor() + 1).min(MAX_LEVEL)
}

/// Gravity interval for a level, in milliseconds (host timer contract)
pub fn drop_interval_ms(level: u32) -> u64 {
    let level = u64::from(level.max(1));
    (1000u64.saturating_sub((level - 1) * 50)).max(50)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_base_scores() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 300);
        assert_eq!(line_clear_score(3), 500);
        assert_eq!(line_clear_score(4), 800);
    }

    #[test]
    fn test_line_clear_beyond_four() {
        assert_eq!(line_clear_score(5), 900);
        assert_eq!(line_clear_score(6), 1000);
        assert_eq!(line_clear_score(10), 1400);
    }

    #[test]
    fn test_level_multiplier_steps() {
        assert_eq!(level_multiplier(1), 1);
        assert_eq!(level_multiplier(5), 1);
        assert_eq!(level_multiplier(6), 2);
        assert_eq!(level_multiplier(10), 2);
        assert_eq!(level_multiplier(11), 3);
        assert_eq!(level_multiplier(16), 4);
        assert_eq!(level_multiplier(20), 4);
    }

    #[test]
    fn test_score_factor_by_difficulty() {
        // Level 1: multiplier 1, difficulty percent applies alone
        assert_eq!(apply_score_factor(100, 1, Difficulty::Easy), 80);
        assert_eq!(apply_score_factor(100, 1, Difficulty::Normal), 100);
        assert_eq!(apply_score_factor(100, 1, Difficulty::Hard), 120);
        // Level 6 doubles the base first
        assert_eq!(apply_score_factor(300, 6, Difficulty::Hard), 720);
    }

    #[test]
    fn test_score_factor_truncates() {
        // A single soft-drop cell on Easy rounds down to zero
        assert_eq!(apply_score_factor(drop_score(1, false), 1, Difficulty::Easy), 0);
        assert_eq!(apply_score_factor(drop_score(1, true), 1, Difficulty::Easy), 1);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(drop_score(10, false), 10);
        assert_eq!(drop_score(10, true), 20);
        assert_eq!(drop_score(0, true), 0);
    }

    #[test]
    fn test_level_progression_by_difficulty() {
        assert_eq!(level_for_lines(0, Difficulty::Normal), 1);
        assert_eq!(level_for_lines(9, Difficulty::Normal), 1);
        assert_eq!(level_for_lines(10, Difficulty::Normal), 2);
        assert_eq!(level_for_lines(10, Difficulty::Hard), 2);
        assert_eq!(level_for_lines(8, Difficulty::Hard), 2);
        assert_eq!(level_for_lines(11, Difficulty::Easy), 1);
        assert_eq!(level_for_lines(12, Difficulty::Easy), 2);
    }

    #[test]
    fn test_level_caps_at_twenty() {
        assert_eq!(level_for_lines(1000, Difficulty::Hard), 20);
    }

    #[test]
    fn test_drop_interval_floors() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 950);
        assert_eq!(drop_interval_ms(20), 50);
        assert_eq!(drop_interval_ms(40), 50);
    }
}
