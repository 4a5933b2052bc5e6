//! Scoring module - score, rows, level and fall speed
//!
//! Classic rules only:
//! - Clearing `n` rows at once scores `n² · (level + 1) · multiplier`.
//! - Level is `rows_cleared_total / rows_per_level` and never goes down.
//! - The fall interval shrinks by `base / 20` per level down to a floor.

use serde::{Deserialize, Serialize};

use crate::types::FALL_STEP_DIVISOR;

/// Points for clearing `rows` rows at `level`
pub fn calculate_line_score(rows: u32, level: u32, multiplier: u32) -> u32 {
    rows.saturating_mul(rows)
        .saturating_mul(level.saturating_add(1))
        .saturating_mul(multiplier)
}

/// Level reached after `total_rows` cleared rows
pub fn calculate_level(total_rows: u32, rows_per_level: u32) -> u32 {
    total_rows / rows_per_level.max(1)
}

/// Gravity interval for a level (in milliseconds), clamped at `floor_ms`
pub fn fall_interval_ms(level: u32, base_ms: u32, floor_ms: u32) -> u32 {
    let step = base_ms / FALL_STEP_DIVISOR;
    base_ms
        .saturating_sub(step.saturating_mul(level))
        .max(floor_ms)
}

/// What a single lock cycle did to the progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearResult {
    pub rows: u32,
    pub points: u32,
    pub level_changed: bool,
}

/// Score, cleared rows and level of the current game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progression {
    score: u32,
    rows_cleared_total: u32,
    level: u32,
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Progression that has already cleared `rows_cleared_total` rows, score zero
    #[cfg(test)]
    fn with_rows(rows_cleared_total: u32, rows_per_level: u32) -> Self {
        Self {
            score: 0,
            rows_cleared_total,
            level: calculate_level(rows_cleared_total, rows_per_level),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rows_cleared_total(&self) -> u32 {
        self.rows_cleared_total
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Account for `rows` rows cleared by one lock.
    ///
    /// Points use the level in effect before the clear. Zero rows changes nothing.
    pub fn apply_clear(&mut self, rows: u32, multiplier: u32, rows_per_level: u32) -> ClearResult {
        if rows == 0 {
            return ClearResult::default();
        }

        let points = calculate_line_score(rows, self.level, multiplier);
        self.score = self.score.saturating_add(points);
        self.rows_cleared_total = self.rows_cleared_total.saturating_add(rows);

        let new_level = calculate_level(self.rows_cleared_total, rows_per_level);
        let level_changed = new_level > self.level;
        if level_changed {
            self.level = new_level;
        }

        ClearResult {
            rows,
            points,
            level_changed,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BASE_FALL_MS, FALL_FLOOR_MS, LINE_SCORE_MULTIPLIER, ROWS_PER_LEVEL};

    #[test]
    fn test_line_scores_level_0() {
        assert_eq!(calculate_line_score(1, 0, LINE_SCORE_MULTIPLIER), 10);
        assert_eq!(calculate_line_score(2, 0, LINE_SCORE_MULTIPLIER), 40);
        assert_eq!(calculate_line_score(3, 0, LINE_SCORE_MULTIPLIER), 90);
        assert_eq!(calculate_line_score(4, 0, LINE_SCORE_MULTIPLIER), 160);
    }

    #[test]
    fn test_line_scores_scale_with_level() {
        assert_eq!(calculate_line_score(1, 2, LINE_SCORE_MULTIPLIER), 30);
        assert_eq!(calculate_line_score(4, 5, LINE_SCORE_MULTIPLIER), 160 * 6);
        assert_eq!(calculate_line_score(0, 5, LINE_SCORE_MULTIPLIER), 0);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0, ROWS_PER_LEVEL), 0);
        assert_eq!(calculate_level(9, ROWS_PER_LEVEL), 0);
        assert_eq!(calculate_level(10, ROWS_PER_LEVEL), 1);
        assert_eq!(calculate_level(29, ROWS_PER_LEVEL), 2);
        assert_eq!(calculate_level(100, ROWS_PER_LEVEL), 10);
    }

    #[test]
    fn test_fall_intervals() {
        assert_eq!(fall_interval_ms(0, BASE_FALL_MS, FALL_FLOOR_MS), 500);
        assert_eq!(fall_interval_ms(1, BASE_FALL_MS, FALL_FLOOR_MS), 475);
        assert_eq!(fall_interval_ms(10, BASE_FALL_MS, FALL_FLOOR_MS), 250);
        assert_eq!(fall_interval_ms(18, BASE_FALL_MS, FALL_FLOOR_MS), 50);
        assert_eq!(fall_interval_ms(19, BASE_FALL_MS, FALL_FLOOR_MS), 50);
        assert_eq!(fall_interval_ms(1000, BASE_FALL_MS, FALL_FLOOR_MS), 50);
    }

    #[test]
    fn test_apply_clear_uses_level_before_clear() {
        let mut p = Progression::with_rows(9, ROWS_PER_LEVEL);
        let result = p.apply_clear(1, LINE_SCORE_MULTIPLIER, ROWS_PER_LEVEL);
        assert_eq!(result.points, 10);
        assert!(result.level_changed);
        assert_eq!(p.level(), 1);
        assert_eq!(p.rows_cleared_total(), 10);
    }

    #[test]
    fn test_single_row_at_level_two() {
        let mut p = Progression::with_rows(20, ROWS_PER_LEVEL);
        assert_eq!(p.level(), 2);
        let result = p.apply_clear(1, LINE_SCORE_MULTIPLIER, ROWS_PER_LEVEL);
        assert_eq!(result.points, 30);
        assert_eq!(p.score(), 30);
        assert!(!result.level_changed);
    }

    #[test]
    fn test_zero_rows_changes_nothing() {
        let mut p = Progression::with_rows(5, ROWS_PER_LEVEL);
        let before = p;
        assert_eq!(
            p.apply_clear(0, LINE_SCORE_MULTIPLIER, ROWS_PER_LEVEL),
            ClearResult::default()
        );
        assert_eq!(p, before);
    }

    #[test]
    fn test_levels_follow_row_milestones() {
        let mut p = Progression::new();
        let mut levels = Vec::new();
        for _ in 0..30 {
            p.apply_clear(1, LINE_SCORE_MULTIPLIER, ROWS_PER_LEVEL);
            levels.push(p.level());
        }
        assert_eq!(levels[8], 0);
        assert_eq!(levels[9], 1);
        assert_eq!(levels[19], 2);
        assert_eq!(levels[29], 3);
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
    }
}
