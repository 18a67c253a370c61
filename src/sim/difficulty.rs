//! Score-driven difficulty curves
//!
//! Pure functions of level or score. Cheap enough to call every tick.

use crate::tuning::Tuning;

/// Seconds a letter spawned at `level` takes to reach the base
///
/// Shrinks linearly with level, clamped at `min_speed`.
pub fn letter_speed(tuning: &Tuning, level: u32) -> f32 {
    let steps = level.saturating_sub(1) as f32;
    (tuning.initial_speed - steps * tuning.speed_decrease_per_level).max(tuning.min_speed)
}

/// Milliseconds between two spawns at `level`, clamped at `min_spawn_interval`
pub fn spawn_interval(tuning: &Tuning, level: u32) -> f64 {
    let steps = level.saturating_sub(1) as f64;
    (tuning.initial_spawn_interval - steps * tuning.spawn_decrease_per_level)
        .max(tuning.min_spawn_interval)
}

/// `floor(score / points_per_level) + 1`
pub fn level_from_score(tuning: &Tuning, score: u64) -> u32 {
    // A zero threshold would make every score level 1 rather than divide by zero
    let tier = score.checked_div(tuning.points_per_level).unwrap_or(0);
    tier.min(u64::from(u32::MAX - 1)) as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_one_uses_initial_values() {
        let t = Tuning::default();
        assert_eq!(letter_speed(&t, 1), 5.0);
        assert_eq!(spawn_interval(&t, 1), 2000.0);
    }

    #[test]
    fn test_curves_hit_their_floor() {
        let t = Tuning::default();
        // 2000 - 7 * 200 = 600, 2000 - 8 * 200 = 400 -> clamped
        assert_eq!(spawn_interval(&t, 8), 600.0);
        assert_eq!(spawn_interval(&t, 9), 500.0);
        assert_eq!(spawn_interval(&t, 1000), 500.0);
        assert_eq!(letter_speed(&t, 1000), 2.0);
    }

    #[test]
    fn test_level_from_score() {
        let t = Tuning::default();
        assert_eq!(level_from_score(&t, 0), 1);
        assert_eq!(level_from_score(&t, 49), 1);
        assert_eq!(level_from_score(&t, 50), 2);
        assert_eq!(level_from_score(&t, 120), 3);
    }

    #[test]
    fn test_zero_threshold_stays_at_level_one() {
        let t = Tuning {
            points_per_level: 0,
            ..Tuning::default()
        };
        assert_eq!(level_from_score(&t, 1_000), 1);
    }

    #[test]
    fn test_five_letters_reach_level_two() {
        let t = Tuning::default();
        let score = 5 * t.points_per_letter;
        assert_eq!(score, 50);
        let level = level_from_score(&t, score);
        assert_eq!(level, 2);
        assert!(spawn_interval(&t, level) < spawn_interval(&t, 1));
    }

    proptest! {
        #[test]
        fn prop_speed_floored_and_non_increasing(level in 1u32..10_000) {
            let t = Tuning::default();
            let here = letter_speed(&t, level);
            prop_assert!(here >= t.min_speed);
            prop_assert!(letter_speed(&t, level + 1) <= here);
        }

        #[test]
        fn prop_interval_floored_and_non_increasing(level in 1u32..10_000) {
            let t = Tuning::default();
            let here = spawn_interval(&t, level);
            prop_assert!(here >= t.min_spawn_interval);
            prop_assert!(spawn_interval(&t, level + 1) <= here);
        }

        #[test]
        fn prop_level_matches_floor_division(score in 0u64..10_000_000) {
            let t = Tuning::default();
            prop_assert_eq!(level_from_score(&t, score) as u64, score / t.points_per_level + 1);
            prop_assert!(level_from_score(&t, score + 1) >= level_from_score(&t, score));
        }
    }
}
