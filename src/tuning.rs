//! Data-driven game balance
//!
//! Every number that shapes a session lives in [`Tuning`]. The engine never
//! reads free-floating constants, so tests can run with alternate tunings.

use serde::{Deserialize, Serialize};

/// Palette letters are drawn in (also used for their destruction particles)
pub const LETTER_COLORS: [&str; 6] = [
    "#ffd93d", "#6bcf7f", "#4ecdc4", "#a084dc", "#f06292", "#ff6b6b",
];

/// Immutable balance configuration injected into the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Symbols letters are drawn from
    pub alphabet: Vec<char>,

    // === Player ===
    pub initial_lives: u32,
    pub points_per_letter: u64,
    pub points_per_level: u64,

    // === Difficulty ===
    /// Seconds for a level-1 letter to reach the base
    pub initial_speed: f32,
    /// Floor for the traversal duration (seconds)
    pub min_speed: f32,
    pub speed_decrease_per_level: f32,
    /// Milliseconds between spawns at level 1
    pub initial_spawn_interval: f64,
    pub min_spawn_interval: f64,
    pub spawn_decrease_per_level: f64,

    // === Animation timings (milliseconds) ===
    pub letter_destruction_ms: f64,
    pub particle_ms: f64,

    // === Spawning geometry (pixels) ===
    /// Keeps letters away from the edges of the perpendicular axis
    pub spawn_margin: f32,
    /// Rendered glyph size, used to push entry points fully off-screen
    pub letter_extent: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            alphabet: vec!['Z', 'Q', 'S', 'D'],

            initial_lives: 3,
            points_per_letter: 10,
            points_per_level: 50,

            initial_speed: 5.0,
            min_speed: 2.0,
            speed_decrease_per_level: 0.3,
            initial_spawn_interval: 2000.0,
            min_spawn_interval: 500.0,
            spawn_decrease_per_level: 200.0,

            letter_destruction_ms: 300.0,
            particle_ms: 500.0,

            spawn_margin: 100.0,
            letter_extent: 64.0,
        }
    }
}

impl Tuning {
    /// Whether `c` is one of the playable symbols
    pub fn is_playable(&self, c: char) -> bool {
        self.alphabet.contains(&c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"initial_lives": 5}"#).unwrap();
        assert_eq!(tuning.initial_lives, 5);
        assert_eq!(tuning.points_per_level, 50);
        assert_eq!(tuning.alphabet, vec!['Z', 'Q', 'S', 'D']);
    }

    #[test]
    fn test_is_playable() {
        let tuning = Tuning::default();
        assert!(tuning.is_playable('Q'));
        assert!(!tuning.is_playable('A'));
    }
}
