//! Letter Strike - type the falling letters before they hit the base
//!
//! Core modules:
//! - `sim`: Deterministic game state (spawning, difficulty, scoring, flow)
//! - `game`: Engine wired to persistence and input normalisation
//! - `platform`: Browser bindings
//! - `persistence`: Key-value storage with graceful fallback
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::VolumeSettings;
pub use tuning::Tuning;
