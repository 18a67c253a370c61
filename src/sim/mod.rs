//! Deterministic game-state module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Time only advances through `Engine::advance`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod engine;
pub mod flight;
pub mod game_loop;
pub mod spawn;
pub mod state;
pub mod timers;

pub use difficulty::{letter_speed, level_from_score, spawn_interval};
pub use engine::Engine;
pub use flight::LandingWatch;
pub use game_loop::GameLoop;
pub use spawn::{Direction, SpawnPath, Viewport, random_direction, spawn_position};
pub use state::{
    GameEvent, GamePhase, Letter, LetterId, LetterView, Particle, ParticleView, Snapshot,
};
pub use timers::{TimerId, Timers};
