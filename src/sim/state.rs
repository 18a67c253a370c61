//! Entities, flow phases and events
//!
//! Everything the presentation layer reads lives here. Mutation happens only
//! through [`super::Engine`].

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spawn::{Direction, SpawnPath};
use crate::tuning::LETTER_COLORS;

/// Identifier of a spawned letter, never reused within an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LetterId(pub u32);

impl fmt::Display for LetterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A falling target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Letter {
    pub id: LetterId,
    pub character: char,
    pub direction: Direction,
    pub path: SpawnPath,
    /// Seconds to reach the base; fixed at spawn
    pub speed: f32,
    /// Palette index, see [`LETTER_COLORS`]
    pub color: u32,
    /// Engine clock at spawn
    pub spawned_at_ms: f64,
    /// Time spent flying; excludes pauses and the destruction animation
    pub flown_ms: f64,
    /// Flight completion in [0, 1]
    pub progress: f32,
}

impl Letter {
    /// Current on-screen position
    pub fn position(&self) -> Vec2 {
        self.path.lerp(self.progress)
    }

    pub fn color_hex(&self) -> &'static str {
        palette(self.color)
    }

    pub fn has_landed(&self) -> bool {
        self.progress >= 1.0
    }

    /// Move along the flight by `dt_ms`
    pub(crate) fn fly(&mut self, dt_ms: f64) {
        self.flown_ms += dt_ms;
        let duration_ms = f64::from(self.speed) * 1000.0;
        self.progress = if duration_ms <= 0.0 {
            1.0
        } else {
            (self.flown_ms / duration_ms).min(1.0) as f32
        };
    }
}

/// Burst left behind by a destroyed letter (purely visual)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    /// Id of the letter that was destroyed
    pub id: LetterId,
    pub pos: Vec2,
    pub color: u32,
}

impl Particle {
    pub fn color_hex(&self) -> &'static str {
        palette(self.color)
    }
}

fn palette(index: u32) -> &'static str {
    LETTER_COLORS[index as usize % LETTER_COLORS.len()]
}

/// Session flow, derived from the started / paused / over flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started
    Menu,
    /// Letters spawning and falling
    Playing,
    /// Started, spawning suspended
    Paused,
    /// Lives exhausted
    GameOver,
}

impl GamePhase {
    pub fn from_flags(started: bool, paused: bool, over: bool) -> Self {
        match (started, paused, over) {
            (false, _, _) => GamePhase::Menu,
            (true, _, true) => GamePhase::GameOver,
            (true, true, false) => GamePhase::Paused,
            (true, false, false) => GamePhase::Playing,
        }
    }
}

/// Lifecycle notifications for audio, visual effects and persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Restarted,
    QuitToMenu,
    LetterSpawned { id: LetterId, character: char },
    LetterDestroyed { id: LetterId, character: char },
    LifeLost { lives: u32 },
    GameOver { score: u64 },
    LevelUp { level: u32 },
    NewHighScore { score: u64 },
    /// Host reported the session went to the background
    Hidden,
    /// Host reported the session is visible again
    Visible,
}

/// Render-ready view of one letter
#[derive(Debug, Clone, Serialize)]
pub struct LetterView {
    pub id: String,
    pub character: char,
    pub direction: Direction,
    pub x: f32,
    pub y: f32,
    pub progress: f32,
    pub speed: f32,
    /// Engine clock at spawn; stable key for per-letter animations
    pub spawned_at_ms: f64,
    pub color: &'static str,
    pub destroyed: bool,
}

/// Render-ready view of one particle burst
#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub color: &'static str,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub high_score: u64,
    pub letters: Vec<LetterView>,
    pub particles: Vec<ParticleView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(speed: f32) -> Letter {
        Letter {
            id: LetterId(1),
            character: 'Z',
            direction: Direction::Top,
            path: SpawnPath {
                entry: Vec2::new(10.0, -400.0),
                destination: Vec2::ZERO,
            },
            speed,
            color: 0,
            spawned_at_ms: 0.0,
            flown_ms: 0.0,
            progress: 0.0,
        }
    }

    #[test]
    fn test_flight_progress() {
        let mut l = letter(2.0);
        l.fly(1_000.0);
        assert!((l.progress - 0.5).abs() < 1e-6);
        assert_eq!(l.position(), Vec2::new(5.0, -200.0));
        l.fly(5_000.0);
        assert!(l.has_landed());
        assert_eq!(l.position(), Vec2::ZERO);
    }

    #[test]
    fn test_zero_speed_lands_immediately() {
        let mut l = letter(0.0);
        l.fly(1.0);
        assert!(l.has_landed());
    }

    #[test]
    fn test_phase_from_flags() {
        assert_eq!(GamePhase::from_flags(false, true, true), GamePhase::Menu);
        assert_eq!(GamePhase::from_flags(true, true, true), GamePhase::GameOver);
        assert_eq!(GamePhase::from_flags(true, true, false), GamePhase::Paused);
        assert_eq!(GamePhase::from_flags(true, false, false), GamePhase::Playing);
    }

    #[test]
    fn test_palette_wraps() {
        let mut l = letter(1.0);
        l.color = LETTER_COLORS.len() as u32;
        assert_eq!(l.color_hex(), LETTER_COLORS[0]);
    }
}
