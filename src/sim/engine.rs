//! Session state machine
//!
//! [`Engine`] owns every mutable piece of a session: letters, the destroyed
//! set, particles, score/lives/level and the flow flags. Its methods are the
//! only mutation surface. Time only moves through [`Engine::advance`], which
//! flies letters, fires deferred effects and runs the spawn cadence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::difficulty::{letter_speed, level_from_score, spawn_interval};
use super::game_loop::GameLoop;
use super::spawn::{Viewport, random_direction, spawn_position};
use super::state::{
    GameEvent, GamePhase, Letter, LetterId, LetterView, Particle, ParticleView, Snapshot,
};
use super::timers::Timers;
use crate::tuning::{LETTER_COLORS, Tuning};

/// Effects that land some time after the operation that caused them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    /// Destruction animation finished; drop the letter for good
    RemoveLetter(LetterId),
    ParticleExpired(LetterId),
}

/// The game-state engine
#[derive(Debug, Clone)]
pub struct Engine {
    tuning: Tuning,
    viewport: Viewport,
    rng: Pcg32,
    now_ms: f64,

    game_started: bool,
    paused: bool,
    game_over: bool,

    score: u64,
    lives: u32,
    level: u32,
    high_score: u64,

    /// Live letters in spawn order
    letters: Vec<Letter>,
    /// Letters inside their destruction animation
    destroyed: Vec<LetterId>,
    particles: Vec<Particle>,

    game_loop: GameLoop,
    timers: Timers<Deferred>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl Engine {
    /// New engine sitting in the menu
    ///
    /// `high_score` is the best score loaded from storage.
    pub fn new(tuning: Tuning, seed: u64, high_score: u64) -> Self {
        let game_loop = GameLoop::new(spawn_interval(&tuning, 1));
        Self {
            lives: tuning.initial_lives,
            tuning,
            viewport: Viewport::default(),
            rng: Pcg32::seed_from_u64(seed),
            now_ms: 0.0,
            game_started: false,
            paused: false,
            game_over: false,
            score: 0,
            level: 1,
            high_score,
            letters: Vec::new(),
            destroyed: Vec::new(),
            particles: Vec::new(),
            game_loop,
            timers: Timers::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    // === Flow ===

    pub fn start_game(&mut self) {
        if self.game_started {
            return;
        }
        self.game_started = true;
        self.events.push(GameEvent::Started);
        log::info!("Game started");
        self.sync_loop();
    }

    pub fn pause_game(&mut self) {
        if !self.game_started || self.game_over || self.paused {
            return;
        }
        self.paused = true;
        self.events.push(GameEvent::Paused);
        log::info!("Game paused");
        self.sync_loop();
    }

    pub fn resume_game(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.events.push(GameEvent::Resumed);
        log::info!("Game resumed");
        self.sync_loop();
    }

    /// Fresh session with the same `game_started` flag
    pub fn restart_game(&mut self) {
        self.reset_session();
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted");
        self.sync_loop();
    }

    pub fn quit_to_menu(&mut self) {
        self.game_started = false;
        self.reset_session();
        self.events.push(GameEvent::QuitToMenu);
        log::info!("Quit to menu");
        self.sync_loop();
    }

    /// Host visibility changed (tab hidden / shown)
    ///
    /// Hiding auto-pauses a running session. Showing never auto-resumes.
    pub fn set_visible(&mut self, visible: bool) {
        if !self.game_started {
            return;
        }
        if visible {
            self.events.push(GameEvent::Visible);
        } else {
            if self.phase() == GamePhase::Playing {
                log::info!("Auto-paused (hidden)");
            }
            self.pause_game();
            self.events.push(GameEvent::Hidden);
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // === Gameplay ===

    /// Destroy the earliest-spawned live letter showing `key`
    ///
    /// Returns the id of the destroyed letter, or `None` when nothing matched
    /// (or the session is not running).
    pub fn destroy_letter(&mut self, key: char) -> Option<LetterId> {
        if self.phase() != GamePhase::Playing {
            return None;
        }

        let letter = self
            .letters
            .iter()
            .find(|l| l.character == key && !self.destroyed.contains(&l.id))?;
        let (id, pos, color) = (letter.id, letter.position(), letter.color);

        self.destroyed.push(id);
        self.score += self.tuning.points_per_letter;
        self.events.push(GameEvent::LetterDestroyed { id, character: key });
        log::debug!("Destroyed letter {} ({})", id, key);

        self.particles.push(Particle { id, pos, color });
        self.timers.schedule(
            self.now_ms + self.tuning.letter_destruction_ms,
            Deferred::RemoveLetter(id),
        );
        self.timers
            .schedule(self.now_ms + self.tuning.particle_ms, Deferred::ParticleExpired(id));

        self.apply_score_effects();
        Some(id)
    }

    /// A letter finished its flight without being destroyed
    ///
    /// Callers guarantee `id` is live and not destroyed; this method does not
    /// re-check. Ignored outside a started, running session.
    pub fn handle_letter_reach_base(&mut self, id: LetterId) {
        if !self.game_started || self.game_over {
            return;
        }

        self.letters.retain(|l| l.id != id);
        self.destroyed.retain(|d| *d != id);
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost { lives: self.lives });
        log::debug!("Letter {} reached the base, {} lives left", id, self.lives);

        if self.lives == 0 {
            self.game_over = true;
            self.letters.clear();
            self.destroyed.clear();
            self.timers
                .cancel_where(|d| matches!(d, Deferred::RemoveLetter(_)));
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over at level {} with score {}", self.level, self.score);
            self.sync_loop();
        }
    }

    /// Advance the engine clock by `dt_ms`
    ///
    /// Non-finite and non-positive deltas are ignored.
    pub fn advance(&mut self, dt_ms: f64) {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        self.now_ms += dt_ms;

        if self.phase() == GamePhase::Playing {
            for letter in &mut self.letters {
                if !self.destroyed.contains(&letter.id) {
                    letter.fly(dt_ms);
                }
            }
        }

        for deferred in self.timers.take_due(self.now_ms) {
            self.apply_deferred(deferred);
        }

        let ticks = self.game_loop.advance(dt_ms);
        for _ in 0..ticks {
            self.spawn_letter();
        }
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        GamePhase::from_flags(self.game_started, self.paused, self.game_over)
    }

    pub fn game_started(&self) -> bool {
        self.game_started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn destroyed_letters(&self) -> &[LetterId] {
        &self.destroyed
    }

    pub fn is_destroyed(&self, id: LetterId) -> bool {
        self.destroyed.contains(&id)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Current spawn cadence
    pub fn spawn_interval_ms(&self) -> f64 {
        self.game_loop.interval_ms()
    }

    pub fn is_spawning(&self) -> bool {
        self.game_loop.is_active()
    }

    /// Render-ready copy of the session
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase(),
            score: self.score,
            lives: self.lives,
            level: self.level,
            high_score: self.high_score,
            letters: self
                .letters
                .iter()
                .map(|l| {
                    let pos = l.position();
                    LetterView {
                        id: l.id.to_string(),
                        character: l.character,
                        direction: l.direction,
                        x: pos.x,
                        y: pos.y,
                        progress: l.progress,
                        speed: l.speed,
                        spawned_at_ms: l.spawned_at_ms,
                        color: l.color_hex(),
                        destroyed: self.is_destroyed(l.id),
                    }
                })
                .collect(),
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    id: p.id.to_string(),
                    x: p.pos.x,
                    y: p.pos.y,
                    color: p.color_hex(),
                })
                .collect(),
        }
    }

    // === Internals ===

    fn spawn_letter(&mut self) {
        if self.tuning.alphabet.is_empty() {
            return;
        }
        let index = self.rng.random_range(0..self.tuning.alphabet.len());
        let character = self.tuning.alphabet[index];
        self.spawn_letter_of(character);
    }

    pub(crate) fn spawn_letter_of(&mut self, character: char) -> LetterId {
        let id = LetterId(self.next_id);
        self.next_id += 1;

        let direction = random_direction(&mut self.rng);
        let path = spawn_position(direction, self.viewport, &self.tuning, &mut self.rng);
        let color = self.rng.random_range(0..LETTER_COLORS.len()) as u32;

        self.letters.push(Letter {
            id,
            character,
            direction,
            path,
            speed: letter_speed(&self.tuning, self.level),
            color,
            spawned_at_ms: self.now_ms,
            flown_ms: 0.0,
            progress: 0.0,
        });
        self.events.push(GameEvent::LetterSpawned { id, character });
        log::debug!("Spawned letter {} ({}) from {}", id, character, direction.as_str());
        id
    }

    fn apply_deferred(&mut self, deferred: Deferred) {
        match deferred {
            Deferred::RemoveLetter(id) => {
                self.letters.retain(|l| l.id != id);
                self.destroyed.retain(|d| *d != id);
            }
            Deferred::ParticleExpired(id) => {
                self.particles.retain(|p| p.id != id);
            }
        }
    }

    /// Level and high score follow the score
    fn apply_score_effects(&mut self) {
        let level = level_from_score(&self.tuning, self.score);
        if level != self.level {
            self.level = level;
            self.events.push(GameEvent::LevelUp { level });
            log::info!(
                "Level up! Now level {}, speed {}s, interval {}ms",
                level,
                letter_speed(&self.tuning, level),
                spawn_interval(&self.tuning, level)
            );
            self.sync_loop();
        }
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }
    }

    fn reset_session(&mut self) {
        self.paused = false;
        self.game_over = false;
        self.score = 0;
        self.lives = self.tuning.initial_lives;
        self.level = 1;
        self.letters.clear();
        self.destroyed.clear();
        self.particles.clear();
        self.timers.clear();
    }

    /// Point the spawn cadence at the current level and phase
    fn sync_loop(&mut self) {
        self.game_loop
            .set_interval(spawn_interval(&self.tuning, self.level));
        self.game_loop.set_active(self.phase() == GamePhase::Playing);
    }
}
