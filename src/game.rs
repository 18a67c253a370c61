//! Game instance wiring the engine to its collaborators
//!
//! Owns the engine, the landing watch and persistence. Hosts (the browser
//! bridge, the native demo) talk to this type only.

use crate::highscores::HighScore;
use crate::persistence::Storage;
use crate::settings::VolumeSettings;
use crate::sim::{Engine, GameEvent, LandingWatch, LetterId, Snapshot, Viewport};
use crate::tuning::Tuning;

/// Longest step one frame may take. Stalls (debugger, throttled tab) must
/// not dump a burst of spawns.
pub const MAX_FRAME_MS: f64 = 100.0;

pub struct Game<S: Storage> {
    engine: Engine,
    landing: LandingWatch,
    storage: S,
    high_score: HighScore,
    volume: VolumeSettings,
    /// Events drained from the engine, waiting for the next frame
    pending: Vec<GameEvent>,
}

impl<S: Storage> Game<S> {
    pub fn new(tuning: Tuning, seed: u64, storage: S) -> Self {
        let high_score = HighScore::load(&storage);
        let volume = VolumeSettings::load(&storage);
        Self {
            engine: Engine::new(tuning, seed, high_score.best()),
            landing: LandingWatch::new(),
            storage,
            high_score,
            volume,
            pending: Vec::new(),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    pub fn volume(&self) -> &VolumeSettings {
        &self.volume
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Advance one frame and return every event since the previous frame
    ///
    /// `dt_ms` is capped at [`MAX_FRAME_MS`].
    pub fn frame(&mut self, dt_ms: f64) -> Vec<GameEvent> {
        self.engine.advance(dt_ms.clamp(0.0, MAX_FRAME_MS));
        self.landing.deliver(&mut self.engine);
        self.flush();
        std::mem::take(&mut self.pending)
    }

    /// Keyboard input. Only single-character keys count, matched upper-cased.
    ///
    /// Keys whose upper case is longer than one character (`ß` -> `SS`)
    /// match nothing.
    pub fn key_pressed(&mut self, key: &str) -> Option<LetterId> {
        let upper = single_char(key.chars()).and_then(|c| single_char(c.to_uppercase()))?;
        self.tap(upper)
    }

    /// On-screen button for `character`
    pub fn tap(&mut self, character: char) -> Option<LetterId> {
        let destroyed = self.engine.destroy_letter(character);
        self.flush();
        destroyed
    }

    pub fn start(&mut self) {
        self.engine.start_game();
        self.flush();
    }

    pub fn pause(&mut self) {
        self.engine.pause_game();
        self.flush();
    }

    pub fn resume(&mut self) {
        self.engine.resume_game();
        self.flush();
    }

    pub fn restart(&mut self) {
        self.engine.restart_game();
        self.flush();
    }

    pub fn quit_to_menu(&mut self) {
        self.engine.quit_to_menu();
        self.flush();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.engine.set_visible(visible);
        self.flush();
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.engine.set_viewport(Viewport::new(width, height));
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.volume.set_music_volume(&mut self.storage, volume);
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.volume.set_sfx_volume(&mut self.storage, volume);
    }

    /// Move engine events into the pending queue, persisting as they pass
    fn flush(&mut self) {
        for event in self.engine.drain_events() {
            if let GameEvent::NewHighScore { score } = event {
                self.high_score.record(&mut self.storage, score);
            }
            self.pending.push(event);
        }
    }
}

fn single_char(chars: impl IntoIterator<Item = char>) -> Option<char> {
    let mut chars = chars.into_iter();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
