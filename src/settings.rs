//! Audio preferences
//!
//! Persisted separately from the high score, one key per slider.

use crate::persistence::{Persisted, Storage};

/// Music is mixed well under the effects
pub const MUSIC_VOLUME_FACTOR: f32 = 0.2;
pub const SFX_VOLUME_FACTOR: f32 = 0.3;

/// Player-facing volume sliders, each in 0.0 - 1.0
#[derive(Debug, Clone)]
pub struct VolumeSettings {
    music: Persisted<f32>,
    sfx: Persisted<f32>,
}

impl VolumeSettings {
    const MUSIC_KEY: &'static str = "music-volume";
    const SFX_KEY: &'static str = "sfx-volume";

    /// Load both sliders, defaulting to full volume
    pub fn load(storage: &dyn Storage) -> Self {
        let mut music = Persisted::load(storage, Self::MUSIC_KEY, 1.0);
        let mut sfx = Persisted::load(storage, Self::SFX_KEY, 1.0);
        // Out-of-range values from storage are clamped in memory only
        clamp_slot(&mut music);
        clamp_slot(&mut sfx);
        Self { music, sfx }
    }

    pub fn music_volume(&self) -> f32 {
        *self.music.get()
    }

    pub fn sfx_volume(&self) -> f32 {
        *self.sfx.get()
    }

    pub fn set_music_volume(&mut self, storage: &mut dyn Storage, volume: f32) {
        self.music.set(storage, sanitize(volume));
    }

    pub fn set_sfx_volume(&mut self, storage: &mut dyn Storage, volume: f32) {
        self.sfx.set(storage, sanitize(volume));
    }

    /// Gain applied to the background loop
    pub fn effective_music(&self) -> f32 {
        self.music_volume() * MUSIC_VOLUME_FACTOR
    }

    /// Gain applied to hit / explosion / game-over effects
    pub fn effective_sfx(&self) -> f32 {
        self.sfx_volume() * SFX_VOLUME_FACTOR
    }
}

fn sanitize(volume: f32) -> f32 {
    if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) }
}

fn clamp_slot(slot: &mut Persisted<f32>) {
    let value = *slot.get();
    if sanitize(value) != value {
        log::warn!("Clamping stored \"{}\" ({}) into range", slot.key(), value);
        slot.set_in_memory(sanitize(value));
    }
}
