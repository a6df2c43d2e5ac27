// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sound effects manager for board events

use senet_core::{SoundCue, SoundPlayer};
use std::collections::HashMap;
use std::path::PathBuf;

/// Sound manager for playing game audio
pub struct SoundManager {
    /// Whether sounds are enabled
    enabled: bool,
    /// Master volume (0.0 to 1.0)
    volume: f32,
    /// Per-cue volume adjustments
    cue_volumes: HashMap<SoundCue, f32>,
    /// Where the cue files live
    sounds_dir: PathBuf,
    last_played: Option<SoundCue>,
}

impl SoundManager {
    pub fn new(sounds_dir: impl Into<PathBuf>) -> Self {
        let mut cue_volumes = HashMap::new();

        // The error buzz and the roll are quieter than the fanfares
        cue_volumes.insert(SoundCue::Error, 0.5);
        cue_volumes.insert(SoundCue::Roll, 0.6);
        cue_volumes.insert(SoundCue::WaterSplash, 0.7);
        cue_volumes.insert(SoundCue::Tada, 0.9);

        Self {
            enabled: true,
            volume: 0.8,
            cue_volumes,
            sounds_dir: sounds_dir.into(),
            last_played: None,
        }
    }

    /// Enable or disable all sounds
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set master volume (0.0 to 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Set volume for a specific cue
    pub fn set_cue_volume(&mut self, cue: SoundCue, volume: f32) {
        self.cue_volumes.insert(cue, volume.clamp(0.0, 1.0));
    }

    /// Effective volume for `cue`
    pub fn volume_for(&self, cue: SoundCue) -> f32 {
        self.volume * self.cue_volumes.get(&cue).copied().unwrap_or(1.0)
    }

    pub fn last_played(&self) -> Option<SoundCue> {
        self.last_played
    }
}

impl SoundPlayer for SoundManager {
    fn play(&mut self, cue: SoundCue) {
        if !self.enabled {
            return;
        }

        // No native audio backend yet, the cue is only logged
        let file = self.sounds_dir.join(cue.file_name());
        tracing::debug!(cue = %cue, file = %file.display(), volume = self.volume_for(cue), "Playing sound");
        self.last_played = Some(cue);
    }
}
