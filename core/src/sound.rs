// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sound cues the client can trigger.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Invalid drop
    Error,
    Tada,
    WaterSplash,
    Roll,
    /// Graded Anubis cues, 0 to 2
    Anubis(u8),
    AnubisFinal,
}

impl SoundCue {
    pub const ALL: [SoundCue; 8] = [
        SoundCue::Error,
        SoundCue::Tada,
        SoundCue::WaterSplash,
        SoundCue::Roll,
        SoundCue::Anubis(0),
        SoundCue::Anubis(1),
        SoundCue::Anubis(2),
        SoundCue::AnubisFinal,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SoundCue::Error => "error",
            SoundCue::Tada => "tada",
            SoundCue::WaterSplash => "water-splash",
            SoundCue::Roll => "roll",
            SoundCue::Anubis(0) => "anubis-0",
            SoundCue::Anubis(1) => "anubis-1",
            SoundCue::Anubis(_) => "anubis-2",
            SoundCue::AnubisFinal => "anubis-final",
        }
    }

    /// Asset file backing the cue
    pub fn file_name(self) -> &'static str {
        match self {
            SoundCue::Error => "error.mp3",
            SoundCue::Tada => "tada.mp3",
            SoundCue::WaterSplash => "splash.mp3",
            SoundCue::Roll => "roll.mp3",
            SoundCue::Anubis(0) => "anubis-1.mp3",
            SoundCue::Anubis(1) => "anubis-2.mp3",
            SoundCue::Anubis(_) => "anubis-3.mp3",
            SoundCue::AnubisFinal => "anubis-final.mp3",
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown sound cue '{0}'")]
pub struct UnknownSoundCue(pub String);

impl FromStr for SoundCue {
    type Err = UnknownSoundCue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundCue::ALL
            .into_iter()
            .find(|cue| cue.key() == s)
            .ok_or_else(|| UnknownSoundCue(s.to_string()))
    }
}

/// Audio collaborator; playback is fire-and-forget
pub trait SoundPlayer {
    fn play(&mut self, cue: SoundCue);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_parse_back() {
        for cue in SoundCue::ALL {
            assert_eq!(cue.key().parse::<SoundCue>(), Ok(cue));
        }
        assert_eq!(
            "anubis-3".parse::<SoundCue>(),
            Err(UnknownSoundCue("anubis-3".to_string()))
        );
    }
}
