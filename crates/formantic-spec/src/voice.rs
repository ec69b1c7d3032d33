//! Voice preference record.
//!
//! Personalization parameters are consumed by downstream rendering engines,
//! not by the formant synthesizer. They ride along with a request so that a
//! report records what the listener asked for.

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Relative voice pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchLevel {
    /// Lower than the engine default.
    Low,
    /// Engine default.
    #[default]
    Medium,
    /// Higher than the engine default.
    High,
}

/// Speaking rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechRate {
    /// Slower than the engine default.
    Slow,
    /// Engine default.
    #[default]
    Medium,
    /// Faster than the engine default.
    Fast,
}

/// Accent hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    /// No particular accent.
    #[default]
    Neutral,
    /// British English.
    British,
    /// American English.
    American,
    /// Australian English.
    Australian,
}

/// Voice gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceGender {
    /// Male voice.
    Male,
    /// Female voice.
    #[default]
    Female,
}

/// Fixed-shape personalization record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoicePreferences {
    /// Relative pitch.
    #[serde(default)]
    pub pitch: PitchLevel,
    /// Speaking rate.
    #[serde(default)]
    pub speed: SpeechRate,
    /// Loudness on a 1-10 scale.
    #[serde(default = "default_volume")]
    pub volume: u8,
    /// Accent hint.
    #[serde(default)]
    pub accent: Accent,
    /// Voice gender.
    #[serde(default)]
    pub voice_gender: VoiceGender,
}

/// Lowest accepted volume.
pub const MIN_VOLUME: u8 = 1;
/// Highest accepted volume.
pub const MAX_VOLUME: u8 = 10;

fn default_volume() -> u8 {
    5
}

impl Default for VoicePreferences {
    fn default() -> Self {
        Self {
            pitch: PitchLevel::default(),
            speed: SpeechRate::default(),
            volume: default_volume(),
            accent: Accent::default(),
            voice_gender: VoiceGender::default(),
        }
    }
}

impl VoicePreferences {
    /// Sets the pitch.
    pub fn with_pitch(mut self, pitch: PitchLevel) -> Self {
        self.pitch = pitch;
        self
    }

    /// Sets the speaking rate.
    pub fn with_speed(mut self, speed: SpeechRate) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the volume. Validated by [`VoicePreferences::validate`].
    pub fn with_volume(mut self, volume: u8) -> Self {
        self.volume = volume;
        self
    }

    /// Checks field ranges.
    pub fn validate(&self) -> Result<(), RequestError> {
        if !(MIN_VOLUME..=MAX_VOLUME).contains(&self.volume) {
            return Err(RequestError::InvalidVolume {
                volume: self.volume,
            });
        }
        Ok(())
    }
}
