//! Synthesis request configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::voice::VoicePreferences;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;
/// Default steady-state duration per phoneme in seconds.
pub const DEFAULT_PHONEME_DURATION: f64 = 0.1;
/// Default transition duration between adjacent phonemes in seconds.
pub const DEFAULT_TRANSITION_DURATION: f64 = 0.05;
/// Highest accepted sample rate in Hz.
pub const MAX_SAMPLE_RATE: u32 = 192_000;
/// Longest accepted steady-state or transition segment in seconds.
pub const MAX_SEGMENT_DURATION: f64 = 10.0;

/// How the final buffer is brought into [-1, 1] before 16-bit encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Scale the whole buffer down so its peak magnitude is at most 1.0.
    /// Quiet buffers are never amplified.
    #[default]
    Peak,
    /// Hard-clip every sample to [-1, 1].
    Clip,
}

impl Normalization {
    /// Returns the serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Normalization::Peak => "peak",
            Normalization::Clip => "clip",
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Normalization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "peak" => Ok(Normalization::Peak),
            "clip" => Ok(Normalization::Clip),
            other => Err(format!("unknown normalization '{}' (expected peak or clip)", other)),
        }
    }
}

/// A request to render one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesisRequest {
    /// Phoneme symbols in utterance order.
    pub phonemes: Vec<String>,
    /// Steady-state duration per phoneme in seconds.
    #[serde(default = "default_phoneme_duration")]
    pub phoneme_duration: f64,
    /// Transition duration between adjacent known phonemes in seconds.
    #[serde(default = "default_transition_duration")]
    pub transition_duration: f64,
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Seed for formant sampling.
    #[serde(default)]
    pub seed: u32,
    /// Final output normalization.
    #[serde(default)]
    pub normalization: Normalization,
    /// Personalization record passed through to the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoicePreferences>,
}

fn default_phoneme_duration() -> f64 {
    DEFAULT_PHONEME_DURATION
}

fn default_transition_duration() -> f64 {
    DEFAULT_TRANSITION_DURATION
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

impl SynthesisRequest {
    /// Creates a request with default timing, rate, and seed 0.
    pub fn new(phonemes: Vec<String>) -> Self {
        Self {
            phonemes,
            phoneme_duration: DEFAULT_PHONEME_DURATION,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            sample_rate: DEFAULT_SAMPLE_RATE,
            seed: 0,
            normalization: Normalization::default(),
            voice: None,
        }
    }

    /// Creates a request from whitespace- or comma-separated phoneme text.
    ///
    /// # Example
    /// ```
    /// use formantic_spec::SynthesisRequest;
    ///
    /// let request = SynthesisRequest::from_phoneme_text("HH AH0, L OW1");
    /// assert_eq!(request.phonemes, vec!["HH", "AH0", "L", "OW1"]);
    /// ```
    pub fn from_phoneme_text(text: &str) -> Self {
        Self::new(split_phonemes(text))
    }

    /// Parses a request from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Sets the steady-state and transition durations.
    pub fn with_durations(mut self, phoneme_duration: f64, transition_duration: f64) -> Self {
        self.phoneme_duration = phoneme_duration;
        self.transition_duration = transition_duration;
        self
    }

    /// Sets the output normalization.
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Attaches voice preferences.
    pub fn with_voice(mut self, voice: VoicePreferences) -> Self {
        self.voice = Some(voice);
        self
    }

    /// Returns every problem with the request, in field order.
    pub fn validation_errors(&self) -> Vec<RequestError> {
        let mut errors = Vec::new();

        if self.sample_rate == 0 || self.sample_rate > MAX_SAMPLE_RATE {
            errors.push(RequestError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }

        let durations = [
            ("phoneme_duration", self.phoneme_duration),
            ("transition_duration", self.transition_duration),
        ];
        for (field, duration) in durations {
            if !duration.is_finite() || !(0.0..=MAX_SEGMENT_DURATION).contains(&duration) {
                errors.push(RequestError::InvalidDuration { field, duration });
            }
        }

        if let Some(voice) = &self.voice {
            if let Err(e) = voice.validate() {
                errors.push(e);
            }
        }

        errors
    }

    /// Validates the request, returning the first problem found.
    pub fn validate(&self) -> Result<(), RequestError> {
        match self.validation_errors().into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Splits phoneme text on whitespace and commas.
pub fn split_phonemes(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
