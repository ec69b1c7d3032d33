//! Table and request loading.
//!
//! Requests come either from phoneme text on the command line or from a
//! JSON request file; command-line flags override file values.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use formantic_spec::{FormantTable, Normalization, SynthesisRequest};
use tracing::debug;

/// Command-line values that override request fields.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RequestOverrides {
    /// Steady-state duration per phoneme, in seconds.
    pub phoneme_duration: Option<f64>,
    /// Transition duration, in seconds.
    pub transition_duration: Option<f64>,
    /// Output sample rate in Hz.
    pub sample_rate: Option<u32>,
    /// Sampling seed.
    pub seed: Option<u32>,
    /// Normalization policy.
    pub normalization: Option<Normalization>,
}

impl RequestOverrides {
    /// Applies every set override to `request`.
    pub fn apply(&self, mut request: SynthesisRequest) -> SynthesisRequest {
        if let Some(d) = self.phoneme_duration {
            request.phoneme_duration = d;
        }
        if let Some(d) = self.transition_duration {
            request.transition_duration = d;
        }
        if let Some(rate) = self.sample_rate {
            request.sample_rate = rate;
        }
        if let Some(seed) = self.seed {
            request.seed = seed;
        }
        if let Some(policy) = self.normalization {
            request.normalization = policy;
        }
        request
    }
}

/// Loads a formant table from a CSV or JSON file.
pub fn load_table(path: &str) -> Result<FormantTable> {
    let table = FormantTable::load(path)
        .with_context(|| format!("Failed to load formant table: {}", path))?;
    debug!(path, phonemes = table.len(), "loaded formant table");
    Ok(table)
}

/// Loads a request from a JSON file.
pub fn load_request(path: &Path) -> Result<SynthesisRequest> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file: {}", path.display()))?;
    SynthesisRequest::from_json(&text)
        .with_context(|| format!("Failed to parse request file: {}", path.display()))
}

/// Builds a request from phoneme text or a request file, then applies overrides.
///
/// Exactly one of `phonemes` and `request_path` is expected; if both are
/// given the request file wins.
pub fn build_request(
    phonemes: Option<&str>,
    request_path: Option<&str>,
    overrides: &RequestOverrides,
) -> Result<SynthesisRequest> {
    let base = match (request_path, phonemes) {
        (Some(path), _) => load_request(Path::new(path))?,
        (None, Some(text)) => SynthesisRequest::from_phoneme_text(text),
        (None, None) => anyhow::bail!("either --phonemes or --request is required"),
    };
    Ok(overrides.apply(base))
}
