//! Report types for synthesis runs.
//!
//! A report documents one `formantic synth` invocation: what was asked for
//! (request and table hashes, seed, voice preferences), what was produced
//! (sample counts, PCM hash, segment counts), and anything that degraded
//! along the way (unknown phonemes).

use serde::{Deserialize, Serialize};

use crate::request::{Normalization, SynthesisRequest};
use crate::voice::VoicePreferences;

/// Report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Number of segments of each kind in an assembled utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentCounts {
    /// Steady-state segments (one per known phoneme).
    pub steady: usize,
    /// Transitions between adjacent known phonemes.
    pub transitions: usize,
    /// Silence spans substituted for unknown phonemes.
    pub silences: usize,
}

/// An error recorded in a failed report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportError {
    /// Stable error code (e.g., "TABLE_004").
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// A complete report for one synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisReport {
    /// Report schema version.
    pub report_version: u32,
    /// Whether synthesis succeeded.
    pub ok: bool,
    /// Canonical hash of the request.
    pub request_hash: String,
    /// Content hash of the formant table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_hash: Option<String>,
    /// Seed used for formant sampling.
    pub seed: u32,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Normalization applied at encoding.
    pub normalization: Normalization,
    /// Number of phonemes in the request.
    pub phoneme_count: usize,
    /// Number of output samples.
    pub num_samples: usize,
    /// Output duration in seconds.
    pub duration_seconds: f64,
    /// BLAKE3 hash of the 16-bit PCM data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
    /// Segment counts.
    pub segments: SegmentCounts,
    /// Unknown phonemes in encounter order (duplicates kept).
    pub unknown_phonemes: Vec<String>,
    /// Voice preferences carried by the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoicePreferences>,
    /// Errors, if the run failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ReportError>,
    /// Producer identifier and version.
    pub backend_version: String,
    /// Target the producer was built for (`arch-os`).
    pub target: String,
    /// Wall-clock time in milliseconds.
    pub duration_ms: u64,
}

impl SynthesisReport {
    /// Serializes the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Builder for [`SynthesisReport`].
pub struct ReportBuilder {
    request_hash: String,
    backend_version: String,
    table_hash: Option<String>,
    seed: u32,
    sample_rate: u32,
    normalization: Normalization,
    phoneme_count: usize,
    num_samples: usize,
    pcm_hash: Option<String>,
    segments: SegmentCounts,
    unknown_phonemes: Vec<String>,
    voice: Option<VoicePreferences>,
    errors: Vec<ReportError>,
    duration_ms: u64,
}

impl ReportBuilder {
    /// Creates a new report builder.
    ///
    /// # Example
    /// ```
    /// use formantic_spec::ReportBuilder;
    ///
    /// let report = ReportBuilder::new("abc123".to_string(), "formantic-cli v0.1.0".to_string())
    ///     .samples(1600)
    ///     .build();
    /// assert!(report.ok);
    /// assert_eq!(report.num_samples, 1600);
    /// ```
    pub fn new(request_hash: String, backend_version: String) -> Self {
        Self {
            request_hash,
            backend_version,
            table_hash: None,
            seed: 0,
            sample_rate: crate::request::DEFAULT_SAMPLE_RATE,
            normalization: Normalization::default(),
            phoneme_count: 0,
            num_samples: 0,
            pcm_hash: None,
            segments: SegmentCounts::default(),
            unknown_phonemes: Vec::new(),
            voice: None,
            errors: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Copies seed, rate, normalization, phoneme count, and voice from a request.
    pub fn request_metadata(mut self, request: &SynthesisRequest) -> Self {
        self.seed = request.seed;
        self.sample_rate = request.sample_rate;
        self.normalization = request.normalization;
        self.phoneme_count = request.phonemes.len();
        self.voice = request.voice;
        self
    }

    /// Sets the formant table hash.
    pub fn table_hash(mut self, hash: impl Into<String>) -> Self {
        self.table_hash = Some(hash.into());
        self
    }

    /// Sets the output sample count.
    pub fn samples(mut self, num_samples: usize) -> Self {
        self.num_samples = num_samples;
        self
    }

    /// Sets the PCM hash.
    pub fn pcm_hash(mut self, hash: impl Into<String>) -> Self {
        self.pcm_hash = Some(hash.into());
        self
    }

    /// Sets the segment counts.
    pub fn segments(mut self, segments: SegmentCounts) -> Self {
        self.segments = segments;
        self
    }

    /// Records the unknown phonemes.
    pub fn unknown_phonemes(mut self, phonemes: Vec<String>) -> Self {
        self.unknown_phonemes = phonemes;
        self
    }

    /// Adds an error; the report will not be ok.
    pub fn error(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.push(ReportError {
            code: code.into(),
            message: message.into(),
        });
        self
    }

    /// Sets the execution duration in milliseconds.
    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    /// Builds the final report.
    pub fn build(self) -> SynthesisReport {
        let duration_seconds = if self.sample_rate > 0 {
            self.num_samples as f64 / self.sample_rate as f64
        } else {
            0.0
        };

        SynthesisReport {
            report_version: REPORT_VERSION,
            ok: self.errors.is_empty(),
            request_hash: self.request_hash,
            table_hash: self.table_hash,
            seed: self.seed,
            sample_rate: self.sample_rate,
            normalization: self.normalization,
            phoneme_count: self.phoneme_count,
            num_samples: self.num_samples,
            duration_seconds,
            pcm_hash: self.pcm_hash,
            segments: self.segments,
            unknown_phonemes: self.unknown_phonemes,
            voice: self.voice,
            errors: self.errors,
            backend_version: self.backend_version,
            target: format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS),
            duration_ms: self.duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::VoicePreferences;
    use pretty_assertions::assert_eq;

    fn builder() -> ReportBuilder {
        ReportBuilder::new("f00d".to_string(), "formantic-test v0".to_string())
    }

    #[test]
    fn test_request_metadata() {
        let request = SynthesisRequest::new(vec!["a".into(), "z".into()])
            .with_seed(9)
            .with_sample_rate(8000)
            .with_voice(VoicePreferences::default());
        let report = builder()
            .request_metadata(&request)
            .samples(1600)
            .unknown_phonemes(vec!["z".into()])
            .segments(SegmentCounts {
                steady: 1,
                transitions: 0,
                silences: 1,
            })
            .build();

        assert_eq!(report.seed, 9);
        assert_eq!(report.phoneme_count, 2);
        assert_eq!(report.duration_seconds, 0.2);
        assert_eq!(report.unknown_phonemes, vec!["z".to_string()]);
        assert!(report.voice.is_some());
        assert!(report.ok);
    }

    #[test]
    fn test_error_marks_not_ok() {
        let report = builder().error("TABLE_004", "missing column").build();
        assert!(!report.ok);
        assert_eq!(report.errors[0].code, "TABLE_004");
    }

    #[test]
    fn test_json_roundtrip_omits_empty_optionals() {
        let report = builder().table_hash("beef").build();
        let json = report.to_json_pretty().unwrap();
        assert!(!json.contains("pcm_hash"));
        assert!(!json.contains("\"errors\""));
        assert!(json.contains("\"table_hash\": \"beef\""));

        let parsed: SynthesisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
