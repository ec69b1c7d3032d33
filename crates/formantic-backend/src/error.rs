//! Error types for the synthesis backend.

use formantic_spec::RequestError;
use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur during synthesis.
///
/// Unknown phonemes are not errors; the assembler renders them as silence.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Two realizations with different formant counts were asked to blend.
    #[error("formant arity mismatch: cannot transition from {from} to {to} formants")]
    FormantArity {
        /// Formant count of the starting realization.
        from: usize,
        /// Formant count of the ending realization.
        to: usize,
    },

    /// Sample rate of zero or above the supported maximum.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Segment duration that is non-finite or longer than the supported maximum.
    #[error("invalid segment duration: {duration} s")]
    InvalidDuration {
        /// The invalid duration in seconds.
        duration: f64,
    },

    /// A segment would hold more samples than the renderer allows.
    #[error("segment too long: {duration} s at {sample_rate} Hz exceeds {limit} samples")]
    SegmentTooLong {
        /// Requested duration in seconds.
        duration: f64,
        /// Sample rate in Hz.
        sample_rate: u32,
        /// Sample limit per segment.
        limit: usize,
    },

    /// The request failed validation.
    #[error("invalid request: {0}")]
    Request(#[from] RequestError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SynthError {
    /// Returns the stable error code (e.g., "SYNTH_001").
    ///
    /// Request errors keep their own `REQ_*` code.
    pub fn code(&self) -> &'static str {
        match self {
            SynthError::FormantArity { .. } => "SYNTH_001",
            SynthError::InvalidSampleRate { .. } => "SYNTH_002",
            SynthError::Request(inner) => inner.code(),
            SynthError::Io(_) => "SYNTH_003",
            SynthError::InvalidDuration { .. } => "SYNTH_004",
            SynthError::SegmentTooLong { .. } => "SYNTH_005",
        }
    }
}
