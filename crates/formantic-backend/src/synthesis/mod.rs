//! Resonator-bank rendering.
//!
//! Each formant is an independently decaying oscillator:
//!
//! ```text
//! y_k(i) = exp(-π · b_k · t_i / sample_rate) · sin(2π · f_k · t_i),   t_i = i / sample_rate
//! ```
//!
//! and a segment is the elementwise sum over formants. Segments are left
//! unnormalized so relative loudness survives concatenation; the WAV writer
//! normalizes once at the end.
//!
//! - `resonance` - steady-state segment with fixed parameters
//! - `transition` - segment whose parameters glide between two realizations

pub mod resonance;
pub mod transition;

use std::f64::consts::PI;

use formantic_spec::{MAX_SAMPLE_RATE, MAX_SEGMENT_DURATION};

use crate::error::{SynthError, SynthResult};

pub use resonance::{render_steady, SteadyState};
pub use transition::{render_transition, Transition};

/// Common trait for segment renderers.
pub trait SegmentRenderer {
    /// Generates `num_samples` unnormalized samples at `sample_rate` Hz.
    fn render_samples(&self, num_samples: usize, sample_rate: f64) -> Vec<f64>;
}

/// Number of samples in a segment: `round(duration · sample_rate)`.
///
/// Non-positive and non-finite durations yield zero samples.
///
/// # Example
/// ```
/// use formantic_backend::sample_count;
///
/// assert_eq!(sample_count(0.1, 16000), 1600);
/// assert_eq!(sample_count(0.0, 16000), 0);
/// assert_eq!(sample_count(-1.0, 16000), 0);
/// ```
pub fn sample_count(duration: f64, sample_rate: u32) -> usize {
    if !duration.is_finite() || duration <= 0.0 {
        return 0;
    }
    (duration * sample_rate as f64).round() as usize
}

/// Largest segment the renderers will allocate: the longest allowed
/// duration at the highest allowed rate.
pub const MAX_SEGMENT_SAMPLES: usize = MAX_SEGMENT_DURATION as usize * MAX_SAMPLE_RATE as usize;

/// Like [`sample_count`], but fails instead of exceeding
/// [`MAX_SEGMENT_SAMPLES`].
///
/// # Example
/// ```
/// use formantic_backend::synthesis::checked_sample_count;
///
/// assert_eq!(checked_sample_count(0.1, 16000).unwrap(), 1600);
/// assert!(checked_sample_count(1e30, 16000).is_err());
/// ```
pub fn checked_sample_count(duration: f64, sample_rate: u32) -> SynthResult<usize> {
    if !duration.is_finite() || duration <= 0.0 {
        return Ok(0);
    }
    let exact = (duration * sample_rate as f64).round();
    if exact > MAX_SEGMENT_SAMPLES as f64 {
        return Err(SynthError::SegmentTooLong {
            duration,
            sample_rate,
            limit: MAX_SEGMENT_SAMPLES,
        });
    }
    Ok(exact as usize)
}

/// One damped resonator evaluated at time `t` seconds.
#[inline]
fn resonator(frequency: f64, bandwidth: f64, t: f64, sample_rate: f64) -> f64 {
    let envelope = (-PI * bandwidth * t / sample_rate).exp();
    envelope * (2.0 * PI * frequency * t).sin()
}
