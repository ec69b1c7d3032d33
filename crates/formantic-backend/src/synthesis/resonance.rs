//! Steady-state segments.

use super::{checked_sample_count, resonator, SegmentRenderer};
use crate::buffer::WaveformBuffer;
use crate::error::SynthResult;
use crate::formant::Formant;

/// A resonator bank with fixed parameters.
#[derive(Debug, Clone, Copy)]
pub struct SteadyState<'a> {
    formants: &'a [Formant],
}

impl<'a> SteadyState<'a> {
    /// Creates a steady-state renderer over `formants`.
    pub fn new(formants: &'a [Formant]) -> Self {
        Self { formants }
    }
}

impl SegmentRenderer for SteadyState<'_> {
    fn render_samples(&self, num_samples: usize, sample_rate: f64) -> Vec<f64> {
        (0..num_samples)
            .map(|i| {
                let t = i as f64 / sample_rate;
                self.formants
                    .iter()
                    .map(|f| resonator(f.frequency, f.bandwidth, t, sample_rate))
                    .sum::<f64>()
            })
            .collect()
    }
}

/// Renders `duration` seconds of a fixed resonator bank.
///
/// Produces exactly [`sample_count`](super::sample_count)`(duration, sample_rate)`
/// samples; an empty buffer when `duration <= 0`.
///
/// # Errors
/// [`SynthError::SegmentTooLong`](crate::SynthError::SegmentTooLong) if the
/// segment would exceed [`MAX_SEGMENT_SAMPLES`](super::MAX_SEGMENT_SAMPLES).
pub fn render_steady(
    formants: &[Formant],
    duration: f64,
    sample_rate: u32,
) -> SynthResult<WaveformBuffer> {
    let num_samples = checked_sample_count(duration, sample_rate)?;
    let samples = SteadyState::new(formants).render_samples(num_samples, sample_rate as f64);
    Ok(WaveformBuffer::from_samples(samples, sample_rate))
}
