//! Coarticulation segments.
//!
//! Over the `N` samples of a transition, every formant slot glides linearly
//! from its `from` parameters to its `to` parameters:
//!
//! ```text
//! f_i  = lerp(from.f,  to.f,  i / N)
//! bw_i = lerp(from.bw, to.bw, i / N)
//! ```
//!
//! The last sample sits one step short of `to`; the following steady-state
//! segment starts exactly on it.

use super::{checked_sample_count, resonator, SegmentRenderer};
use crate::buffer::WaveformBuffer;
use crate::error::{SynthError, SynthResult};
use crate::formant::{Formant, FormantRealization};

/// A resonator bank whose parameters glide between two realizations.
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a> {
    from: &'a [Formant],
    to: &'a [Formant],
}

impl<'a> Transition<'a> {
    /// Pairs two formant sets slot by slot.
    ///
    /// Fails with [`SynthError::FormantArity`] if the slot counts differ.
    pub fn new(from: &'a [Formant], to: &'a [Formant]) -> SynthResult<Self> {
        if from.len() != to.len() {
            return Err(SynthError::FormantArity {
                from: from.len(),
                to: to.len(),
            });
        }
        Ok(Self { from, to })
    }
}

impl SegmentRenderer for Transition<'_> {
    fn render_samples(&self, num_samples: usize, sample_rate: f64) -> Vec<f64> {
        let span = num_samples as f64;
        (0..num_samples)
            .map(|i| {
                let t = i as f64 / sample_rate;
                let progress = i as f64 / span;
                self.from
                    .iter()
                    .zip(self.to)
                    .map(|(a, b)| {
                        let f = a.lerp(b, progress);
                        resonator(f.frequency, f.bandwidth, t, sample_rate)
                    })
                    .sum::<f64>()
            })
            .collect()
    }
}

/// Renders `duration` seconds of a transition from one realization to the next.
///
/// Produces exactly [`sample_count`](super::sample_count)`(duration, sample_rate)`
/// samples; an empty buffer when `duration <= 0`.
///
/// # Errors
/// [`SynthError::FormantArity`] on mismatched slot counts and
/// [`SynthError::SegmentTooLong`] past
/// [`MAX_SEGMENT_SAMPLES`](super::MAX_SEGMENT_SAMPLES).
pub fn render_transition(
    from: &FormantRealization,
    to: &FormantRealization,
    duration: f64,
    sample_rate: u32,
) -> SynthResult<WaveformBuffer> {
    let transition = Transition::new(from.formants(), to.formants())?;
    let num_samples = checked_sample_count(duration, sample_rate)?;
    let samples = transition.render_samples(num_samples, sample_rate as f64);
    Ok(WaveformBuffer::from_samples(samples, sample_rate))
}
