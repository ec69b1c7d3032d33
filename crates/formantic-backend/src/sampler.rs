//! Stochastic formant realization.
//!
//! Every phoneme occurrence gets an independent draw, so repeated phonemes
//! in one utterance differ slightly. Draw order is fixed (slot F1..F3,
//! frequency before bandwidth within a slot) so a seeded generator always
//! yields the same realizations.

use formantic_spec::PhonemeProfile;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::formant::{Formant, FormantRealization};

/// Smallest frequency or bandwidth a draw may produce, in Hz.
pub const DEFAULT_FLOOR: f64 = 1e-6;

/// Draws formant realizations from phoneme statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormantSampler {
    floor: f64,
}

impl Default for FormantSampler {
    fn default() -> Self {
        Self {
            floor: DEFAULT_FLOOR,
        }
    }
}

impl FormantSampler {
    /// Creates a sampler with the default floor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the floor that negative or non-finite draws are clipped to.
    ///
    /// Non-positive floors fall back to [`DEFAULT_FLOOR`].
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = if floor.is_finite() && floor > 0.0 {
            floor
        } else {
            DEFAULT_FLOOR
        };
        self
    }

    /// Returns the configured floor.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Draws one realization: `frequency ~ N(freq_mean, freq_std)` and
    /// `bandwidth ~ N(bandwidth_mean, bandwidth_std)` for every slot.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        profile: &PhonemeProfile,
        rng: &mut R,
    ) -> FormantRealization {
        let formants = profile
            .formants
            .iter()
            .map(|stats| {
                let frequency = self.draw(stats.freq_mean, stats.freq_std, &mut *rng);
                let bandwidth = self.draw(stats.bandwidth_mean, stats.bandwidth_std, &mut *rng);
                Formant::new(frequency, bandwidth)
            })
            .collect();
        FormantRealization::new(formants)
    }

    fn draw<R: Rng + ?Sized>(&self, mean: f64, std_dev: f64, rng: &mut R) -> f64 {
        // Zero deviation returns the mean exactly and consumes no randomness
        let value = if std_dev > 0.0 {
            let z: f64 = StandardNormal.sample(rng);
            mean + std_dev * z
        } else {
            mean
        };

        if value.is_finite() && value >= self.floor {
            value
        } else {
            self.floor
        }
    }
}
