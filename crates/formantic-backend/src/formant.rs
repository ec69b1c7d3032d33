//! Concrete formant parameters.

use formantic_spec::PhonemeProfile;

/// One resonator: center frequency and bandwidth, both in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Formant {
    /// Center frequency in Hz.
    pub frequency: f64,
    /// Bandwidth in Hz; larger values decay faster.
    pub bandwidth: f64,
}

impl Formant {
    /// Creates a formant.
    pub fn new(frequency: f64, bandwidth: f64) -> Self {
        Self {
            frequency,
            bandwidth,
        }
    }

    /// Linear interpolation towards `other` (`t` in [0, 1]).
    pub fn lerp(&self, other: &Formant, t: f64) -> Formant {
        Formant {
            frequency: lerp(self.frequency, other.frequency, t),
            bandwidth: lerp(self.bandwidth, other.bandwidth, t),
        }
    }
}

/// One stochastic draw of a phoneme's formants, in slot order.
///
/// Realizations produced by [`crate::FormantSampler`] always hold
/// [`formantic_spec::FORMANT_COUNT`] formants.
#[derive(Debug, Clone, PartialEq)]
pub struct FormantRealization {
    formants: Vec<Formant>,
}

impl FormantRealization {
    /// Wraps formants in slot order.
    pub fn new(formants: Vec<Formant>) -> Self {
        Self { formants }
    }

    /// Realization at the profile's mean values (no sampling noise).
    pub fn from_means(profile: &PhonemeProfile) -> Self {
        Self::new(
            profile
                .formants
                .iter()
                .map(|stats| Formant::new(stats.freq_mean, stats.bandwidth_mean))
                .collect(),
        )
    }

    /// The formants in slot order.
    pub fn formants(&self) -> &[Formant] {
        &self.formants
    }

    /// Number of formant slots.
    pub fn arity(&self) -> usize {
        self.formants.len()
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Formant::new(700.0, 80.0);
        let b = Formant::new(300.0, 60.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), Formant::new(500.0, 70.0));
    }

    #[test]
    fn test_from_means() {
        let profile = PhonemeProfile::fixed("a", [700.0, 1200.0, 2600.0], 80.0);
        let realization = FormantRealization::from_means(&profile);
        assert_eq!(realization.arity(), 3);
        assert_eq!(realization.formants()[1], Formant::new(1200.0, 80.0));
    }
}
