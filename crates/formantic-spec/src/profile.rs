//! Per-phoneme formant statistics.
//!
//! Each phoneme is described by three formant slots (F1, F2, F3). A slot
//! holds the mean and standard deviation of both its center frequency and
//! its bandwidth, so that every occurrence of the phoneme can be drawn as a
//! slightly different realization.

use serde::{Deserialize, Serialize};

use crate::error::DataLoadError;

/// Number of formant slots per phoneme.
pub const FORMANT_COUNT: usize = 3;

/// Statistics for one formant slot. All values are in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormantStats {
    /// Mean center frequency.
    pub freq_mean: f64,
    /// Standard deviation of the center frequency.
    pub freq_std: f64,
    /// Mean bandwidth.
    pub bandwidth_mean: f64,
    /// Standard deviation of the bandwidth.
    pub bandwidth_std: f64,
}

impl FormantStats {
    /// Creates formant statistics.
    pub fn new(freq_mean: f64, freq_std: f64, bandwidth_mean: f64, bandwidth_std: f64) -> Self {
        Self {
            freq_mean,
            freq_std,
            bandwidth_mean,
            bandwidth_std,
        }
    }

    /// Creates statistics with zero variance.
    pub fn fixed(frequency: f64, bandwidth: f64) -> Self {
        Self::new(frequency, 0.0, bandwidth, 0.0)
    }

    /// Checks the invariants of a single slot, returning a description of
    /// the first violation.
    fn check(&self, slot: usize) -> Result<(), String> {
        let label = format!("F{}", slot + 1);
        let fields = [
            ("mean", self.freq_mean),
            ("std", self.freq_std),
            ("bandwidth", self.bandwidth_mean),
            ("bandwidth std", self.bandwidth_std),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{} {} is not finite", label, name));
            }
        }
        if self.freq_mean <= 0.0 {
            return Err(format!("{} mean must be positive, got {}", label, self.freq_mean));
        }
        if self.freq_std < 0.0 {
            return Err(format!("{} std must be non-negative, got {}", label, self.freq_std));
        }
        if self.bandwidth_mean < 0.0 {
            return Err(format!(
                "{} bandwidth must be non-negative, got {}",
                label, self.bandwidth_mean
            ));
        }
        if self.bandwidth_std < 0.0 {
            return Err(format!(
                "{} bandwidth std must be non-negative, got {}",
                label, self.bandwidth_std
            ));
        }
        Ok(())
    }
}

/// Formant statistics for one phoneme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhonemeProfile {
    /// Phoneme symbol (e.g., "AA", "iy").
    pub symbol: String,
    /// F1, F2, F3 statistics in order.
    pub formants: [FormantStats; FORMANT_COUNT],
}

impl PhonemeProfile {
    /// Creates a profile.
    pub fn new(symbol: impl Into<String>, formants: [FormantStats; FORMANT_COUNT]) -> Self {
        Self {
            symbol: symbol.into(),
            formants,
        }
    }

    /// Creates a zero-variance profile where every slot shares `bandwidth`.
    ///
    /// # Example
    /// ```
    /// use formantic_spec::PhonemeProfile;
    ///
    /// let a = PhonemeProfile::fixed("a", [700.0, 1200.0, 2600.0], 80.0);
    /// assert_eq!(a.formants[1].freq_mean, 1200.0);
    /// assert_eq!(a.formants[2].bandwidth_std, 0.0);
    /// ```
    pub fn fixed(
        symbol: impl Into<String>,
        frequencies: [f64; FORMANT_COUNT],
        bandwidth: f64,
    ) -> Self {
        Self::new(symbol, frequencies.map(|f| FormantStats::fixed(f, bandwidth)))
    }

    /// Validates the profile against the data-model invariants.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        if crate::table::is_placeholder(&self.symbol) {
            return Err(DataLoadError::invalid_profile(
                &self.symbol,
                "symbol is empty or reserved",
            ));
        }
        for (slot, stats) in self.formants.iter().enumerate() {
            stats
                .check(slot)
                .map_err(|message| DataLoadError::invalid_profile(&self.symbol, message))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_profile_is_valid() {
        let profile = PhonemeProfile::fixed("a", [700.0, 1200.0, 2600.0], 80.0);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_zero_frequency_mean_rejected() {
        let mut profile = PhonemeProfile::fixed("a", [700.0, 1200.0, 2600.0], 80.0);
        profile.formants[1].freq_mean = 0.0;
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("F2 mean must be positive"));
    }

    #[test]
    fn test_negative_std_rejected() {
        let mut profile = PhonemeProfile::fixed("a", [700.0, 1200.0, 2600.0], 80.0);
        profile.formants[0].freq_std = -1.0;
        assert!(profile.validate().is_err());

        let mut profile = PhonemeProfile::fixed("a", [700.0, 1200.0, 2600.0], 80.0);
        profile.formants[2].bandwidth_std = -0.5;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut profile = PhonemeProfile::fixed("a", [700.0, 1200.0, 2600.0], 80.0);
        profile.formants[0].bandwidth_mean = f64::NAN;
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("not finite"));
    }

    #[test]
    fn test_placeholder_symbol_rejected() {
        let profile = PhonemeProfile::fixed("  ", [700.0, 1200.0, 2600.0], 80.0);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_json_shape() {
        let profile = PhonemeProfile::fixed("a", [700.0, 1200.0, 2600.0], 80.0);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["symbol"], "a");
        assert_eq!(json["formants"][0]["freq_mean"], 700.0);
        assert_eq!(json["formants"].as_array().unwrap().len(), 3);
    }
}
