//! Sample buffer tagged with its sampling rate.

/// An ordered run of sample amplitudes at a fixed rate.
///
/// Amplitudes are unnormalized until final encoding; a sum of three
/// resonators can exceed 1.0 in magnitude.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WaveformBuffer {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl WaveformBuffer {
    /// Creates an empty buffer.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
        }
    }

    /// Wraps existing samples.
    pub fn from_samples(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Creates `len` zero samples.
    pub fn silence(len: usize, sample_rate: u32) -> Self {
        Self::from_samples(vec![0.0; len], sample_rate)
    }

    /// Appends another buffer's samples.
    ///
    /// Both buffers must share a sample rate.
    pub fn append(&mut self, other: &WaveformBuffer) {
        debug_assert_eq!(self.sample_rate, other.sample_rate);
        self.samples.extend_from_slice(&other.samples);
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Read-only view of the samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Consumes the buffer, returning its samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute amplitude, or 0.0 when empty.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |peak, s| peak.max(s.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_len() {
        let mut buffer = WaveformBuffer::new(16000);
        assert!(buffer.is_empty());

        buffer.append(&WaveformBuffer::from_samples(vec![0.5, -1.5], 16000));
        buffer.append(&WaveformBuffer::silence(3, 16000));

        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.samples(), &[0.5, -1.5, 0.0, 0.0, 0.0]);
        assert_eq!(buffer.peak(), 1.5);
    }

    #[test]
    fn test_duration() {
        let buffer = WaveformBuffer::silence(1600, 16000);
        assert!((buffer.duration_seconds() - 0.1).abs() < 1e-12);
        assert_eq!(WaveformBuffer::silence(10, 0).duration_seconds(), 0.0);
    }

    #[test]
    fn test_empty_peak() {
        assert_eq!(WaveformBuffer::new(8000).peak(), 0.0);
    }
}
