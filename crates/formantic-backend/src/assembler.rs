//! Phoneme sequence → waveform.
//!
//! The assembler walks the sequence once, left to right:
//!
//! - a known phoneme draws a realization, emits a transition from the
//!   previous realization (if there is one), then its steady-state segment
//! - an unknown phoneme emits silence of one phoneme duration and clears the
//!   previous realization, so neither neighbor transitions across it
//! - nothing is emitted before the first or after the last phoneme
//!
//! Output length is therefore always the exact sum of its segment lengths.

use formantic_spec::{
    FormantTable, SegmentCounts, SynthesisRequest, MAX_SAMPLE_RATE, MAX_SEGMENT_DURATION,
};
use rand::Rng;
use tracing::{debug, trace};

use crate::buffer::WaveformBuffer;
use crate::error::{SynthError, SynthResult};
use crate::formant::FormantRealization;
use crate::sampler::FormantSampler;
use crate::synthesis::{checked_sample_count, render_steady, render_transition};

/// Segment durations and output rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentTiming {
    /// Steady-state (and silence) duration per phoneme in seconds.
    pub phoneme_duration: f64,
    /// Transition duration in seconds.
    pub transition_duration: f64,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl SegmentTiming {
    /// Creates a timing configuration.
    pub fn new(phoneme_duration: f64, transition_duration: f64, sample_rate: u32) -> Self {
        Self {
            phoneme_duration,
            transition_duration,
            sample_rate,
        }
    }

    /// Takes durations and rate from a request.
    pub fn from_request(request: &SynthesisRequest) -> Self {
        Self::new(
            request.phoneme_duration,
            request.transition_duration,
            request.sample_rate,
        )
    }
}

impl Default for SegmentTiming {
    fn default() -> Self {
        Self::new(
            formantic_spec::DEFAULT_PHONEME_DURATION,
            formantic_spec::DEFAULT_TRANSITION_DURATION,
            formantic_spec::DEFAULT_SAMPLE_RATE,
        )
    }
}

/// What a span of the output holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// Steady-state rendering of a known phoneme.
    Steady {
        /// Phoneme symbol.
        phoneme: String,
    },
    /// Glide between two adjacent known phonemes.
    Transition {
        /// Preceding phoneme.
        from: String,
        /// Following phoneme.
        to: String,
    },
    /// Silence substituted for an unknown phoneme.
    Silence {
        /// The unrecognized symbol.
        phoneme: String,
    },
}

/// Location of one segment in the assembled buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSpan {
    /// Segment kind.
    pub kind: SegmentKind,
    /// Index of the first sample.
    pub start: usize,
    /// Number of samples.
    pub len: usize,
}

/// An assembled utterance with its segment log.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// Concatenated samples.
    pub buffer: WaveformBuffer,
    /// Segments in output order.
    pub segments: Vec<SegmentSpan>,
    /// Unknown symbols in encounter order.
    pub unknown_phonemes: Vec<String>,
}

impl Assembly {
    /// Counts segments by kind.
    pub fn counts(&self) -> SegmentCounts {
        let mut counts = SegmentCounts::default();
        for segment in &self.segments {
            match segment.kind {
                SegmentKind::Steady { .. } => counts.steady += 1,
                SegmentKind::Transition { .. } => counts.transitions += 1,
                SegmentKind::Silence { .. } => counts.silences += 1,
            }
        }
        counts
    }

    fn push(&mut self, kind: SegmentKind, segment: WaveformBuffer) {
        trace!(?kind, start = self.buffer.len(), len = segment.len(), "segment");
        self.segments.push(SegmentSpan {
            kind,
            start: self.buffer.len(),
            len: segment.len(),
        });
        self.buffer.append(&segment);
    }
}

/// Renders phoneme sequences against a shared formant table.
#[derive(Debug, Clone, Copy)]
pub struct SpeechAssembler<'t> {
    table: &'t FormantTable,
    sampler: FormantSampler,
    timing: SegmentTiming,
}

impl<'t> SpeechAssembler<'t> {
    /// Creates an assembler.
    ///
    /// Fails on a sample rate outside `1..=MAX_SAMPLE_RATE` and on a duration
    /// that is non-finite or above [`MAX_SEGMENT_DURATION`]. Non-positive
    /// durations are accepted and render empty segments.
    pub fn new(table: &'t FormantTable, timing: SegmentTiming) -> SynthResult<Self> {
        if timing.sample_rate == 0 || timing.sample_rate > MAX_SAMPLE_RATE {
            return Err(SynthError::InvalidSampleRate {
                rate: timing.sample_rate,
            });
        }
        for duration in [timing.phoneme_duration, timing.transition_duration] {
            if !duration.is_finite() || duration > MAX_SEGMENT_DURATION {
                return Err(SynthError::InvalidDuration { duration });
            }
        }
        Ok(Self {
            table,
            sampler: FormantSampler::default(),
            timing,
        })
    }

    /// Replaces the formant sampler.
    pub fn with_sampler(mut self, sampler: FormantSampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Returns the timing configuration.
    pub fn timing(&self) -> SegmentTiming {
        self.timing
    }

    /// Assembles `phonemes` into one waveform.
    ///
    /// Unknown phonemes (including placeholder tokens) become silence; an
    /// empty sequence yields an empty buffer.
    pub fn assemble<S, R>(&self, phonemes: &[S], rng: &mut R) -> SynthResult<Assembly>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let SegmentTiming {
            phoneme_duration,
            transition_duration,
            sample_rate,
        } = self.timing;

        let mut assembly = Assembly {
            buffer: WaveformBuffer::new(sample_rate),
            segments: Vec::new(),
            unknown_phonemes: Vec::new(),
        };
        let mut previous: Option<(&str, FormantRealization)> = None;

        for phoneme in phonemes {
            let symbol = phoneme.as_ref();

            let Some(profile) = self.table.lookup(symbol) else {
                debug!(phoneme = symbol, "unknown phoneme, substituting silence");
                let len = checked_sample_count(phoneme_duration, sample_rate)?;
                let silence = WaveformBuffer::silence(len, sample_rate);
                assembly.push(
                    SegmentKind::Silence {
                        phoneme: symbol.to_string(),
                    },
                    silence,
                );
                assembly.unknown_phonemes.push(symbol.to_string());
                previous = None;
                continue;
            };

            let current = self.sampler.sample(profile, rng);

            if let Some((previous_symbol, previous_realization)) = &previous {
                let transition = render_transition(
                    previous_realization,
                    &current,
                    transition_duration,
                    sample_rate,
                )?;
                assembly.push(
                    SegmentKind::Transition {
                        from: previous_symbol.to_string(),
                        to: symbol.to_string(),
                    },
                    transition,
                );
            }

            let steady = render_steady(current.formants(), phoneme_duration, sample_rate)?;
            assembly.push(
                SegmentKind::Steady {
                    phoneme: symbol.to_string(),
                },
                steady,
            );
            previous = Some((symbol, current));
        }

        Ok(assembly)
    }
}

/// Assembles a phoneme sequence into a waveform.
///
/// Convenience wrapper over [`SpeechAssembler`] that discards the segment log.
///
/// # Example
/// ```
/// use formantic_backend::assemble;
/// use formantic_backend::rng::create_rng;
/// use formantic_spec::{FormantTable, PhonemeProfile};
///
/// let table = FormantTable::from_profiles([
///     PhonemeProfile::fixed("a", [700.0, 1200.0, 2600.0], 80.0),
/// ])
/// .unwrap();
///
/// let buffer = assemble(&["a", "z"], 0.1, 0.05, 16000, &table, &mut create_rng(1)).unwrap();
/// // "z" is unknown: steady "a" followed by silence, no transition
/// assert_eq!(buffer.len(), 3200);
/// ```
pub fn assemble<S, R>(
    phonemes: &[S],
    phoneme_duration: f64,
    transition_duration: f64,
    sample_rate: u32,
    table: &FormantTable,
    rng: &mut R,
) -> SynthResult<WaveformBuffer>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let timing = SegmentTiming::new(phoneme_duration, transition_duration, sample_rate);
    let assembly = SpeechAssembler::new(table, timing)?.assemble(phonemes, rng)?;
    Ok(assembly.buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use formantic_spec::{FormantStats, PhonemeProfile, UNKNOWN_PLACEHOLDER};
    use pretty_assertions::assert_eq;

    fn table() -> FormantTable {
        FormantTable::from_profiles([
            PhonemeProfile::fixed("a", [700.0, 1200.0, 2600.0], 80.0),
            PhonemeProfile::fixed("i", [300.0, 2300.0, 3000.0], 60.0),
            PhonemeProfile::new(
                "u",
                [
                    FormantStats::new(300.0, 15.0, 70.0, 5.0),
                    FormantStats::new(870.0, 25.0, 80.0, 5.0),
                    FormantStats::new(2250.0, 40.0, 90.0, 5.0),
                ],
            ),
        ])
        .unwrap()
    }

    fn kinds(assembly: &Assembly) -> Vec<String> {
        assembly
            .segments
            .iter()
            .map(|s| match &s.kind {
                SegmentKind::Steady { phoneme } => format!("steady:{}", phoneme),
                SegmentKind::Transition { from, to } => format!("transition:{}>{}", from, to),
                SegmentKind::Silence { phoneme } => format!("silence:{}", phoneme),
            })
            .collect()
    }

    fn assembler(table: &FormantTable) -> SpeechAssembler<'_> {
        SpeechAssembler::new(table, SegmentTiming::default()).unwrap()
    }

    #[test]
    fn test_empty_sequence() {
        let table = table();
        let empty: [&str; 0] = [];
        let assembly = assembler(&table).assemble(&empty, &mut create_rng(0)).unwrap();
        assert!(assembly.buffer.is_empty());
        assert!(assembly.segments.is_empty());
    }

    #[test]
    fn test_single_phoneme_has_no_transition() {
        let table = table();
        let assembly = assembler(&table).assemble(&["a"], &mut create_rng(0)).unwrap();
        assert_eq!(kinds(&assembly), vec!["steady:a"]);
        assert_eq!(assembly.buffer.len(), 1600);
    }

    #[test]
    fn test_adjacent_known_phonemes_transition() {
        let table = table();
        let assembly = assembler(&table)
            .assemble(&["a", "i", "u"], &mut create_rng(0))
            .unwrap();
        assert_eq!(
            kinds(&assembly),
            vec![
                "steady:a",
                "transition:a>i",
                "steady:i",
                "transition:i>u",
                "steady:u"
            ]
        );
        assert_eq!(assembly.buffer.len(), 3 * 1600 + 2 * 800);
    }

    #[test]
    fn test_unknown_phoneme_breaks_transition_chain() {
        let table = table();
        let assembly = assembler(&table)
            .assemble(&["a", "zz", "i"], &mut create_rng(0))
            .unwrap();
        assert_eq!(kinds(&assembly), vec!["steady:a", "silence:zz", "steady:i"]);
        assert_eq!(assembly.unknown_phonemes, vec!["zz".to_string()]);
        assert_eq!(assembly.buffer.len(), 3 * 1600);

        let silence = &assembly.segments[1];
        assert_eq!(silence.start, 1600);
        assert!(assembly.buffer.samples()[silence.start..silence.start + silence.len]
            .iter()
            .all(|&s| s == 0.0));
    }

    #[test]
    fn test_placeholders_become_silence() {
        let table = table();
        let assembly = assembler(&table)
            .assemble(&["", UNKNOWN_PLACEHOLDER, " "], &mut create_rng(0))
            .unwrap();
        assert_eq!(assembly.counts().silences, 3);
        assert_eq!(assembly.buffer.len(), 3 * 1600);
    }

    #[test]
    fn test_segments_tile_the_buffer() {
        let table = table();
        let assembly = assembler(&table)
            .assemble(&["a", "i", "?", "u", "u", "a"], &mut create_rng(5))
            .unwrap();

        let mut cursor = 0;
        for segment in &assembly.segments {
            assert_eq!(segment.start, cursor);
            cursor += segment.len;
        }
        assert_eq!(cursor, assembly.buffer.len());
        assert_eq!(
            assembly.counts(),
            SegmentCounts {
                steady: 5,
                transitions: 3,
                silences: 1
            }
        );
    }

    #[test]
    fn test_repeated_phoneme_draws_independently() {
        let table = table();
        let assembly = assembler(&table)
            .assemble(&["u", "u"], &mut create_rng(11))
            .unwrap();
        let first = &assembly.segments[0];
        let second = &assembly.segments[2];
        let a = &assembly.buffer.samples()[first.start..first.start + first.len];
        let b = &assembly.buffer.samples()[second.start..second.start + second.len];
        assert_ne!(a, b);
    }

    #[test]
    fn test_zero_transition_duration() {
        let table = table();
        let timing = SegmentTiming::new(0.1, 0.0, 16000);
        let assembly = SpeechAssembler::new(&table, timing)
            .unwrap()
            .assemble(&["a", "i"], &mut create_rng(0))
            .unwrap();
        assert_eq!(assembly.counts().transitions, 1);
        assert_eq!(assembly.segments[1].len, 0);
        assert_eq!(assembly.buffer.len(), 3200);
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let table = table();
        let err = SpeechAssembler::new(&table, SegmentTiming::new(0.1, 0.05, 0)).unwrap_err();
        assert!(matches!(err, SynthError::InvalidSampleRate { rate: 0 }));
    }

    #[test]
    fn test_oversized_sample_rate_rejected() {
        let table = table();
        let timing = SegmentTiming::new(0.1, 0.05, MAX_SAMPLE_RATE + 1);
        let err = SpeechAssembler::new(&table, timing).unwrap_err();
        assert_eq!(err.code(), "SYNTH_002");
    }

    #[test]
    fn test_unbounded_durations_rejected() {
        let table = table();
        for (phoneme, transition) in [
            (1e30, 0.05),
            (0.1, 1e30),
            (f64::NAN, 0.05),
            (0.1, f64::INFINITY),
            (MAX_SEGMENT_DURATION + 0.5, 0.05),
        ] {
            let timing = SegmentTiming::new(phoneme, transition, 16000);
            let err = SpeechAssembler::new(&table, timing).unwrap_err();
            assert!(
                matches!(err, SynthError::InvalidDuration { .. }),
                "({}, {}) gave {:?}",
                phoneme,
                transition,
                err
            );
        }

        let mut rng = create_rng(0);
        let err = assemble(&["a", "zz"], 1e30, 0.05, 16000, &table, &mut rng).unwrap_err();
        assert_eq!(err.code(), "SYNTH_004");
    }

    #[test]
    fn test_longest_duration_accepted() {
        let table = table();
        let timing = SegmentTiming::new(MAX_SEGMENT_DURATION, -1.0, 8000);
        let assembly = SpeechAssembler::new(&table, timing)
            .unwrap()
            .assemble(&["a"], &mut create_rng(0))
            .unwrap();
        assert_eq!(assembly.buffer.len(), 80_000);
    }

    #[test]
    fn test_free_function_matches_assembler() {
        let table = table();
        let phonemes = vec!["u".to_string(), "a".to_string()];
        let mut rng = create_rng(3);
        let buffer = assemble(phonemes.as_slice(), 0.1, 0.05, 16000, &table, &mut rng).unwrap();
        let assembly = assembler(&table)
            .assemble(phonemes.as_slice(), &mut create_rng(3))
            .unwrap();
        assert_eq!(buffer, assembly.buffer);
    }
}
