//! Formantic Synthesis Backend
//!
//! This crate renders phoneme sequences into audio using a bank of damped
//! sinusoidal resonators, one per formant:
//!
//! - **Sampling** - each phoneme occurrence draws its own formant realization
//!   from the table's per-phoneme statistics
//! - **Steady state** - a fixed realization rendered for the phoneme's duration
//! - **Transitions** - formant frequency and bandwidth glide linearly between
//!   adjacent phonemes
//! - **Silence substitution** - unknown phonemes become silence of the same length
//!
//! # Determinism
//!
//! All randomness flows through an explicit PCG32 generator. Given the same
//! table, request, and seed, the output is bit-identical across runs.
//!
//! # Example
//!
//! ```
//! use formantic_backend::generate;
//! use formantic_spec::{FormantTable, PhonemeProfile, SynthesisRequest};
//!
//! let table = FormantTable::from_profiles([
//!     PhonemeProfile::fixed("a", [700.0, 1200.0, 2600.0], 80.0),
//! ])
//! .unwrap();
//! let request = SynthesisRequest::from_phoneme_text("a a").with_seed(42);
//!
//! let result = generate(&request, &table).unwrap();
//! // two steady segments plus one transition
//! assert_eq!(result.wav.num_samples, 1600 + 800 + 1600);
//! ```
//!
//! # Crate Structure
//!
//! - [`generate()`] - Request-level entry point (validate, assemble, encode)
//! - [`assembler`] - Phoneme sequence → waveform state machine
//! - [`sampler`] - Stochastic formant realization
//! - [`synthesis`] - Steady-state and transition resonator rendering
//! - [`buffer`] - Sample buffer tagged with its rate
//! - [`rng`] - Deterministic RNG with seed derivation
//! - [`wav`] - Deterministic 16-bit PCM WAV writer

pub mod assembler;
pub mod buffer;
pub mod error;
pub mod formant;
pub mod generate;
pub mod rng;
pub mod sampler;
pub mod synthesis;
pub mod wav;

// Re-export main types at crate root
pub use assembler::{assemble, Assembly, SegmentKind, SegmentSpan, SegmentTiming, SpeechAssembler};
pub use buffer::WaveformBuffer;
pub use error::{SynthError, SynthResult};
pub use formant::{Formant, FormantRealization};
pub use generate::{generate, generate_batch, generate_batch_with_jobs, GenerateResult};
pub use sampler::FormantSampler;
pub use synthesis::{
    checked_sample_count, render_steady, render_transition, sample_count, MAX_SEGMENT_SAMPLES,
};
pub use wav::{WavResult, WavWriter};
