//! Request-level entry points.
//!
//! [`generate`] validates a request, assembles its phonemes with a sampler
//! RNG derived from the request seed, and encodes the result as WAV.
//! [`generate_batch`] does the same for many requests on a rayon pool.

use formantic_spec::{FormantTable, SegmentCounts, SynthesisRequest};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::assembler::{SegmentTiming, SpeechAssembler};
use crate::error::SynthResult;
use crate::rng::create_sampler_rng;
use crate::wav::WavResult;

/// Result of rendering one request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResult {
    /// Encoded WAV file.
    pub wav: WavResult,
    /// Segment counts by kind.
    pub segments: SegmentCounts,
    /// Unknown symbols in encounter order.
    pub unknown_phonemes: Vec<String>,
    /// Peak magnitude before normalization.
    pub peak: f64,
}

/// Renders a request against `table`.
///
/// # Errors
/// Returns [`SynthError::Request`](crate::SynthError::Request) if the request
/// fails validation. Unknown phonemes are not errors.
pub fn generate(request: &SynthesisRequest, table: &FormantTable) -> SynthResult<GenerateResult> {
    request.validate()?;

    let assembler = SpeechAssembler::new(table, SegmentTiming::from_request(request))?;
    let mut rng = create_sampler_rng(request.seed);
    let assembly = assembler.assemble(request.phonemes.as_slice(), &mut rng)?;

    let segments = assembly.counts();
    let peak = assembly.buffer.peak();
    let wav = WavResult::from_buffer(&assembly.buffer, request.normalization)?;

    info!(
        phonemes = request.phonemes.len(),
        samples = wav.num_samples,
        steady = segments.steady,
        transitions = segments.transitions,
        silences = segments.silences,
        peak,
        seed = request.seed,
        "generated utterance"
    );

    Ok(GenerateResult {
        wav,
        segments,
        unknown_phonemes: assembly.unknown_phonemes,
        peak,
    })
}

/// Renders many requests on the global rayon pool.
///
/// Results are in input order and identical to calling [`generate`] on each
/// request in turn.
pub fn generate_batch(
    requests: &[SynthesisRequest],
    table: &FormantTable,
) -> Vec<SynthResult<GenerateResult>> {
    requests.par_iter().map(|r| generate(r, table)).collect()
}

/// Renders many requests on a dedicated pool of `jobs` threads.
///
/// A `jobs` value of 0 is treated as 1.
pub fn generate_batch_with_jobs(
    requests: &[SynthesisRequest],
    table: &FormantTable,
    jobs: usize,
) -> Vec<SynthResult<GenerateResult>> {
    match rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .build()
    {
        Ok(pool) => pool.install(|| generate_batch(requests, table)),
        Err(e) => {
            warn!(error = %e, jobs, "failed to start worker pool, rendering sequentially");
            requests.iter().map(|r| generate(r, table)).collect()
        }
    }
}
