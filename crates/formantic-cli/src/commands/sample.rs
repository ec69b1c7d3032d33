//! Sample command implementation
//!
//! Draws formant realizations for one phoneme, the same way synthesis does,
//! so table statistics can be inspected without rendering audio.

use anyhow::{anyhow, bail, Result};
use colored::Colorize;
use formantic_backend::rng::create_sampler_rng;
use formantic_backend::{FormantRealization, FormantSampler};
use formantic_spec::FormantTable;
use std::process::ExitCode;

use super::json_output::{error_codes, print_json, FormantDraw, JsonError, SampleOutput};
use crate::input::load_table;

/// Most draws one invocation may request.
pub const MAX_DRAWS: u64 = 10_000;

/// Run the sample command
///
/// # Arguments
/// * `table_path` - Formant table (CSV or JSON)
/// * `phoneme` - Phoneme symbol to sample
/// * `seed` - Request seed; the first draw matches a request with this seed
///   whose first phoneme is this one
/// * `count` - Number of draws
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(
    table_path: &str,
    phoneme: &str,
    seed: u32,
    count: usize,
    json_output: bool,
) -> Result<ExitCode> {
    let draws = load_table(table_path).and_then(|table| draw(&table, phoneme, seed, count));

    if json_output {
        let (draws, errors) = match draws {
            Ok(draws) => (draws, Vec::new()),
            Err(e) => (
                Vec::new(),
                vec![JsonError::from_anyhow(&e, error_codes::UNKNOWN_PHONEME)],
            ),
        };
        let output = SampleOutput {
            success: errors.is_empty(),
            errors,
            phoneme: phoneme.to_string(),
            seed,
            draws: draws.iter().map(FormantDraw::from_realization).collect(),
        };
        print_json(&output)?;
        return Ok(if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    let draws = draws?;
    println!("{} {} (seed {})", "Sampling:".cyan().bold(), phoneme, seed);
    for (i, realization) in draws.iter().enumerate() {
        let slots: Vec<String> = realization
            .formants()
            .iter()
            .enumerate()
            .map(|(k, f)| {
                let bandwidth = format!("(bw {:.2})", f.bandwidth);
                format!("F{} {:>8.2} Hz {}", k + 1, f.frequency, bandwidth.dimmed())
            })
            .collect();
        println!("  {:>3}  {}", i + 1, slots.join("  "));
    }
    Ok(ExitCode::SUCCESS)
}

/// Draws `count` realizations of `phoneme` from the sampler stream of `seed`.
pub fn draw(
    table: &FormantTable,
    phoneme: &str,
    seed: u32,
    count: usize,
) -> Result<Vec<FormantRealization>> {
    if count as u64 > MAX_DRAWS {
        bail!("draw count {} exceeds the limit of {}", count, MAX_DRAWS);
    }
    let profile = table
        .lookup(phoneme)
        .ok_or_else(|| anyhow!("phoneme '{}' is not in the formant table", phoneme))?;

    let sampler = FormantSampler::new();
    let mut rng = create_sampler_rng(seed);
    Ok((0..count).map(|_| sampler.sample(profile, &mut rng)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formantic_backend::{render_steady, SegmentTiming, SpeechAssembler};
    use formantic_spec::{FormantStats, PhonemeProfile};

    fn table() -> FormantTable {
        FormantTable::from_profiles([PhonemeProfile::new(
            "i",
            [
                FormantStats::new(300.0, 10.0, 60.0, 4.0),
                FormantStats::new(2300.0, 30.0, 70.0, 4.0),
                FormantStats::new(3000.0, 40.0, 80.0, 4.0),
            ],
        )])
        .unwrap()
    }

    #[test]
    fn test_draw_count_and_determinism() {
        let table = table();
        let a = draw(&table, "i", 7, 5).unwrap();
        let b = draw(&table, "i", 7, 5).unwrap();
        assert_eq!(a.len(), 5);
        assert_eq!(a, b);
        assert_ne!(a[0], a[1]);
    }

    #[test]
    fn test_first_draw_matches_synthesis() {
        let table = table();
        let draws = draw(&table, "i", 3, 1).unwrap();

        let expected = SpeechAssembler::new(&table, SegmentTiming::default())
            .unwrap()
            .assemble(&["i"], &mut create_sampler_rng(3))
            .unwrap();
        let rendered = render_steady(draws[0].formants(), 0.1, 16000).unwrap();
        assert_eq!(expected.buffer, rendered);
    }

    #[test]
    fn test_draws_follow_the_request_stream() {
        let table = table();
        let draws = draw(&table, "i", 3, 2).unwrap();

        let assembly = SpeechAssembler::new(&table, SegmentTiming::default())
            .unwrap()
            .assemble(&["i", "i"], &mut create_sampler_rng(3))
            .unwrap();
        let second = &assembly.segments[2];
        let steady = &assembly.buffer.samples()[second.start..second.start + second.len];

        // the second occurrence consumed the stream after the first
        let rendered = render_steady(draws[1].formants(), 0.1, 16000).unwrap();
        assert_eq!(steady, rendered.samples());
        let first = render_steady(draws[0].formants(), 0.1, 16000).unwrap();
        assert_ne!(steady, first.samples());
    }

    #[test]
    fn test_draw_count_limit() {
        let table = table();
        assert_eq!(draw(&table, "i", 0, MAX_DRAWS as usize).unwrap().len(), 10_000);
        let err = draw(&table, "i", 0, usize::MAX).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_unknown_phoneme() {
        let err = draw(&table(), "zz", 0, 1).unwrap_err();
        assert!(err.to_string().contains("zz"));
    }
}
