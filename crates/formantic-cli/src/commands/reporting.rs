use anyhow::{Context, Result};
use colored::Colorize;
use formantic_spec::SynthesisReport;
use std::fs;
use std::path::{Path, PathBuf};

/// Report path for a WAV output: `<dir>/<stem>.report.json`.
pub(crate) fn report_path(wav_path: &Path) -> PathBuf {
    let stem = wav_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    wav_path.with_file_name(format!("{}.report.json", stem))
}

pub(crate) fn write_report(report: &SynthesisReport, path: &Path) -> Result<()> {
    let json = report
        .to_json_pretty()
        .context("Failed to serialize report")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write report to: {}", path.display()))?;
    Ok(())
}

pub(crate) fn backend_version() -> String {
    format!("formantic-cli v{}", env!("CARGO_PKG_VERSION"))
}

/// Prints the human-readable summary of a successful run.
pub(crate) fn print_report_summary(report: &SynthesisReport) {
    println!(
        "  {} {} samples @ {} Hz ({:.3}s)",
        "Audio:".dimmed(),
        report.num_samples,
        report.sample_rate,
        report.duration_seconds
    );
    println!(
        "  {} {} steady, {} transition(s), {} silence(s)",
        "Segments:".dimmed(),
        report.segments.steady,
        report.segments.transitions,
        report.segments.silences
    );
    if let Some(hash) = &report.pcm_hash {
        println!("  {} {}", "PCM hash:".dimmed(), &hash[..16.min(hash.len())]);
    }
    if !report.unknown_phonemes.is_empty() {
        println!(
            "  {} unknown phoneme(s) rendered as silence: {}",
            "!".yellow(),
            report.unknown_phonemes.join(" ")
        );
    }
}
