//! Synth command implementation
//!
//! Renders one request to a WAV file and writes a report next to it.

use anyhow::{Context, Result};
use colored::Colorize;
use formantic_backend::generate;
use formantic_spec::{canonical_request_hash, ReportBuilder, SynthesisReport, SynthesisRequest};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{error_codes, print_json, JsonError, SynthOutput};
use super::reporting;
use crate::input::{build_request, load_table, RequestOverrides};

/// Arguments of the synth command.
#[derive(Debug, Clone, Default)]
pub struct SynthArgs {
    /// Formant table path (CSV or JSON)
    pub table: String,
    /// Phoneme text, whitespace- or comma-separated
    pub phonemes: Option<String>,
    /// Request file path
    pub request: Option<String>,
    /// Output WAV path
    pub out: String,
    /// Flag overrides
    pub overrides: RequestOverrides,
}

/// Outcome of a synth run that got as far as writing a report.
struct SynthRun {
    request: SynthesisRequest,
    report: SynthesisReport,
    report_path: PathBuf,
}

/// Run the synth command
///
/// # Returns
/// Exit code: 0 on success, 1 if synthesis failed
pub fn run(args: &SynthArgs, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(args)
    } else {
        run_human(args)
    }
}

fn run_human(args: &SynthArgs) -> Result<ExitCode> {
    let source = args
        .request
        .as_deref()
        .or(args.phonemes.as_deref())
        .unwrap_or_default();
    println!("{} {}", "Synthesizing:".cyan().bold(), source);
    println!("{} {}", "Table:".dimmed(), args.table);

    let SynthRun {
        request,
        report,
        report_path,
    } = execute(args)?;

    if report.ok {
        reporting::print_report_summary(&report);
        println!(
            "\n{} Wrote {} ({} phonemes, seed {}, {}ms)",
            "SUCCESS".green().bold(),
            args.out,
            request.phonemes.len(),
            request.seed,
            report.duration_ms
        );
        println!("{} {}", "Report:".dimmed(), report_path.display());
        Ok(ExitCode::SUCCESS)
    } else {
        for error in &report.errors {
            println!("  {} [{}] {}", "x".red(), error.code, error.message);
        }
        println!("\n{} Synthesis failed", "FAILED".red().bold());
        println!("{} {}", "Report:".dimmed(), report_path.display());
        Ok(ExitCode::from(1))
    }
}

fn run_json(args: &SynthArgs) -> Result<ExitCode> {
    let run = match execute(args) {
        Ok(run) => run,
        Err(e) => {
            print_json(&SynthOutput::failure(vec![JsonError::from_anyhow(
                &e,
                error_codes::INTERNAL,
            )]))?;
            return Ok(ExitCode::from(1));
        }
    };

    let ok = run.report.ok;
    let output = SynthOutput {
        success: ok,
        errors: run
            .report
            .errors
            .iter()
            .map(|e| JsonError::new(&e.code, &e.message))
            .collect(),
        output: ok.then(|| args.out.clone()),
        report_path: Some(run.report_path.display().to_string()),
        report: Some(run.report),
    };
    print_json(&output)?;

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Loads inputs, renders, and writes the WAV and report.
///
/// Rendering failures are recorded in the report; only input and I/O
/// failures are returned as errors.
fn execute(args: &SynthArgs) -> Result<SynthRun> {
    let start = Instant::now();

    let table = load_table(&args.table)?;
    let request = build_request(
        args.phonemes.as_deref(),
        args.request.as_deref(),
        &args.overrides,
    )?;
    let request_hash =
        canonical_request_hash(&request).context("Failed to hash synthesis request")?;

    let out_path = Path::new(&args.out);
    let mut builder = ReportBuilder::new(request_hash, reporting::backend_version())
        .request_metadata(&request)
        .table_hash(table.content_hash());

    match generate(&request, &table) {
        Ok(result) => {
            result
                .wav
                .write_to(out_path)
                .with_context(|| format!("Failed to write WAV file: {}", args.out))?;
            builder = builder
                .samples(result.wav.num_samples)
                .pcm_hash(result.wav.pcm_hash)
                .segments(result.segments)
                .unknown_phonemes(result.unknown_phonemes);
        }
        Err(e) => {
            builder = builder.error(e.code(), e.to_string());
        }
    }

    let report = builder
        .duration_ms(start.elapsed().as_millis() as u64)
        .build();
    let report_path = reporting::report_path(out_path);
    reporting::write_report(&report, &report_path)?;

    Ok(SynthRun {
        request,
        report,
        report_path,
    })
}
