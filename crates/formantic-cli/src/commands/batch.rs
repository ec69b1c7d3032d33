//! Batch command implementation
//!
//! Renders every `*.json` request in a directory on worker threads, writing
//! `<stem>.wav` and `<stem>.report.json` per request into the output directory.

use anyhow::{Context, Result};
use colored::Colorize;
use formantic_backend::{generate_batch, generate_batch_with_jobs, GenerateResult, SynthResult};
use formantic_spec::{canonical_request_hash, FormantTable, ReportBuilder, SynthesisRequest};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{error_codes, print_json, BatchEntry, BatchOutput, JsonError};
use super::reporting;
use crate::input::{load_request, load_table};

/// Run the batch command
///
/// # Arguments
/// * `table_path` - Formant table (CSV or JSON)
/// * `requests_dir` - Directory of request files
/// * `out_dir` - Output directory, created if missing
/// * `jobs` - Worker count (default: available cores)
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every request rendered, 1 otherwise
pub fn run(
    table_path: &str,
    requests_dir: &str,
    out_dir: &str,
    jobs: Option<usize>,
    json_output: bool,
) -> Result<ExitCode> {
    if !json_output {
        println!("{} {}", "Batch:".cyan().bold(), requests_dir);
    }

    let entries = match execute(table_path, Path::new(requests_dir), Path::new(out_dir), jobs) {
        Ok(entries) => entries,
        Err(e) if json_output => {
            print_json(&BatchOutput {
                success: false,
                errors: vec![JsonError::from_anyhow(&e, error_codes::FILE_READ)],
                results: Vec::new(),
            })?;
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e),
    };
    let failed = entries.iter().filter(|e| !e.success).count();

    if json_output {
        print_json(&BatchOutput {
            success: failed == 0,
            errors: Vec::new(),
            results: entries,
        })?;
    } else {
        for entry in &entries {
            match (&entry.output, &entry.error) {
                (Some(output), _) => println!("  {} {} -> {}", "+".green(), entry.request, output),
                (None, Some(error)) => println!(
                    "  {} {} [{}] {}",
                    "x".red(),
                    entry.request,
                    error.code,
                    error.message
                ),
                (None, None) => {}
            }
        }
        if failed == 0 {
            println!(
                "\n{} Rendered {} request(s) into {}",
                "SUCCESS".green().bold(),
                entries.len(),
                out_dir
            );
        } else {
            println!(
                "\n{} {} of {} request(s) failed",
                "FAILED".red().bold(),
                failed,
                entries.len()
            );
        }
    }

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Lists `*.json` files in `dir`, sorted by file name.
pub fn request_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read request directory: {}", dir.display()))?
    {
        let path = entry?.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if path.is_file() && is_json {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn execute(
    table_path: &str,
    requests_dir: &Path,
    out_dir: &Path,
    jobs: Option<usize>,
) -> Result<Vec<BatchEntry>> {
    let table = load_table(table_path)?;
    let files = request_files(requests_dir)?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let mut entries: Vec<Option<BatchEntry>> = Vec::with_capacity(files.len());
    let mut pending: Vec<(usize, &Path, SynthesisRequest)> = Vec::new();
    for (index, file) in files.iter().enumerate() {
        match load_request(file) {
            Ok(request) => {
                entries.push(None);
                pending.push((index, file, request));
            }
            Err(e) => entries.push(Some(BatchEntry {
                request: file.display().to_string(),
                success: false,
                output: None,
                pcm_hash: None,
                error: Some(JsonError::from_anyhow(&e, error_codes::REQUEST_PARSE)),
            })),
        }
    }

    let start = Instant::now();
    let requests: Vec<SynthesisRequest> = pending.iter().map(|(_, _, r)| r.clone()).collect();
    let results = match jobs {
        Some(jobs) => generate_batch_with_jobs(&requests, &table, jobs),
        None => generate_batch(&requests, &table),
    };
    let elapsed_ms = start.elapsed().as_millis() as u64;

    for ((index, file, request), result) in pending.into_iter().zip(results) {
        let entry = finish(file, &request, result, &table, out_dir, elapsed_ms)?;
        entries[index] = Some(entry);
    }

    Ok(entries.into_iter().flatten().collect())
}

/// Writes the WAV and report for one rendered request.
fn finish(
    file: &Path,
    request: &SynthesisRequest,
    result: SynthResult<GenerateResult>,
    table: &FormantTable,
    out_dir: &Path,
    elapsed_ms: u64,
) -> Result<BatchEntry> {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let wav_path = out_dir.join(format!("{}.wav", stem));
    let request_hash =
        canonical_request_hash(request).context("Failed to hash synthesis request")?;

    let builder = ReportBuilder::new(request_hash, reporting::backend_version())
        .request_metadata(request)
        .table_hash(table.content_hash())
        .duration_ms(elapsed_ms);

    let (report, entry) = match result {
        Ok(result) => {
            result
                .wav
                .write_to(&wav_path)
                .with_context(|| format!("Failed to write WAV file: {}", wav_path.display()))?;
            let entry = BatchEntry {
                request: file.display().to_string(),
                success: true,
                output: Some(wav_path.display().to_string()),
                pcm_hash: Some(result.wav.pcm_hash.clone()),
                error: None,
            };
            let report = builder
                .samples(result.wav.num_samples)
                .pcm_hash(result.wav.pcm_hash)
                .segments(result.segments)
                .unknown_phonemes(result.unknown_phonemes)
                .build();
            (report, entry)
        }
        Err(e) => {
            let entry = BatchEntry {
                request: file.display().to_string(),
                success: false,
                output: None,
                pcm_hash: None,
                error: Some(JsonError::new(e.code(), e.to_string())),
            };
            (builder.error(e.code(), e.to_string()).build(), entry)
        }
    };

    reporting::write_report(&report, &reporting::report_path(&wav_path))?;
    Ok(entry)
}
