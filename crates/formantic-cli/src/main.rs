//! Formantic CLI - command-line interface for formant speech synthesis
//!
//! This binary renders phoneme sequences to WAV files and inspects formant
//! tables.

use clap::{Parser, Subcommand};
use formantic_spec::Normalization;
use std::process::ExitCode;

use formantic_cli::commands;
use formantic_cli::commands::synth::SynthArgs;
use formantic_cli::input::RequestOverrides;

/// Formantic - formant-based speech synthesis
#[derive(Parser)]
#[command(name = "formantic")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render phonemes to a WAV file
    Synth {
        /// Formant table (CSV or JSON)
        #[arg(short, long)]
        table: String,

        /// Phoneme text, whitespace- or comma-separated
        #[arg(short, long, conflicts_with = "request", required_unless_present = "request")]
        phonemes: Option<String>,

        /// Request file (JSON)
        #[arg(short, long)]
        request: Option<String>,

        /// Output WAV path
        #[arg(short, long)]
        out: String,

        /// Steady-state duration per phoneme in seconds
        #[arg(long)]
        phoneme_duration: Option<f64>,

        /// Transition duration in seconds
        #[arg(long)]
        transition_duration: Option<f64>,

        /// Output sample rate in Hz
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Seed for formant sampling
        #[arg(long)]
        seed: Option<u32>,

        /// Normalization applied before 16-bit encoding (peak, clip)
        #[arg(long)]
        normalization: Option<Normalization>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Load a formant table and report its phonemes
    ValidateTable {
        /// Formant table (CSV or JSON)
        #[arg(short, long)]
        table: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Draw formant realizations for one phoneme
    Sample {
        /// Formant table (CSV or JSON)
        #[arg(short, long)]
        table: String,

        /// Phoneme symbol
        #[arg(short, long)]
        phoneme: String,

        /// Seed for formant sampling
        #[arg(long, default_value_t = 0)]
        seed: u32,

        /// Number of draws
        #[arg(
            short,
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u64).range(1..=commands::sample::MAX_DRAWS)
        )]
        count: u64,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render every request file in a directory
    Batch {
        /// Formant table (CSV or JSON)
        #[arg(short, long)]
        table: String,

        /// Directory of request files (*.json)
        #[arg(short, long)]
        requests: String,

        /// Output directory
        #[arg(short, long)]
        out_dir: String,

        /// Worker threads (default: available cores)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Synth {
            table,
            phonemes,
            request,
            out,
            phoneme_duration,
            transition_duration,
            sample_rate,
            seed,
            normalization,
            json,
        } => {
            let args = SynthArgs {
                table,
                phonemes,
                request,
                out,
                overrides: RequestOverrides {
                    phoneme_duration,
                    transition_duration,
                    sample_rate,
                    seed,
                    normalization,
                },
            };
            commands::synth::run(&args, json)
        }
        Commands::ValidateTable { table, json } => commands::validate_table::run(&table, json),
        Commands::Sample {
            table,
            phoneme,
            seed,
            count,
            json,
        } => commands::sample::run(&table, &phoneme, seed, count as usize, json),
        Commands::Batch {
            table,
            requests,
            out_dir,
            jobs,
            json,
        } => commands::batch::run(&table, &requests, &out_dir, jobs, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_synth_with_phonemes() {
        let cli = Cli::try_parse_from([
            "formantic",
            "synth",
            "--table",
            "t.csv",
            "--phonemes",
            "a i u",
            "--out",
            "o.wav",
            "--seed",
            "7",
            "--normalization",
            "clip",
        ])
        .unwrap();
        match cli.command {
            Commands::Synth {
                phonemes,
                request,
                seed,
                normalization,
                json,
                ..
            } => {
                assert_eq!(phonemes.as_deref(), Some("a i u"));
                assert!(request.is_none());
                assert_eq!(seed, Some(7));
                assert_eq!(normalization, Some(Normalization::Clip));
                assert!(!json);
            }
            _ => panic!("expected synth command"),
        }
    }

    #[test]
    fn test_cli_synth_requires_a_source() {
        let result =
            Cli::try_parse_from(["formantic", "synth", "--table", "t.csv", "--out", "o.wav"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_synth_sources_conflict() {
        let result = Cli::try_parse_from([
            "formantic",
            "synth",
            "--table",
            "t.csv",
            "--phonemes",
            "a",
            "--request",
            "r.json",
            "--out",
            "o.wav",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_normalization() {
        let result = Cli::try_parse_from([
            "formantic",
            "synth",
            "--table",
            "t.csv",
            "--phonemes",
            "a",
            "--out",
            "o.wav",
            "--normalization",
            "loudest",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_sample_defaults() {
        let cli =
            Cli::try_parse_from(["formantic", "sample", "--table", "t.csv", "--phoneme", "a"])
                .unwrap();
        match cli.command {
            Commands::Sample {
                phoneme,
                seed,
                count,
                ..
            } => {
                assert_eq!(phoneme, "a");
                assert_eq!(seed, 0);
                assert_eq!(count, 1);
            }
            _ => panic!("expected sample command"),
        }
    }

    #[test]
    fn test_cli_sample_count_is_bounded() {
        let parse = |count: &str| {
            Cli::try_parse_from([
                "formantic",
                "sample",
                "--table",
                "t.csv",
                "--phoneme",
                "a",
                "--count",
                count,
            ])
        };
        assert!(parse("1000000000000").is_err());
        assert!(parse("0").is_err());
        match parse("10000").unwrap().command {
            Commands::Sample { count, .. } => assert_eq!(count, commands::sample::MAX_DRAWS),
            _ => panic!("expected sample command"),
        }
    }

    #[test]
    fn test_cli_verbose_is_global() {
        let cli =
            Cli::try_parse_from(["formantic", "validate-table", "-t", "t.csv", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parses_batch() {
        let cli = Cli::try_parse_from([
            "formantic",
            "batch",
            "--table",
            "t.csv",
            "--requests",
            "reqs",
            "--out-dir",
            "out",
            "--jobs",
            "4",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Batch { jobs, json, .. } => {
                assert_eq!(jobs, Some(4));
                assert!(json);
            }
            _ => panic!("expected batch command"),
        }
    }
}
