//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`; its stdout is then exactly one of the
//! documents below, and tracing output stays on stderr.

use formantic_backend::{FormantRealization, SynthError};
use formantic_spec::{DataLoadError, RequestError, SynthesisReport};
use serde::{Deserialize, Serialize};

/// Error codes for CLI-level failures.
///
/// Library errors keep their own codes (`TABLE_xxx`, `REQ_xxx`, `SYNTH_xxx`).
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Request JSON could not be parsed
    pub const REQUEST_PARSE: &str = "CLI_002";
    /// Output could not be written
    pub const WRITE: &str = "CLI_003";
    /// Phoneme missing from the table
    pub const UNKNOWN_PHONEME: &str = "CLI_004";
    /// Anything else
    pub const INTERNAL: &str = "CLI_005";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Converts an error chain, using the code of the outermost recognized cause.
    pub fn from_anyhow(error: &anyhow::Error, fallback_code: &str) -> Self {
        let code = error
            .chain()
            .find_map(|cause| {
                if let Some(e) = cause.downcast_ref::<DataLoadError>() {
                    Some(e.code())
                } else if let Some(e) = cause.downcast_ref::<RequestError>() {
                    Some(e.code())
                } else if let Some(e) = cause.downcast_ref::<SynthError>() {
                    Some(e.code())
                } else if cause.is::<serde_json::Error>() {
                    Some(error_codes::REQUEST_PARSE)
                } else if cause.is::<std::io::Error>() {
                    Some(error_codes::FILE_READ)
                } else {
                    None
                }
            })
            .unwrap_or(fallback_code);
        Self::new(code, format!("{:#}", error))
    }
}

/// Output of `formantic synth --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthOutput {
    /// Whether synthesis succeeded
    pub success: bool,
    /// Errors, if any
    pub errors: Vec<JsonError>,
    /// Path of the written WAV file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Path of the written report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
    /// Full report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SynthesisReport>,
}

impl SynthOutput {
    /// A failed run with no outputs.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            output: None,
            report_path: None,
            report: None,
        }
    }
}

/// Summary of a loaded formant table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSummary {
    /// Table file path
    pub path: String,
    /// Number of phonemes
    pub phoneme_count: usize,
    /// Phoneme symbols, sorted
    pub symbols: Vec<String>,
    /// Content hash
    pub table_hash: String,
}

/// Output of `formantic validate-table --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateTableOutput {
    /// Whether the table loaded
    pub success: bool,
    /// Errors, if any
    pub errors: Vec<JsonError>,
    /// Table summary on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableSummary>,
}

/// One formant slot of a sampled realization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FormantDraw {
    /// Frequency in Hz
    pub frequency: f64,
    /// Bandwidth in Hz
    pub bandwidth: f64,
}

impl FormantDraw {
    /// Converts a realization to serializable slots.
    pub fn from_realization(realization: &FormantRealization) -> Vec<Self> {
        realization
            .formants()
            .iter()
            .map(|f| Self {
                frequency: f.frequency,
                bandwidth: f.bandwidth,
            })
            .collect()
    }
}

/// Output of `formantic sample --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleOutput {
    /// Whether sampling succeeded
    pub success: bool,
    /// Errors, if any
    pub errors: Vec<JsonError>,
    /// Sampled phoneme
    pub phoneme: String,
    /// Seed
    pub seed: u32,
    /// One entry per draw
    pub draws: Vec<Vec<FormantDraw>>,
}

/// Per-request entry of `formantic batch --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Request file path
    pub request: String,
    /// Whether this request succeeded
    pub success: bool,
    /// Path of the written WAV file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// PCM hash of the written WAV file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
    /// Error, if this request failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

/// Output of `formantic batch --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    /// Whether every request succeeded
    pub success: bool,
    /// Errors that stopped the whole batch
    pub errors: Vec<JsonError>,
    /// Per-request results in file-name order
    pub results: Vec<BatchEntry>,
}

/// Prints a JSON document to stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
