//! Error types for formant table loading and request validation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a formant table.
///
/// Line numbers are 1-based and refer to the physical line in the source
/// text (the header is line 1 for CSV input).
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// The table file could not be read.
    #[error("failed to read formant table {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not name a supported format.
    #[error("unsupported formant table format: {path} (expected .csv or .json)")]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },

    /// The source contained no header row.
    #[error("formant table is empty")]
    Empty,

    /// A required column is absent from the header.
    #[error("missing required column '{column}'")]
    MissingColumn {
        /// Column name.
        column: String,
    },

    /// A row has fewer fields than the header requires.
    #[error("line {line}: missing value for column '{column}'")]
    MissingField {
        /// Source line.
        line: usize,
        /// Column name.
        column: String,
    },

    /// A numeric field did not parse.
    #[error("line {line}: column '{column}' is not a number: '{value}'")]
    InvalidNumber {
        /// Source line.
        line: usize,
        /// Column name.
        column: String,
        /// Raw field text.
        value: String,
    },

    /// A parsed profile violates a data-model invariant.
    #[error("phoneme '{phoneme}': {message}")]
    InvalidProfile {
        /// Phoneme symbol.
        phoneme: String,
        /// What is wrong.
        message: String,
    },

    /// The same phoneme appears twice.
    #[error("duplicate phoneme '{phoneme}'")]
    DuplicatePhoneme {
        /// Phoneme symbol.
        phoneme: String,
    },

    /// A quoted CSV field was never closed.
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote {
        /// Source line.
        line: usize,
    },

    /// JSON table parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DataLoadError {
    /// Creates an invalid profile error.
    pub fn invalid_profile(phoneme: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidProfile {
            phoneme: phoneme.into(),
            message: message.into(),
        }
    }

    /// Returns the stable error code (e.g., "TABLE_003").
    pub fn code(&self) -> &'static str {
        match self {
            DataLoadError::Io { .. } => "TABLE_001",
            DataLoadError::UnsupportedFormat { .. } => "TABLE_002",
            DataLoadError::Empty => "TABLE_003",
            DataLoadError::MissingColumn { .. } => "TABLE_004",
            DataLoadError::MissingField { .. } => "TABLE_005",
            DataLoadError::InvalidNumber { .. } => "TABLE_006",
            DataLoadError::InvalidProfile { .. } => "TABLE_007",
            DataLoadError::DuplicatePhoneme { .. } => "TABLE_008",
            DataLoadError::UnterminatedQuote { .. } => "TABLE_009",
            DataLoadError::Json(_) => "TABLE_010",
        }
    }
}

/// A single problem found while validating a synthesis request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// Sample rate is zero or above the supported maximum.
    #[error("invalid sample rate: {rate} Hz")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// A duration is negative, non-finite, or too long.
    #[error("invalid {field}: {duration} seconds")]
    InvalidDuration {
        /// Which duration (`phoneme_duration` or `transition_duration`).
        field: &'static str,
        /// The invalid duration.
        duration: f64,
    },

    /// Voice volume outside 1..=10.
    #[error("invalid voice volume: {volume} (expected 1-10)")]
    InvalidVolume {
        /// The invalid volume.
        volume: u8,
    },
}

impl RequestError {
    /// Returns the stable error code (e.g., "REQ_001").
    pub fn code(&self) -> &'static str {
        match self {
            RequestError::InvalidSampleRate { .. } => "REQ_001",
            RequestError::InvalidDuration { .. } => "REQ_002",
            RequestError::InvalidVolume { .. } => "REQ_003",
        }
    }
}
