//! Formantic Data Model
//!
//! This crate provides the types shared by the Formantic synthesizer and its
//! command-line front end:
//!
//! - **Formant tables**: per-phoneme formant statistics loaded from CSV or JSON
//! - **Synthesis requests**: phoneme sequence plus timing, seed, and output options
//! - **Voice preferences**: fixed-shape personalization record for downstream engines
//! - **Reports**: machine-readable summaries of a synthesis run
//!
//! # Example
//!
//! ```
//! use formantic_spec::FormantTable;
//!
//! let csv = "\
//! Phoneme,F1_Mean,F1_Std,F1_BW,F2_Mean,F2_Std,F2_BW,F3_Mean,F3_Std,F3_BW,BW_Std
//! a,700,20,80,1200,30,90,2600,40,100,5
//! ";
//!
//! let table = FormantTable::from_csv_str(csv).unwrap();
//! assert!(table.lookup("a").is_some());
//! assert!(table.lookup("z").is_none());
//! ```
//!
//! # Modules
//!
//! - [`error`]: Table load and request validation errors
//! - [`profile`]: Per-phoneme formant statistics
//! - [`table`]: Immutable phoneme → profile lookup
//! - [`request`]: Synthesis request configuration
//! - [`voice`]: Voice preference record
//! - [`report`]: Synthesis report types and builder
//! - [`hash`]: Canonical hashing

mod csv;
pub mod error;
pub mod hash;
pub mod profile;
pub mod report;
pub mod request;
pub mod table;
pub mod voice;

// Re-export commonly used types at the crate root
pub use error::{DataLoadError, RequestError};
pub use hash::{canonical_json_hash, canonical_request_hash, canonicalize_json};
pub use profile::{FormantStats, PhonemeProfile, FORMANT_COUNT};
pub use report::{ReportBuilder, ReportError, SegmentCounts, SynthesisReport, REPORT_VERSION};
pub use request::{
    split_phonemes, Normalization, SynthesisRequest, DEFAULT_PHONEME_DURATION, DEFAULT_SAMPLE_RATE,
    DEFAULT_TRANSITION_DURATION, MAX_SAMPLE_RATE, MAX_SEGMENT_DURATION,
};
pub use table::{is_placeholder, FormantTable, UNKNOWN_PLACEHOLDER};
pub use voice::{
    Accent, PitchLevel, SpeechRate, VoiceGender, VoicePreferences, MAX_VOLUME, MIN_VOLUME,
};
