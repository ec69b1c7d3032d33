//! Immutable phoneme → formant profile lookup.
//!
//! A [`FormantTable`] is built once from a CSV or JSON source and never
//! mutated afterwards, so a single table can be shared by reference across
//! any number of concurrent renders.
//!
//! # CSV schema
//!
//! One row per phoneme, header required, column order free:
//!
//! ```text
//! Phoneme,F1_Mean,F1_Std,F1_BW,F2_Mean,F2_Std,F2_BW,F3_Mean,F3_Std,F3_BW,BW_Std
//! ```
//!
//! `BW_Std` is the bandwidth deviation shared by all three slots. A row may
//! override it per slot with the optional `F1_BW_Std`, `F2_BW_Std`, and
//! `F3_BW_Std` columns. Unknown columns are ignored.

use std::collections::HashMap;
use std::path::Path;

use crate::csv::{read_records, Record};
use crate::error::DataLoadError;
use crate::hash::canonical_json_hash;
use crate::profile::{FormantStats, PhonemeProfile, FORMANT_COUNT};

/// Token emitted by pronunciation lookups for words they cannot resolve.
pub const UNKNOWN_PLACEHOLDER: &str = "<unk>";

const PHONEME_COLUMN: &str = "Phoneme";
const SHARED_BW_STD_COLUMN: &str = "BW_Std";

/// Returns true for symbols that must always be treated as a lookup miss:
/// empty or whitespace-only strings and [`UNKNOWN_PLACEHOLDER`].
pub fn is_placeholder(symbol: &str) -> bool {
    let trimmed = symbol.trim();
    trimmed.is_empty() || trimmed == UNKNOWN_PLACEHOLDER
}

/// Lookup table from phoneme symbol to its formant statistics.
#[derive(Debug, Clone, Default)]
pub struct FormantTable {
    profiles: HashMap<String, PhonemeProfile>,
}

impl FormantTable {
    /// Loads a table from disk, choosing the parser by file extension
    /// (`.csv` or `.json`, case-insensitive).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let parse: fn(&str) -> Result<Self, DataLoadError> = match extension.as_deref() {
            Some("csv") => Self::from_csv_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(DataLoadError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&text)
    }

    /// Parses a CSV table.
    pub fn from_csv_str(text: &str) -> Result<Self, DataLoadError> {
        let records = read_records(text)?;
        let (header, rows) = records.split_first().ok_or(DataLoadError::Empty)?;
        let columns = ColumnMap::from_header(header)?;

        let profiles = rows
            .iter()
            .map(|row| columns.parse_row(row))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_profiles(profiles)
    }

    /// Parses a JSON array of [`PhonemeProfile`] objects.
    pub fn from_json_str(text: &str) -> Result<Self, DataLoadError> {
        let profiles: Vec<PhonemeProfile> = serde_json::from_str(text)?;
        Self::from_profiles(profiles)
    }

    /// Builds a table from already-constructed profiles, validating each one.
    pub fn from_profiles(
        profiles: impl IntoIterator<Item = PhonemeProfile>,
    ) -> Result<Self, DataLoadError> {
        let mut map = HashMap::new();
        for mut profile in profiles {
            profile.symbol = profile.symbol.trim().to_string();
            profile.validate()?;
            if map.contains_key(&profile.symbol) {
                return Err(DataLoadError::DuplicatePhoneme {
                    phoneme: profile.symbol,
                });
            }
            map.insert(profile.symbol.clone(), profile);
        }
        Ok(Self { profiles: map })
    }

    /// Looks up a phoneme. Placeholder tokens always miss.
    pub fn lookup(&self, symbol: &str) -> Option<&PhonemeProfile> {
        if is_placeholder(symbol) {
            return None;
        }
        self.profiles.get(symbol.trim())
    }

    /// Returns true if the phoneme is known.
    pub fn contains(&self, symbol: &str) -> bool {
        self.lookup(symbol).is_some()
    }

    /// Number of phonemes in the table.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if the table has no phonemes.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// All known symbols, sorted.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    /// All profiles, sorted by symbol.
    pub fn profiles(&self) -> Vec<&PhonemeProfile> {
        let mut profiles: Vec<&PhonemeProfile> = self.profiles.values().collect();
        profiles.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        profiles
    }

    /// BLAKE3 hash of the table's canonical JSON form.
    ///
    /// Independent of source format and row order.
    pub fn content_hash(&self) -> String {
        let value = serde_json::to_value(self.profiles()).unwrap_or(serde_json::Value::Null);
        canonical_json_hash(&value)
    }
}

/// Column indices resolved from a CSV header.
struct ColumnMap {
    phoneme: usize,
    slots: [SlotColumns; FORMANT_COUNT],
    shared_bw_std: usize,
}

struct SlotColumns {
    mean: (usize, String),
    std: (usize, String),
    bandwidth: (usize, String),
    bandwidth_std: Option<(usize, String)>,
}

impl ColumnMap {
    fn from_header(header: &Record) -> Result<Self, DataLoadError> {
        let find = |name: &str| header.fields.iter().position(|field| field == name);
        let require = |name: String| -> Result<(usize, String), DataLoadError> {
            match find(&name) {
                Some(index) => Ok((index, name)),
                None => Err(DataLoadError::MissingColumn { column: name }),
            }
        };

        let phoneme = require(PHONEME_COLUMN.to_string())?.0;
        let shared_bw_std = require(SHARED_BW_STD_COLUMN.to_string())?.0;

        let slot = |k: usize| -> Result<SlotColumns, DataLoadError> {
            let bw_std_name = format!("F{}_BW_Std", k);
            Ok(SlotColumns {
                mean: require(format!("F{}_Mean", k))?,
                std: require(format!("F{}_Std", k))?,
                bandwidth: require(format!("F{}_BW", k))?,
                bandwidth_std: find(&bw_std_name).map(|index| (index, bw_std_name)),
            })
        };

        Ok(Self {
            phoneme,
            slots: [slot(1)?, slot(2)?, slot(3)?],
            shared_bw_std,
        })
    }

    fn parse_row(&self, row: &Record) -> Result<PhonemeProfile, DataLoadError> {
        let symbol = field(row, self.phoneme, PHONEME_COLUMN)?;

        let mut formants = [FormantStats::fixed(0.0, 0.0); FORMANT_COUNT];
        for (stats, columns) in formants.iter_mut().zip(&self.slots) {
            *stats = FormantStats::new(
                number(row, columns.mean.0, &columns.mean.1)?,
                number(row, columns.std.0, &columns.std.1)?,
                number(row, columns.bandwidth.0, &columns.bandwidth.1)?,
                0.0,
            );
        }

        let shared_bw_std = number(row, self.shared_bw_std, SHARED_BW_STD_COLUMN)?;
        for (stats, columns) in formants.iter_mut().zip(&self.slots) {
            stats.bandwidth_std = match &columns.bandwidth_std {
                Some((index, name)) if has_value(row, *index) => number(row, *index, name)?,
                _ => shared_bw_std,
            };
        }

        Ok(PhonemeProfile::new(symbol, formants))
    }
}

fn has_value(row: &Record, index: usize) -> bool {
    row.fields.get(index).is_some_and(|value| !value.is_empty())
}

fn field<'a>(row: &'a Record, index: usize, column: &str) -> Result<&'a str, DataLoadError> {
    match row.fields.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DataLoadError::MissingField {
            line: row.line,
            column: column.to_string(),
        }),
    }
}

fn number(row: &Record, index: usize, column: &str) -> Result<f64, DataLoadError> {
    let raw = field(row, index, column)?;
    raw.parse::<f64>().map_err(|_| DataLoadError::InvalidNumber {
        line: row.line,
        column: column.to_string(),
        value: raw.to_string(),
    })
}
