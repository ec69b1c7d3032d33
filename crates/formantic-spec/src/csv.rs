//! Minimal CSV record reader for formant tables.
//!
//! Supports comma separators, RFC 4180 double-quote quoting (with `""` as an
//! escaped quote), blank lines, and `#` comment lines. Records never span
//! physical lines.

use crate::error::DataLoadError;

/// One parsed record with its 1-based source line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Splits `text` into records, skipping blank and comment lines.
pub(crate) fn read_records(text: &str) -> Result<Vec<Record>, DataLoadError> {
    let mut records = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields = split_fields(raw.trim_start_matches('\u{feff}'), line)?;
        records.push(Record { line, fields });
    }
    Ok(records)
}

/// Splits one line into trimmed fields.
fn split_fields(line: &str, line_no: usize) -> Result<Vec<String>, DataLoadError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(DataLoadError::UnterminatedQuote { line: line_no });
    }
    fields.push(current.trim().to_string());
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_fields() {
        let records = read_records("a,b , c\n1,2,3").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields, vec!["a", "b", "c"]);
        assert_eq!(records[1].line, 2);
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let records = read_records("# formants\n\nx,y\n   \n# trailing\n1,2\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 3);
        assert_eq!(records[1].line, 6);
    }

    #[test]
    fn test_quoted_fields() {
        let records = read_records("\"a,b\",\"say \"\"hi\"\"\",c").unwrap();
        assert_eq!(records[0].fields, vec!["a,b", "say \"hi\"", "c"]);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = read_records("ok\n\"broken,1").unwrap_err();
        assert!(matches!(err, DataLoadError::UnterminatedQuote { line: 2 }));
    }

    #[test]
    fn test_empty_trailing_field() {
        let records = read_records("a,b,").unwrap();
        assert_eq!(records[0].fields, vec!["a", "b", ""]);
    }

    #[test]
    fn test_byte_order_mark_stripped() {
        let records = read_records("\u{feff}Phoneme,F1_Mean").unwrap();
        assert_eq!(records[0].fields[0], "Phoneme");
    }
}
