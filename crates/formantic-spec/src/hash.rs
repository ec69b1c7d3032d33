//! Canonical hashing.
//!
//! Requests and tables are hashed as:
//! ```text
//! hash = hex(BLAKE3(JCS(json)))
//! ```
//! where JCS is the JSON Canonicalization Scheme (RFC 8785): sorted object
//! keys, no whitespace, minimal number and string forms.

use std::fmt::Write;

use serde_json::{Number, Value};

use crate::request::SynthesisRequest;

/// Computes the canonical BLAKE3 hash of a synthesis request.
///
/// # Example
/// ```
/// use formantic_spec::{canonical_request_hash, SynthesisRequest};
///
/// let request = SynthesisRequest::new(vec!["a".to_string()]).with_seed(7);
/// let hash = canonical_request_hash(&request).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_request_hash(request: &SynthesisRequest) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(request)?;
    Ok(canonical_json_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_json_hash(value: &Value) -> String {
    let canonical = canonicalize_json(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Canonicalizes a JSON value according to RFC 8785 (JCS).
pub fn canonicalize_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(&mut out, value);
    out
}

fn write_canonical(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_canonical(out, &map[key]);
            }
            out.push('}');
        }
    }
}

fn write_number(out: &mut String, n: &Number) {
    if n.is_i64() || n.is_u64() {
        let _ = write!(out, "{}", n);
        return;
    }
    match n.as_f64() {
        Some(f) if !f.is_finite() => out.push_str("null"),
        Some(f) if f == 0.0 => out.push('0'),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
            let _ = write!(out, "{}", f as i64);
        }
        // shortest round-trip form, no trailing zeros
        Some(f) => {
            let _ = write!(out, "{}", f);
        }
        None => out.push_str("null"),
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
