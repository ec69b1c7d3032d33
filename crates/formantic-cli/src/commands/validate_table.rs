//! Validate-table command implementation
//!
//! Loads a formant table and reports its phonemes and content hash.

use anyhow::Result;
use colored::Colorize;
use formantic_spec::FormantTable;
use std::process::ExitCode;

use super::json_output::{error_codes, print_json, JsonError, TableSummary, ValidateTableOutput};
use crate::input::load_table;

/// Run the validate-table command
///
/// # Returns
/// Exit code: 0 if the table loads, 1 otherwise
pub fn run(table_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(table_path)
    } else {
        run_human(table_path)
    }
}

fn summarize(path: &str, table: &FormantTable) -> TableSummary {
    TableSummary {
        path: path.to_string(),
        phoneme_count: table.len(),
        symbols: table.symbols().into_iter().map(str::to_string).collect(),
        table_hash: table.content_hash(),
    }
}

fn run_human(table_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating table:".cyan().bold(), table_path);

    let table = match load_table(table_path) {
        Ok(table) => table,
        Err(e) => {
            println!("  {} {:#}", "x".red(), e);
            println!("\n{} Table is invalid", "FAILED".red().bold());
            return Ok(ExitCode::from(1));
        }
    };

    let summary = summarize(table_path, &table);
    println!("  {} {}", "Phonemes:".dimmed(), summary.symbols.join(" "));
    println!("  {} {}", "Hash:".dimmed(), &summary.table_hash[..16]);
    println!(
        "\n{} Table is valid ({} phonemes)",
        "SUCCESS".green().bold(),
        summary.phoneme_count
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(table_path: &str) -> Result<ExitCode> {
    let output = match load_table(table_path) {
        Ok(table) => ValidateTableOutput {
            success: true,
            errors: Vec::new(),
            table: Some(summarize(table_path, &table)),
        },
        Err(e) => ValidateTableOutput {
            success: false,
            errors: vec![JsonError::from_anyhow(&e, error_codes::FILE_READ)],
            table: None,
        },
    };
    print_json(&output)?;

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
