//! Basic Conversion Example
//!
//! This example demonstrates the most basic usage of csvbook:
//! converting a ZIP archive of CSV files into a single Excel workbook
//! using default settings.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example basic_conversion -- batch.zip [output.xlsx]
//! ```
//!
//! If no output path is provided, a timestamped file name such as
//! `converted_20260822_120000.xlsx` is used.

use chrono::Utc;
use csvbook::ConverterBuilder;
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Get input archive path from command line arguments or use default
    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "batch.zip".to_string());

    // Get output file path from command line arguments or derive one
    let output_path = std::env::args().nth(2).unwrap_or_else(|| {
        format!("converted_{}.xlsx", Utc::now().format("%Y%m%d_%H%M%S"))
    });

    println!("Converting {} to {}...", input_path, output_path);

    // Create a converter with default settings
    let converter = ConverterBuilder::new().build()?;

    // Read the whole archive into memory
    let archive = fs::read(&input_path).map_err(|e| {
        eprintln!("Error: Could not read input archive '{}'", input_path);
        eprintln!("  {}", e);
        eprintln!("\nHint: Provide a path to a ZIP archive containing CSV files.");
        e
    })?;

    // Convert the CSV batch into a single workbook
    let conversion = converter.convert(&archive)?;

    fs::write(&output_path, &conversion.artifact)?;

    println!(
        "Converted {} of {} file(s).",
        conversion.report.successes().len(),
        conversion.report.total_candidates()
    );
    for failure in conversion.report.failures() {
        eprintln!("warning: {}: {}", failure.file, failure.reason);
    }
    println!("Output written to: {}", output_path);

    Ok(())
}
