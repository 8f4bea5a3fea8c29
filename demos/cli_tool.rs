//! CLI Tool Example
//!
//! This example demonstrates how to build a command-line tool
//! using csvbook for converting CSV batch archives to Excel workbooks.

use chrono::Utc;
use csvbook::{Conversion, ConverterBuilder, CsvToXlsxError, TraversalMode};
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let input_path = &args[1];

    // Optional positional output path, then options
    let mut output_path: Option<String> = None;
    let mut i = 2;
    if args.len() > 2 && !args[2].starts_with("--") {
        output_path = Some(args[2].clone());
        i = 3;
    }

    // Parse options
    let mut traversal = TraversalMode::RecursiveFlat;
    let mut max_sheet_name_len: Option<usize> = None;
    let mut report_json: Option<String> = None;
    while i < args.len() {
        match args[i].as_str() {
            "--single-subfolder" => {
                traversal = TraversalMode::SingleSubfolder;
                i += 1;
            }
            "--max-sheet-name-len" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --max-sheet-name-len requires a value");
                    process::exit(1);
                }
                let value = args[i + 1].parse::<usize>().unwrap_or_else(|_| {
                    eprintln!("Error: Invalid sheet name length: {}", args[i + 1]);
                    process::exit(1);
                });
                max_sheet_name_len = Some(value);
                i += 2;
            }
            "--report-json" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --report-json requires a value");
                    process::exit(1);
                }
                report_json = Some(args[i + 1].clone());
                i += 2;
            }
            _ => {
                eprintln!("Error: Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
    }

    let output_path = output_path.unwrap_or_else(|| {
        format!("converted_{}.xlsx", Utc::now().format("%Y%m%d_%H%M%S"))
    });

    // Convert the archive
    match convert_archive(input_path, &output_path, traversal, max_sheet_name_len) {
        Ok(conversion) => {
            println!(
                "Conversion completed: {} -> {} ({} of {} file(s))",
                input_path,
                output_path,
                conversion.report.successes().len(),
                conversion.report.total_candidates()
            );
            for failure in conversion.report.failures() {
                eprintln!("warning: {}: {}", failure.file, failure.reason);
            }
            for anomaly in conversion.report.anomalies() {
                eprintln!("warning: {}", anomaly);
            }

            if let Some(path) = report_json {
                if let Err(e) = write_report_json(&path, &conversion) {
                    eprintln!("Error: Could not write report to '{}': {}", path, e);
                    process::exit(1);
                }
                println!("Report written to: {}", path);
            }
        }
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <input.zip> [output.xlsx] [options]", program);
    eprintln!("\nOptions:");
    eprintln!("  --single-subfolder          Require exactly one top-level folder in the archive");
    eprintln!("  --max-sheet-name-len <n>    Limit sheet names to n characters (1-31)");
    eprintln!("  --report-json <path>        Write the conversion report as JSON");
    eprintln!("\nExamples:");
    eprintln!("  {} batch.zip", program);
    eprintln!("  {} batch.zip monthly.xlsx", program);
    eprintln!(
        "  {} batch.zip --single-subfolder --report-json report.json",
        program
    );
}

fn convert_archive(
    input_path: &str,
    output_path: &str,
    traversal: TraversalMode,
    max_sheet_name_len: Option<usize>,
) -> Result<Conversion, CsvToXlsxError> {
    // Build converter with the requested settings
    let mut builder = ConverterBuilder::new().with_traversal_mode(traversal);
    if let Some(max_len) = max_sheet_name_len {
        builder = builder.with_sheet_name_max_len(max_len);
    }
    let converter = builder.build()?;

    // Read the archive and convert it
    let archive = fs::read(input_path)?;
    let conversion = converter.convert(&archive)?;

    // Write the workbook
    fs::write(output_path, &conversion.artifact)?;

    Ok(conversion)
}

fn write_report_json(path: &str, conversion: &Conversion) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(&conversion.report)?;
    fs::write(path, json)?;
    Ok(())
}

fn handle_error(error: CsvToXlsxError) {
    match error {
        CsvToXlsxError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        CsvToXlsxError::InvalidArchive(msg) => {
            eprintln!("Archive Error: {}", msg);
            eprintln!("The input may be corrupted or not a ZIP archive.");
        }
        CsvToXlsxError::NoCandidatesFound(msg) => {
            eprintln!("No Candidates: {}", msg);
            eprintln!("The archive contains no CSV files for the selected traversal mode.");
        }
        CsvToXlsxError::FileRead { file, cause } => {
            eprintln!("File Error in '{}': {}", file, cause);
        }
        CsvToXlsxError::SheetNameExhausted { file } => {
            eprintln!("Sheet Name Error: no unique name available for '{}'", file);
            eprintln!("Try a larger --max-sheet-name-len value.");
        }
        CsvToXlsxError::NoConvertibleFiles { report } => {
            eprintln!(
                "Conversion Failed: none of the {} candidate file(s) could be converted.",
                report.total_candidates()
            );
            for failure in report.failures() {
                eprintln!("  {}: {}", failure.file, failure.reason);
            }
        }
        CsvToXlsxError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
            eprintln!("Please check the command line options.");
        }
        CsvToXlsxError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
            eprintln!("The archive violates extraction limits (entry count or size).");
        }
        CsvToXlsxError::Workbook(msg) => {
            eprintln!("Workbook Error: {}", msg);
        }
    }
}
