//! csvbook - Pure-Rust CSV batch to Excel workbook converter
//!
//! This crate converts a batch of CSV files delivered as a single ZIP archive
//! into one Excel (XLSX) workbook, where every input file becomes its own
//! worksheet. Per-file failures are isolated and collected into a structured
//! report, so one malformed file never spoils the rest of the batch.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use csvbook::ConverterBuilder;
//! use std::fs;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a converter with default settings
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // Read the uploaded archive
//!     let archive = fs::read("batch.zip")?;
//!
//!     // Convert: one worksheet per CSV file
//!     let conversion = converter.convert(&archive)?;
//!
//!     // Persist the workbook and surface per-file warnings
//!     fs::write("workbook.xlsx", &conversion.artifact)?;
//!     for failure in conversion.report.failures() {
//!         eprintln!("skipped {}: {}", failure.file, failure.reason);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use csvbook::{ConverterBuilder, TraversalMode};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Accept only archives with a single top-level folder and
//!     // keep sheet names short
//!     let converter = ConverterBuilder::new()
//!         .with_traversal_mode(TraversalMode::SingleSubfolder)
//!         .with_sheet_name_max_len(20)
//!         .build()?;
//!
//!     let archive = std::fs::read("export.zip")?;
//!     let conversion = converter.convert(&archive)?;
//!     println!(
//!         "{} of {} files converted",
//!         conversion.report.successes().len(),
//!         conversion.report.total_candidates()
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Model
//!
//! Run-terminating conditions (`InvalidArchive`, `NoCandidatesFound`,
//! `NoConvertibleFiles`, ...) are returned as [`CsvToXlsxError`] values.
//! Failures of individual files are never terminal: they are recorded in
//! the [`ConversionReport`] and the remaining files keep converting. When
//! every candidate fails, `NoConvertibleFiles` carries the finalized
//! report so callers can still show per-file reasons.

mod api;
mod assembler;
mod builder;
mod discover;
mod error;
mod extract;
mod reader;
mod report;
mod security;
mod sheetname;
mod types;
mod workarea;

// 公開API
pub use api::TraversalMode;
pub use builder::{Conversion, Converter, ConverterBuilder};
pub use error::CsvToXlsxError;
pub use report::{ConversionReport, FailureEntry, ReportOutcome, ReportState, SheetEntry};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_builder_builds() {
        assert!(ConverterBuilder::new().build().is_ok());
    }
}
