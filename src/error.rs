//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use crate::report::ConversionReport;
use thiserror::Error;

/// csvbookクレート全体で使用するエラー型
///
/// このエラー型は、ZIPアーカイブの展開、CSVファイルの解析、ワークブックの
/// 組み立て処理中に発生するすべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの分類
///
/// 変換パイプラインはエラーを2つのクラスに分けて扱います。
///
/// - **実行全体を停止するエラー（terminal）**: `Io`、`InvalidArchive`、
///   `NoCandidatesFound`、`NoConvertibleFiles`、`Config`、`SecurityViolation`、
///   およびワークブックのシリアライズ段階の`Workbook`
/// - **ファイル単位で隔離されるエラー（per-file）**: `FileRead`、
///   `SheetNameExhausted`。これらは`ConversionReport`に記録され、
///   残りのファイルの処理は継続されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use csvbook::CsvToXlsxError;
/// use std::fs;
///
/// fn load_archive(path: &str) -> Result<Vec<u8>, CsvToXlsxError> {
///     let bytes = fs::read(path)?;  // Ioエラーが自動的に変換される
///     Ok(bytes)
/// }
/// ```
#[derive(Error, Debug)]
pub enum CsvToXlsxError {
    /// I/O操作中に発生したエラー
    ///
    /// 作業領域の作成失敗、展開先への書き込み失敗など、標準ライブラリの
    /// `std::io::Error`が発生した場合に使用されます。
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIPアーカイブとして解釈できない入力のエラー
    ///
    /// 入力バイト列がZIPコンテナとして開けない場合に発生します。
    /// このエラーが返された時点では、候補ファイルは一切処理されていません。
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    /// 候補CSVファイルが1つも見つからなかったエラー
    ///
    /// アーカイブ自体は正常に展開されたものの、走査ポリシーに合致する
    /// CSVファイルが存在しなかった場合に発生します。`InvalidArchive`とは
    /// 区別され、メッセージに走査ポリシー固有の詳細が含まれます。
    #[error("No candidate CSV files found: {0}")]
    NoCandidatesFound(String),

    /// 単一ファイルの読み込み・解析に失敗したエラー
    ///
    /// CSVの引用符の不整合、行ごとの列数の不一致、不正なUTF-8、
    /// ファイル単位のI/O失敗などが原因となります。このエラーは
    /// パイプラインを停止させず、`ConversionReport`の失敗一覧に
    /// 記録された上で残りのファイルの処理が継続されます。
    #[error("Failed to read file '{file}': {cause}")]
    FileRead {
        /// 失敗したファイルの元のファイル名
        file: String,
        /// 失敗の詳細メッセージ
        cause: String,
    },

    /// 一意なシート名を導出できなかったエラー
    ///
    /// 設定されたシート名の最大長が小さく、衝突回避のための数値サフィックスを
    /// 付与する余地がない場合に発生します。`FileRead`と同様にファイル単位で
    /// 隔離され、該当ファイルのみがスキップされます。
    #[error("Cannot derive a unique sheet name for '{file}'")]
    SheetNameExhausted {
        /// 失敗したファイルの元のファイル名
        file: String,
    },

    /// すべての候補ファイルの変換に失敗したエラー
    ///
    /// 候補ファイルは存在したものの、1つも変換できなかった場合に発生します。
    /// 成果物（ワークブック）は生成されませんが、診断のために確定済みの
    /// `ConversionReport`がエラー値の中に保持されます。
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use csvbook::{ConverterBuilder, CsvToXlsxError};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let converter = ConverterBuilder::new().build()?;
    /// # let archive_bytes: Vec<u8> = vec![];
    /// match converter.convert(&archive_bytes) {
    ///     Err(CsvToXlsxError::NoConvertibleFiles { report }) => {
    ///         for failure in report.failures() {
    ///             eprintln!("{}: {}", failure.file, failure.reason);
    ///         }
    ///     }
    ///     _ => {}
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[error("No convertible files: all {} candidate(s) failed", .report.total_candidates())]
    NoConvertibleFiles {
        /// 確定済みの変換レポート（失敗理由の一覧を含む）
        report: ConversionReport,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、シート名の最大長が0や、スプレッドシート
    /// 形式の上限である31を超える場合などです。
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// ZIP bomb攻撃への対策として設けられたエントリ数・展開サイズの
    /// 制限に違反した場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// ワークブックの構築・シリアライズに失敗したエラー
    ///
    /// XLSXライターがワークシートの書き込みや最終的なシリアライズに
    /// 失敗した場合に発生します。単一テーブルの追加で発生した場合は
    /// ファイル単位で隔離され、最終シリアライズで発生した場合は
    /// 実行全体が停止します。
    #[error("Failed to build workbook: {0}")]
    Workbook(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    // Ioエラーのテスト
    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: CsvToXlsxError = io_err.into();

        match error {
            CsvToXlsxError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let error: CsvToXlsxError = io_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("Permission denied"));
    }

    // InvalidArchiveエラーのテスト
    #[test]
    fn test_invalid_archive_error_display() {
        let error = CsvToXlsxError::InvalidArchive("invalid Zip archive".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.contains("Invalid archive"));
        assert!(error_msg.contains("invalid Zip archive"));
    }

    // NoCandidatesFoundエラーのテスト
    #[test]
    fn test_no_candidates_found_error_display() {
        let error =
            CsvToXlsxError::NoCandidatesFound("no CSV files found in archive".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.contains("No candidate CSV files found"));
        assert!(error_msg.contains("no CSV files found in archive"));
    }

    // FileReadエラーのテスト
    #[test]
    fn test_file_read_error() {
        let error = CsvToXlsxError::FileRead {
            file: "data.csv".to_string(),
            cause: "unequal lengths".to_string(),
        };

        match error {
            CsvToXlsxError::FileRead { file, cause } => {
                assert_eq!(file, "data.csv");
                assert_eq!(cause, "unequal lengths");
            }
            _ => panic!("Expected FileRead error"),
        }
    }

    #[test]
    fn test_file_read_error_display() {
        let error = CsvToXlsxError::FileRead {
            file: "broken.csv".to_string(),
            cause: "invalid UTF-8".to_string(),
        };

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to read file"));
        assert!(error_msg.contains("broken.csv"));
        assert!(error_msg.contains("invalid UTF-8"));
    }

    // SheetNameExhaustedエラーのテスト
    #[test]
    fn test_sheet_name_exhausted_error_display() {
        let error = CsvToXlsxError::SheetNameExhausted {
            file: "report.csv".to_string(),
        };

        let error_msg = error.to_string();
        assert!(error_msg.contains("unique sheet name"));
        assert!(error_msg.contains("report.csv"));
    }

    // NoConvertibleFilesエラーのテスト
    #[test]
    fn test_no_convertible_files_error_carries_report() {
        let mut report = ConversionReport::new();
        report.begin_collecting(2);
        report.record_failure("a.csv".to_string(), "bad quoting".to_string());
        report.record_failure("b.csv".to_string(), "empty file".to_string());
        report.finalize();

        let error = CsvToXlsxError::NoConvertibleFiles { report };
        let error_msg = error.to_string();
        assert!(error_msg.contains("No convertible files"));
        assert!(error_msg.contains('2'));

        match error {
            CsvToXlsxError::NoConvertibleFiles { report } => {
                assert_eq!(report.failures().len(), 2);
                assert_eq!(report.failures()[0].file, "a.csv");
            }
            _ => panic!("Expected NoConvertibleFiles error"),
        }
    }

    // Configエラーのテスト
    #[test]
    fn test_config_error() {
        let error = CsvToXlsxError::Config("Invalid sheet name max length: 0".to_string());

        match error {
            CsvToXlsxError::Config(msg) => {
                assert_eq!(msg, "Invalid sheet name max length: 0");
            }
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_config_error_display() {
        let error = CsvToXlsxError::Config("Invalid sheet name max length: 32".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.contains("Configuration error"));
        assert!(error_msg.contains("32"));
    }

    // SecurityViolationエラーのテスト
    #[test]
    fn test_security_violation_error_display() {
        let error = CsvToXlsxError::SecurityViolation(
            "Archive entry count exceeds maximum".to_string(),
        );

        let error_msg = error.to_string();
        assert!(error_msg.contains("Security violation"));
        assert!(error_msg.contains("entry count"));
    }

    // Workbookエラーのテスト
    #[test]
    fn test_workbook_error_display() {
        let error = CsvToXlsxError::Workbook("string exceeds Excel limit".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.contains("Failed to build workbook"));
        assert!(error_msg.contains("string exceeds Excel limit"));
    }

    // エラー変換のテスト（?演算子の動作確認）
    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), CsvToXlsxError> {
            let _file = std::fs::File::open("nonexistent_archive.zip")?;
            Ok(())
        }

        let result = io_operation();
        assert!(result.is_err());

        match result {
            Err(CsvToXlsxError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    // エラーメッセージのフォーマット確認
    #[test]
    fn test_all_error_formats() {
        // Io
        let io_err: CsvToXlsxError = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        // InvalidArchive
        let archive_err = CsvToXlsxError::InvalidArchive("test archive".to_string());
        assert!(archive_err.to_string().starts_with("Invalid archive"));

        // NoCandidatesFound
        let candidates_err = CsvToXlsxError::NoCandidatesFound("test empty".to_string());
        assert!(candidates_err
            .to_string()
            .starts_with("No candidate CSV files found"));

        // FileRead
        let read_err = CsvToXlsxError::FileRead {
            file: "x.csv".to_string(),
            cause: "test cause".to_string(),
        };
        assert!(read_err.to_string().starts_with("Failed to read file"));

        // Config
        let config_err = CsvToXlsxError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));

        // SecurityViolation
        let security_err = CsvToXlsxError::SecurityViolation("test security".to_string());
        assert!(security_err.to_string().starts_with("Security violation"));

        // Workbook
        let workbook_err = CsvToXlsxError::Workbook("test workbook".to_string());
        assert!(workbook_err
            .to_string()
            .starts_with("Failed to build workbook"));
    }
}
