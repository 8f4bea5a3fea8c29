//! Tabular Reader Module
//!
//! 1つのCSVファイルを`Table`へパースするモジュール。
//! UTF-8のBOM付きファイルを許容し、行ごとの列数の不一致や不正な引用符は
//! ファイル単位のエラー（`FileRead`）として報告します。このモジュールの
//! エラーはパイプライン全体を停止させません。

use crate::error::CsvToXlsxError;
use crate::types::{CellValue, Table};
use std::fs;
use std::path::Path;

/// UTF-8のバイトオーダーマーク
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// CSVファイルを読み込み、テーブルへパースする
///
/// # 引数
///
/// * `path` - 読み込むファイルの絶対パス
/// * `file_name` - エラー報告に使用する元のファイル名
///
/// # 戻り値
///
/// * `Ok(Table)` - パースに成功した場合
/// * `Err(CsvToXlsxError::FileRead)` - 読み込みまたはパースに失敗した場合
pub(crate) fn read_table(path: &Path, file_name: &str) -> Result<Table, CsvToXlsxError> {
    let bytes = fs::read(path).map_err(|e| file_error(file_name, e.to_string()))?;
    parse_table(&bytes, file_name)
}

/// バイト列をテーブルへパースする
///
/// 先頭にUTF-8のBOMがあれば1つだけ取り除きます。先頭レコードをヘッダー
/// （列名）として扱い、残りをデータ行とします。列名の重複はそのまま
/// 位置を保って通過させます。レコードが1つもない入力（空ファイル、
/// BOMのみのファイル）はエラーです。
pub(crate) fn parse_table(bytes: &[u8], file_name: &str) -> Result<Table, CsvToXlsxError> {
    let body = if bytes.starts_with(&UTF8_BOM) {
        &bytes[UTF8_BOM.len()..]
    } else {
        bytes
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(body);
    let mut records = reader.records();

    let columns: Vec<String> = match records.next() {
        Some(Ok(record)) => record.iter().map(|field| field.to_string()).collect(),
        Some(Err(e)) => return Err(file_error(file_name, e.to_string())),
        None => return Err(file_error(file_name, "file is empty".to_string())),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| file_error(file_name, e.to_string()))?;
        rows.push(record.iter().map(CellValue::from_field).collect());
    }

    Ok(Table { columns, rows })
}

fn file_error(file: &str, cause: String) -> CsvToXlsxError {
    CsvToXlsxError::FileRead {
        file: file.to_string(),
        cause,
    }
}
