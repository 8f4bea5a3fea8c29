//! Workbook Assembler Module
//!
//! パース済みのテーブルを1つのXLSXワークブックへ組み立てるモジュール。
//! 1テーブルにつき1ワークシートを追加し、最後にメモリ上でシリアライズ
//! します。ディスクへの書き込みは行いません。

use crate::error::CsvToXlsxError;
use crate::types::{CellValue, Table};
use rust_xlsxwriter::Workbook;

/// ワークシートの最大行数（ヘッダー行を含む）
pub(crate) const MAX_SHEET_ROWS: usize = 1_048_576;

/// ワークシートの最大列数
pub(crate) const MAX_SHEET_COLS: usize = 16_384;

/// 1セルに格納できる最大文字数
pub(crate) const MAX_CELL_CHARS: usize = 32_767;

/// テーブルを蓄積してワークブックを組み立てる
///
/// ワークシートは`append_table`が呼ばれた順（＝発見順）に並びます。
/// データ行が0件のテーブルでも、ヘッダー行だけのワークシートとして
/// 追加されます。
#[derive(Debug)]
pub(crate) struct WorkbookAssembler {
    workbook: Workbook,
    sheet_count: usize,
}

impl WorkbookAssembler {
    /// 空のワークブックを生成する
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
            sheet_count: 0,
        }
    }

    /// テーブルをワークシートとして追加する
    ///
    /// スプレッドシート形式の上限（行数・列数・セル文字数）の検査は
    /// ワークシートを作成する前に行います。上限を超えるテーブルは
    /// ワークブックに痕跡を残さずエラーになるため、呼び出し側は
    /// そのファイルだけをスキップして処理を継続できます。
    ///
    /// # 引数
    ///
    /// * `sheet_name` - 割り当て済みの一意なシート名（検証済み）
    /// * `table` - 追加するテーブル
    pub fn append_table(
        &mut self,
        sheet_name: &str,
        table: &Table,
    ) -> Result<(), CsvToXlsxError> {
        validate_dimensions(table)?;

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(sheet_name).map_err(workbook_error)?;

        // ヘッダー行（常に文字列）
        for (col, heading) in table.columns.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, heading)
                .map_err(workbook_error)?;
        }

        // データ行
        for (row, cells) in table.rows.iter().enumerate() {
            let row_index = (row + 1) as u32;
            for (col, cell) in cells.iter().enumerate() {
                let col_index = col as u16;
                match cell {
                    CellValue::Number(n) => {
                        worksheet
                            .write_number(row_index, col_index, *n)
                            .map_err(workbook_error)?;
                    }
                    CellValue::Text(s) => {
                        worksheet
                            .write_string(row_index, col_index, s)
                            .map_err(workbook_error)?;
                    }
                }
            }
        }

        self.sheet_count += 1;
        Ok(())
    }

    /// これまでに追加されたワークシート数
    pub fn sheet_count(&self) -> usize {
        self.sheet_count
    }

    /// ワークブックをシリアライズし、XLSXのバイト列を返す
    pub fn finish(mut self) -> Result<Vec<u8>, CsvToXlsxError> {
        self.workbook.save_to_buffer().map_err(workbook_error)
    }
}

/// テーブルがワークシートの上限に収まるかを検査する
fn validate_dimensions(table: &Table) -> Result<(), CsvToXlsxError> {
    // ヘッダー行を含めた行数
    let total_rows = table.row_count() + 1;
    if total_rows > MAX_SHEET_ROWS {
        return Err(CsvToXlsxError::Workbook(format!(
            "table has {} rows including header (max: {})",
            total_rows, MAX_SHEET_ROWS
        )));
    }

    if table.column_count() > MAX_SHEET_COLS {
        return Err(CsvToXlsxError::Workbook(format!(
            "table has {} columns (max: {})",
            table.column_count(),
            MAX_SHEET_COLS
        )));
    }

    for heading in &table.columns {
        check_cell_length(heading)?;
    }
    for row in &table.rows {
        for cell in row {
            if let CellValue::Text(s) = cell {
                check_cell_length(s)?;
            }
        }
    }

    Ok(())
}

fn check_cell_length(text: &str) -> Result<(), CsvToXlsxError> {
    let length = text.chars().count();
    if length > MAX_CELL_CHARS {
        return Err(CsvToXlsxError::Workbook(format!(
            "cell exceeds maximum length: {} characters (max: {})",
            length, MAX_CELL_CHARS
        )));
    }
    Ok(())
}

fn workbook_error(e: rust_xlsxwriter::XlsxError) -> CsvToXlsxError {
    CsvToXlsxError::Workbook(e.to_string())
}
