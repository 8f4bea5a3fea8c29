//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use std::path::PathBuf;

/// セルの値を表す列挙型
///
/// CSVのフィールドは、全体が有限の`f64`として解釈できる場合のみ数値として
/// 扱われ、それ以外は文字列のまま保持されます。ヘッダー行のセルは常に
/// 文字列です。
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    Text(String),
}

impl CellValue {
    /// CSVフィールドからセル値を導出する
    ///
    /// フィールド全体が有限の数値としてパースできる場合は`Number`、
    /// それ以外（空文字列、前後の空白付き、`inf`/`NaN`を含む）は
    /// `Text`になります。
    pub fn from_field(field: &str) -> Self {
        match field.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(field.to_string()),
        }
    }
}

/// 発見された候補CSVファイル
///
/// `rel_path`は作業領域ルートからの相対パス、`name`は元のファイル名
/// （ベース名）です。シート名の導出とレポートへの記録には`name`を使用します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CandidateFile {
    /// 作業領域ルートからの相対パス
    pub rel_path: PathBuf,

    /// 元のファイル名（例: `data.csv`）
    pub name: String,
}

/// 1つのCSVファイルをパースした結果のテーブル
///
/// 先頭行がヘッダー（列名）、残りがデータ行です。列名の重複は許容され、
/// 位置をそのまま保って保持されます。
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Table {
    /// 列名（先頭行、順序保持、重複許容）
    pub columns: Vec<String>,

    /// データ行（ヘッダーを除く）
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// データ行数（ヘッダーを除く）
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列数
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_from_numeric_field() {
        assert_eq!(CellValue::from_field("42"), CellValue::Number(42.0));
        assert_eq!(CellValue::from_field("-3.5"), CellValue::Number(-3.5));
        assert_eq!(CellValue::from_field("1e3"), CellValue::Number(1000.0));
    }

    #[test]
    fn test_cell_value_from_text_field() {
        assert_eq!(
            CellValue::from_field("hello"),
            CellValue::Text("hello".to_string())
        );
        assert_eq!(CellValue::from_field(""), CellValue::Text(String::new()));
        // 前後に空白があるフィールドは数値として扱わない
        assert_eq!(
            CellValue::from_field(" 42"),
            CellValue::Text(" 42".to_string())
        );
    }

    #[test]
    fn test_cell_value_non_finite_is_text() {
        assert_eq!(
            CellValue::from_field("inf"),
            CellValue::Text("inf".to_string())
        );
        assert_eq!(
            CellValue::from_field("NaN"),
            CellValue::Text("NaN".to_string())
        );
    }

    #[test]
    fn test_table_counts() {
        let table = Table {
            columns: vec!["a".to_string(), "b".to_string()],
            rows: vec![
                vec![
                    CellValue::Number(1.0),
                    CellValue::Text("x".to_string()),
                ],
            ],
        };

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_table_with_duplicate_columns() {
        let table = Table {
            columns: vec!["id".to_string(), "id".to_string()],
            rows: Vec::new(),
        };

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.columns[0], table.columns[1]);
    }
}
