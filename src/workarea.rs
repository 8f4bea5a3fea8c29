//! Work Area Module
//!
//! 変換実行ごとに確保される一時作業領域を管理するモジュール。
//! 作業領域は`tempfile`による一意な名前のディレクトリで、所有する実行のみが
//! 使用し、あらゆる終了経路（成功、エラー、panic）でRAIIにより削除されます。

use crate::error::CsvToXlsxError;
use std::path::Path;
use tempfile::TempDir;

/// 実行スコープの一時作業領域
///
/// 1回の変換実行がアーカイブを展開するための専用ディレクトリです。
/// 固定パスではなく毎回一意な名前で作成されるため、並行して走る複数の
/// 変換実行が互いの展開結果を壊すことはありません。
///
/// `Drop`でディレクトリごと削除されるため、呼び出し側が明示的に
/// 後始末をする必要はありません。
#[derive(Debug)]
pub(crate) struct WorkArea {
    dir: TempDir,
}

impl WorkArea {
    /// 新しい作業領域を作成する
    ///
    /// システムの一時ディレクトリ配下に`csvbook-`プレフィックス付きの
    /// 一意なディレクトリを作成します。
    pub fn create() -> Result<Self, CsvToXlsxError> {
        let dir = tempfile::Builder::new().prefix("csvbook-").tempdir()?;
        Ok(Self { dir })
    }

    /// 作業領域のルートパス
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
