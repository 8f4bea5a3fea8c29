//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use crate::api::TraversalMode;
use crate::assembler::WorkbookAssembler;
use crate::error::CsvToXlsxError;
use crate::report::ConversionReport;
use crate::security::SecurityConfig;
use crate::sheetname::{SheetNamer, SHEET_NAME_HARD_MAX};
use crate::types::CandidateFile;
use crate::workarea::WorkArea;
use crate::{discover, extract, reader};
use std::io::Read;
use std::path::Path;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// 候補ファイルの走査ポリシー
    pub traversal_mode: TraversalMode,

    /// シート名の最大文字数（1〜31）
    pub sheet_name_max_len: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            traversal_mode: TraversalMode::RecursiveFlat,
            sheet_name_max_len: SHEET_NAME_HARD_MAX,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみを
/// オーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use csvbook::{ConverterBuilder, TraversalMode};
///
/// # fn main() -> Result<(), csvbook::CsvToXlsxError> {
/// let converter = ConverterBuilder::new()
///     .with_traversal_mode(TraversalMode::SingleSubfolder)
///     .with_sheet_name_max_len(20)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 走査ポリシー: 作業領域全体の再帰走査（`TraversalMode::RecursiveFlat`）
    /// - シート名の最大文字数: 31（スプレッドシート形式の上限）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use csvbook::ConverterBuilder;
    ///
    /// let builder = ConverterBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 候補ファイルの走査ポリシーを指定する
    ///
    /// # 引数
    ///
    /// * `mode: TraversalMode`: 走査ポリシー
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use csvbook::{ConverterBuilder, TraversalMode};
    ///
    /// // アーカイブ全体を再帰的に走査（デフォルト）
    /// let builder = ConverterBuilder::new()
    ///     .with_traversal_mode(TraversalMode::RecursiveFlat);
    ///
    /// // 単一のトップレベルフォルダ構成のみを受け付ける
    /// let builder = ConverterBuilder::new()
    ///     .with_traversal_mode(TraversalMode::SingleSubfolder);
    /// ```
    pub fn with_traversal_mode(mut self, mode: TraversalMode) -> Self {
        self.config.traversal_mode = mode;
        self
    }

    /// シート名の最大文字数を指定する
    ///
    /// スプレッドシート形式の上限である31を超える値は`build()`で
    /// 拒否されます。短い値を指定すると、長いファイル名はより積極的に
    /// 切り詰められます。
    ///
    /// # 引数
    ///
    /// * `max_len: usize`: 最大文字数（1〜31）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use csvbook::ConverterBuilder;
    ///
    /// let builder = ConverterBuilder::new().with_sheet_name_max_len(15);
    /// ```
    pub fn with_sheet_name_max_len(mut self, max_len: usize) -> Self {
        self.config.sheet_name_max_len = max_len;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Converter)`: 設定が有効な場合、Converterインスタンス
    /// * `Err(CsvToXlsxError::Config)`: 設定が無効な場合
    ///
    /// # 発生し得るエラー
    ///
    /// * `CsvToXlsxError::Config(String)`: シート名の最大文字数が0、
    ///   または31を超えている場合
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use csvbook::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), csvbook::CsvToXlsxError> {
    /// let converter = ConverterBuilder::new()
    ///     .with_sheet_name_max_len(31)
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Converter, CsvToXlsxError> {
        if self.config.sheet_name_max_len == 0 {
            return Err(CsvToXlsxError::Config(
                "Invalid sheet name max length: 0 (must be at least 1)".to_string(),
            ));
        }

        if self.config.sheet_name_max_len > SHEET_NAME_HARD_MAX {
            return Err(CsvToXlsxError::Config(format!(
                "Invalid sheet name max length: {} (must be at most {})",
                self.config.sheet_name_max_len, SHEET_NAME_HARD_MAX
            )));
        }

        Ok(Converter::new(self.config))
    }
}

/// 1回の変換実行の結果
///
/// 成果物（XLSXのバイト列）と、ファイル単位の成否を記録した
/// 確定済みレポートの組です。
#[derive(Debug)]
pub struct Conversion {
    /// シリアライズされたXLSXワークブック
    pub artifact: Vec<u8>,

    /// 確定済みの変換レポート
    pub report: ConversionReport,
}

/// 変換処理のファサード
///
/// CSVファイルの一括アーカイブ（ZIP）を1つのExcelワークブックへ変換する
/// メインエントリーポイントです。`ConverterBuilder`を使用して構築された
/// 設定に基づいて変換処理を実行します。
///
/// 1回の`convert`呼び出しが1回の実行で、実行ごとに専用の一時作業領域を
/// 確保し、終了時に必ず削除します。`Converter`自体は実行間で状態を
/// 持たないため、同じインスタンスを繰り返し・並行に使用できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use csvbook::ConverterBuilder;
/// use std::fs;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let converter = ConverterBuilder::new().build()?;
/// let archive = fs::read("batch.zip")?;
/// let conversion = converter.convert(&archive)?;
/// fs::write("workbook.xlsx", &conversion.artifact)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// 展開時のセキュリティ制限
    security: SecurityConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            config,
            security: SecurityConfig::default(),
        }
    }

    /// アーカイブのバイト列を1つのXLSXワークブックへ変換する
    ///
    /// # 引数
    ///
    /// * `archive` - ZIPアーカイブと推定されるバイト列
    ///
    /// # 戻り値
    ///
    /// * `Ok(Conversion)` - 1件以上のファイルが変換できた場合。
    ///   `artifact`がワークブックのバイト列、`report`がファイル単位の
    ///   成否を記録した確定済みレポート
    /// * `Err(CsvToXlsxError)` - 実行全体が失敗した場合
    ///
    /// # 発生し得るエラー
    ///
    /// * `InvalidArchive`: 入力がZIPコンテナとして開けない
    /// * `SecurityViolation`: 展開制限（エントリ数・サイズ）に違反した
    /// * `NoCandidatesFound`: 候補CSVファイルが1つもない
    /// * `NoConvertibleFiles`: 候補はあったが1つも変換できなかった
    ///   （確定済みレポートをエラー値が保持する）
    /// * `Io` / `Workbook`: 作業領域の操作や最終シリアライズに失敗した
    ///
    /// 単一ファイルの失敗（`FileRead`、`SheetNameExhausted`に相当する
    /// 状況）はエラーとして返されず、レポートの失敗一覧に記録されて
    /// 処理が継続されます。
    ///
    /// # 処理フロー
    ///
    /// 1. 作業領域の確保（あらゆる終了経路で削除される）
    /// 2. アーカイブの検証と展開
    /// 3. 候補ファイルの発見（発見順がシート順になる）
    /// 4. ファイルごとに: パース → シート名導出 → ワークシート追加。
    ///    失敗はそのファイルだけに隔離される
    /// 5. レポートの確定
    /// 6. ワークブックのシリアライズ
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use csvbook::ConverterBuilder;
    /// use std::fs;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let archive = fs::read("batch.zip")?;
    ///
    /// let conversion = converter.convert(&archive)?;
    /// for failure in conversion.report.failures() {
    ///     eprintln!("warning: {}: {}", failure.file, failure.reason);
    /// }
    /// fs::write("workbook.xlsx", &conversion.artifact)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert(&self, archive: &[u8]) -> Result<Conversion, CsvToXlsxError> {
        let mut report = ConversionReport::new();

        // 1. 実行専用の作業領域（RAIIで必ず削除される）
        let workarea = WorkArea::create()?;

        // 2. アーカイブの検証と展開
        extract::extract_archive(archive, workarea.path(), &self.security, &mut report)?;

        // 3. 候補ファイルの発見
        let candidates = discover::discover(workarea.path(), self.config.traversal_mode)?;
        report.begin_collecting(candidates.len());

        // 4. ファイルごとの変換
        let mut namer = SheetNamer::new(self.config.sheet_name_max_len);
        let mut assembler = WorkbookAssembler::new();
        for candidate in &candidates {
            match convert_candidate(workarea.path(), candidate, &mut namer, &mut assembler) {
                Ok(sheet_name) => {
                    log::debug!(
                        "converted '{}' into sheet '{}'",
                        candidate.name,
                        sheet_name
                    );
                    report.record_success(candidate.name.clone(), sheet_name);
                }
                Err(error) => {
                    log::warn!("failed to convert '{}': {}", candidate.name, error);
                    report.record_failure(candidate.name.clone(), error.to_string());
                }
            }
        }

        // 5. 候補列を処理し終えたのでレポートを確定する
        report.finalize();

        // ワークシートが0枚のワークブックは返さない
        if assembler.sheet_count() == 0 {
            return Err(CsvToXlsxError::NoConvertibleFiles { report });
        }

        // 6. シリアライズ
        let artifact = assembler.finish()?;
        Ok(Conversion { artifact, report })
    }

    /// リーダーからアーカイブを読み込んで変換する
    ///
    /// 入力全体をメモリへ読み込んだ上で`convert`へ委譲します。
    ///
    /// # 引数
    ///
    /// * `input` - アーカイブを読み込むためのリーダー（Readトレイトを実装）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use csvbook::ConverterBuilder;
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let input = File::open("batch.zip")?;
    /// let conversion = converter.convert_reader(input)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_reader<R: Read>(&self, mut input: R) -> Result<Conversion, CsvToXlsxError> {
        let mut buffer = Vec::new();
        input.read_to_end(&mut buffer)?;
        self.convert(&buffer)
    }
}

/// 1つの候補ファイルを変換し、割り当てられたシート名を返す
///
/// ここから返るエラーは呼び出し側でそのファイルの失敗として記録され、
/// 残りの候補の処理は継続されます。
fn convert_candidate(
    root: &Path,
    candidate: &CandidateFile,
    namer: &mut SheetNamer,
    assembler: &mut WorkbookAssembler,
) -> Result<String, CsvToXlsxError> {
    let table = reader::read_table(&root.join(&candidate.rel_path), &candidate.name)?;
    let sheet_name = namer.assign(&candidate.name)?;
    assembler.append_table(&sheet_name, &table)?;
    Ok(sheet_name)
}
