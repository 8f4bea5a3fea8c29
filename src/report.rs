//! Conversion Report Module
//!
//! 変換実行の結果を集約する`ConversionReport`を定義するモジュール。
//! レポートは明示的な状態機械（`Empty → Collecting → Finalized`）として
//! モデル化され、ファイル単位の成否が型として観測可能になります。

use serde::Serialize;

/// レポートの状態
///
/// 状態遷移は一方向のみで、パイプラインの進行によってのみ駆動されます。
///
/// - `Empty`: 候補ファイルの処理が始まる前
/// - `Collecting`: 候補列が確定し、ファイル単位の結果を集計中
/// - `Finalized`: すべての候補を処理し終え、結果が確定した状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportState {
    /// 候補ファイルの処理前
    Empty,

    /// ファイル単位の結果を集計中
    Collecting,

    /// 結果確定済み
    Finalized(ReportOutcome),
}

/// 確定した実行結果の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportOutcome {
    /// すべての候補ファイルの変換に成功
    Success,

    /// 一部の候補ファイルのみ変換に成功
    PartialSuccess,

    /// すべての候補ファイルの変換に失敗（成果物なし）
    Failure,
}

/// 変換に成功したファイルの記録
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetEntry {
    /// 変換元のファイル名
    pub file: String,

    /// 割り当てられたワークシート名
    pub sheet: String,
}

/// 変換に失敗したファイルの記録
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEntry {
    /// 変換元のファイル名
    pub file: String,

    /// 失敗理由（人間可読のメッセージ）
    pub reason: String,
}

/// 1回の変換実行の集約結果
///
/// 候補ファイルの総数、成功・失敗の一覧（処理順）、展開中に記録された
/// 警告（スキップされた不正なアーカイブエントリなど）、および現在の状態を
/// 保持します。部分成功の場合でも、どのファイルがなぜ失敗したかを
/// 呼び出し側が正確に把握できます。
///
/// レポートへの記録操作はクレート内部に限定されており、外部からは
/// 読み取り専用です。`serde::Serialize`を実装しているため、
/// JSONとしてそのまま出力できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use csvbook::ConverterBuilder;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let converter = ConverterBuilder::new().build()?;
/// # let archive_bytes: Vec<u8> = vec![];
/// let conversion = converter.convert(&archive_bytes)?;
///
/// let report = &conversion.report;
/// println!(
///     "{} of {} files converted",
///     report.successes().len(),
///     report.total_candidates()
/// );
/// for failure in report.failures() {
///     eprintln!("warning: {}: {}", failure.file, failure.reason);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    /// 発見された候補ファイルの総数
    total_candidates: usize,

    /// 成功したファイルの記録（処理順）
    successes: Vec<SheetEntry>,

    /// 失敗したファイルの記録（処理順）
    failures: Vec<FailureEntry>,

    /// 実行中に記録された警告（致命的でない異常）
    anomalies: Vec<String>,

    /// 現在の状態
    state: ReportState,
}

impl ConversionReport {
    /// 空のレポートを生成する（状態: `Empty`）
    pub(crate) fn new() -> Self {
        Self {
            total_candidates: 0,
            successes: Vec::new(),
            failures: Vec::new(),
            anomalies: Vec::new(),
            state: ReportState::Empty,
        }
    }

    /// 候補列の確定を記録し、`Collecting`状態へ遷移する
    pub(crate) fn begin_collecting(&mut self, total: usize) {
        self.total_candidates = total;
        self.state = ReportState::Collecting;
    }

    /// 1ファイルの変換成功を記録する
    pub(crate) fn record_success(&mut self, file: String, sheet: String) {
        self.successes.push(SheetEntry { file, sheet });
    }

    /// 1ファイルの変換失敗を記録する
    pub(crate) fn record_failure(&mut self, file: String, reason: String) {
        self.failures.push(FailureEntry { file, reason });
    }

    /// 致命的でない異常（スキップされたエントリなど）を記録する
    ///
    /// 異常の記録は状態を遷移させません。展開中（`Empty`状態）にも
    /// 記録されることがあります。
    pub(crate) fn record_anomaly(&mut self, note: String) {
        self.anomalies.push(note);
    }

    /// 結果を確定し、`Finalized`状態へ遷移する
    ///
    /// 成功・失敗の集計から結果分類を導出します。確定後のレポートに
    /// 対して再度呼び出しても状態は変化しません。
    pub(crate) fn finalize(&mut self) {
        if matches!(self.state, ReportState::Finalized(_)) {
            return;
        }
        let outcome = if self.successes.is_empty() {
            ReportOutcome::Failure
        } else if self.failures.is_empty() {
            ReportOutcome::Success
        } else {
            ReportOutcome::PartialSuccess
        };
        self.state = ReportState::Finalized(outcome);
    }

    /// 発見された候補ファイルの総数
    pub fn total_candidates(&self) -> usize {
        self.total_candidates
    }

    /// 成功したファイルの記録（処理順）
    pub fn successes(&self) -> &[SheetEntry] {
        &self.successes
    }

    /// 失敗したファイルの記録（処理順）
    pub fn failures(&self) -> &[FailureEntry] {
        &self.failures
    }

    /// 実行中に記録された警告の一覧
    pub fn anomalies(&self) -> &[String] {
        &self.anomalies
    }

    /// 現在の状態
    pub fn state(&self) -> ReportState {
        self.state
    }

    /// 確定済みの場合、その結果分類
    pub fn outcome(&self) -> Option<ReportOutcome> {
        match self.state {
            ReportState::Finalized(outcome) => Some(outcome),
            _ => None,
        }
    }
}
