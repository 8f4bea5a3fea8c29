//! Sheet Name Resolver Module
//!
//! ファイル名から一意なワークシート名を導出するモジュール。
//! スプレッドシート形式の制約（最大31文字、使用禁止文字、実行内での
//! 一意性）を満たすよう、切り詰め・プレースホルダー・数値サフィックスに
//! よる衝突解消を行います。
//!
//! 同じ候補列に対しては常に同じ名前列を生成します（決定的）。

use crate::error::CsvToXlsxError;
use std::collections::HashSet;
use std::path::Path;

/// スプレッドシート形式が許容するシート名の最大文字数
pub(crate) const SHEET_NAME_HARD_MAX: usize = 31;

/// シート名に使用できない文字
const INVALID_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// シート名として有効かどうかを判定する
///
/// 空文字列、使用禁止文字を含む名前、アポストロフィで始まる・終わる名前、
/// および予約名`History`を拒否します。
fn is_valid_sheet_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if name.chars().any(|c| INVALID_SHEET_NAME_CHARS.contains(&c)) {
        return false;
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return false;
    }
    // Excelが予約しているシート名
    if name.eq_ignore_ascii_case("history") {
        return false;
    }
    true
}

/// 文字数で安全に切り詰める（文字境界を壊さない）
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &s[..byte_index],
        None => s,
    }
}

/// 実行スコープのシート名割り当て器
///
/// 1回の変換実行の中で割り当て済みの名前を記憶し、後続のファイルに対して
/// 一意な名前を導出します。一意性の判定は大文字小文字を区別しません
/// （スプレッドシート形式の規則に合わせています）。
#[derive(Debug)]
pub(crate) struct SheetNamer {
    /// 名前の最大文字数（1〜31）
    max_len: usize,

    /// 割り当て済みの名前（小文字化したキー）
    assigned: HashSet<String>,

    /// プレースホルダー`Sheet<n>`の連番
    placeholder_seq: usize,
}

impl SheetNamer {
    /// 新しい割り当て器を生成する
    ///
    /// `max_len`は`ConverterBuilder::build()`で検証済みの値
    /// （1以上`SHEET_NAME_HARD_MAX`以下）を想定します。
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len,
            assigned: HashSet::new(),
            placeholder_seq: 0,
        }
    }

    /// ファイル名からシート名を導出して割り当てる
    ///
    /// # 処理順序
    ///
    /// 1. 拡張子を除いたベース名を`max_len`文字に切り詰める
    /// 2. 切り詰め後の名前が無効（空、禁止文字、予約名など）なら
    ///    プレースホルダー`Sheet<n>`を割り当てる
    /// 3. 割り当て済みの名前と衝突する場合は、数値サフィックス
    ///    `_2`, `_3`, …を付与する。上限を超えないよう、ベース名側を
    ///    さらに切り詰める
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 割り当てられた一意な名前
    /// * `Err(CsvToXlsxError::SheetNameExhausted)` - サフィックスだけで
    ///   `max_len`を使い切り、一意な名前を構成できない場合
    pub fn assign(&mut self, file_name: &str) -> Result<String, CsvToXlsxError> {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let seed = truncate_chars(stem, self.max_len);

        if !is_valid_sheet_name(seed) {
            return self.assign_placeholder(file_name);
        }

        if self.try_claim(seed) {
            return Ok(seed.to_string());
        }

        // 数値サフィックスによる衝突解消
        let mut n = 2usize;
        loop {
            let suffix = format!("_{}", n);
            let suffix_len = suffix.chars().count();
            if suffix_len >= self.max_len {
                return Err(CsvToXlsxError::SheetNameExhausted {
                    file: file_name.to_string(),
                });
            }

            let stem_len = self.max_len - suffix_len;
            let candidate = format!("{}{}", truncate_chars(seed, stem_len), suffix);
            if self.try_claim(&candidate) {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// プレースホルダー`Sheet<n>`を割り当てる
    fn assign_placeholder(&mut self, file_name: &str) -> Result<String, CsvToXlsxError> {
        loop {
            self.placeholder_seq += 1;
            let candidate = format!("Sheet{}", self.placeholder_seq);
            if candidate.chars().count() > self.max_len {
                return Err(CsvToXlsxError::SheetNameExhausted {
                    file: file_name.to_string(),
                });
            }
            if self.try_claim(&candidate) {
                return Ok(candidate);
            }
        }
    }

    /// 名前を予約する（大文字小文字を区別しない）
    fn try_claim(&mut self, name: &str) -> bool {
        self.assigned.insert(name.to_lowercase())
    }
}
