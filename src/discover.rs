//! File Discoverer Module
//!
//! 展開済みの作業領域から候補CSVファイルを選択するモジュール。
//! 走査ポリシーは`TraversalMode`で切り替えられ、どちらのポリシーでも
//! 発見順序は決定的（ファイル名の辞書順）です。

use crate::api::TraversalMode;
use crate::error::CsvToXlsxError;
use crate::types::CandidateFile;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// 作業領域から候補CSVファイルを発見する
///
/// # 引数
///
/// * `root` - 作業領域のルートパス
/// * `mode` - 走査ポリシー
///
/// # 戻り値
///
/// * `Ok(Vec<CandidateFile>)` - 発見順の候補一覧（空にはならない）
/// * `Err(CsvToXlsxError::NoCandidatesFound)` - 候補が1つもない場合
pub(crate) fn discover(
    root: &Path,
    mode: TraversalMode,
) -> Result<Vec<CandidateFile>, CsvToXlsxError> {
    match mode {
        TraversalMode::RecursiveFlat => discover_recursive(root),
        TraversalMode::SingleSubfolder => discover_single_subfolder(root),
    }
}

/// 候補となるファイル名かどうかを判定する
///
/// `.`で始まる隠しファイルを除外し、拡張子`.csv`を
/// 大文字小文字を区別せずに照合します。
fn is_candidate_name(name: &str) -> bool {
    if name.starts_with('.') {
        return false;
    }
    name.to_ascii_lowercase().ends_with(".csv")
}

/// 作業領域全体を再帰的に走査する
///
/// 各ディレクトリ内のエントリをファイル名順に辿るため、
/// 同じアーカイブに対する発見順序は常に同一です。
fn discover_recursive(root: &Path) -> Result<Vec<CandidateFile>, CsvToXlsxError> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_candidate_name(&name) {
            continue;
        }

        let rel_path = entry
            .path()
            .strip_prefix(root)
            .unwrap_or_else(|_| entry.path())
            .to_path_buf();
        candidates.push(CandidateFile { rel_path, name });
    }

    if candidates.is_empty() {
        return Err(CsvToXlsxError::NoCandidatesFound(
            "no CSV files found in archive".to_string(),
        ));
    }

    log::debug!("discovered {} candidate file(s)", candidates.len());
    Ok(candidates)
}

/// 単一のトップレベルフォルダの直下のみを走査する
///
/// 作業領域直下にちょうど1つの（隠しでない）フォルダがあることを要求し、
/// そのフォルダ直下のCSVファイルだけを候補とします。サブフォルダは
/// 走査しません。
fn discover_single_subfolder(root: &Path) -> Result<Vec<CandidateFile>, CsvToXlsxError> {
    let mut folders = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() && !name.starts_with('.') {
            folders.push((name, entry.path()));
        }
    }

    if folders.len() != 1 {
        return Err(CsvToXlsxError::NoCandidatesFound(format!(
            "expected exactly one top-level folder, found {}",
            folders.len()
        )));
    }

    let (folder_name, folder_path) = folders.remove(0);

    let mut names = Vec::new();
    for entry in fs::read_dir(&folder_path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_candidate_name(&name) {
            names.push(name);
        }
    }
    names.sort();

    if names.is_empty() {
        return Err(CsvToXlsxError::NoCandidatesFound(format!(
            "no CSV files found in folder '{}'",
            folder_name
        )));
    }

    log::debug!(
        "discovered {} candidate file(s) in folder '{}'",
        names.len(),
        folder_name
    );
    let candidates = names
        .into_iter()
        .map(|name| CandidateFile {
            rel_path: Path::new(&folder_name).join(&name),
            name,
        })
        .collect();
    Ok(candidates)
}
