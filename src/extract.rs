//! Archive Extractor Module
//!
//! 入力バイト列をZIPアーカイブとして検証し、作業領域へ安全に展開する
//! モジュール。作業領域の外を指す不正なエントリは実行を止めずにスキップし、
//! 警告としてレポートに記録します。

use crate::error::CsvToXlsxError;
use crate::report::ConversionReport;
use crate::security::{validate_entry_path, SecurityConfig};
use std::fs;
use std::io::{self, Cursor};
use std::path::Path;
use zip::ZipArchive;

/// アーカイブを検証し、作業領域へ展開する
///
/// # 引数
///
/// * `bytes` - ZIPアーカイブと推定される入力バイト列
/// * `dest` - 展開先（作業領域のルート）
/// * `security` - 展開時のセキュリティ制限
/// * `report` - スキップされたエントリの警告を記録するレポート
///
/// # 戻り値
///
/// * `Ok(())` - 展開が完了した場合（スキップされたエントリがあっても成功）
/// * `Err(CsvToXlsxError::InvalidArchive)` - ZIPコンテナとして開けない場合
/// * `Err(CsvToXlsxError::SecurityViolation)` - 展開制限に違反した場合
/// * `Err(CsvToXlsxError::Io)` - 展開先への書き込みに失敗した場合
///
/// # 処理フロー
///
/// 1. ZIPコンテナを開く（失敗は`InvalidArchive`）
/// 2. エントリ数と宣言サイズの上限を検査（書き込み開始前）
/// 3. 各エントリを展開。エントリ名の検証または`enclosed_name`の解決に
///    失敗したエントリはスキップし、レポートに警告を記録
pub(crate) fn extract_archive(
    bytes: &[u8],
    dest: &Path,
    security: &SecurityConfig,
    report: &mut ConversionReport,
) -> Result<(), CsvToXlsxError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| CsvToXlsxError::InvalidArchive(e.to_string()))?;

    enforce_limits(&mut archive, security)?;

    let mut extracted = 0usize;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| CsvToXlsxError::InvalidArchive(e.to_string()))?;
        let raw_name = entry.name().to_string();

        if let Err(reason) = validate_entry_path(&raw_name) {
            log::warn!("skipping archive entry '{}': {}", raw_name, reason);
            report.record_anomaly(format!(
                "skipped archive entry '{}': {}",
                raw_name, reason
            ));
            continue;
        }

        let rel_path = match entry.enclosed_name() {
            Some(path) => path.to_owned(),
            None => {
                log::warn!(
                    "skipping archive entry '{}': resolves outside the work area",
                    raw_name
                );
                report.record_anomaly(format!(
                    "skipped archive entry '{}': resolves outside the work area",
                    raw_name
                ));
                continue;
            }
        };

        let out_path = dest.join(rel_path);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                if !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            let mut out_file = fs::File::create(&out_path)?;
            io::copy(&mut entry, &mut out_file)?;
            extracted += 1;
        }
    }

    log::debug!("extracted {} file(s) into {}", extracted, dest.display());
    Ok(())
}

/// エントリ数と宣言された展開サイズの上限を検査する
///
/// 書き込みを始める前に、セントラルディレクトリの情報だけで検査します。
fn enforce_limits(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    security: &SecurityConfig,
) -> Result<(), CsvToXlsxError> {
    if archive.len() > security.max_entry_count {
        return Err(CsvToXlsxError::SecurityViolation(format!(
            "Archive entry count exceeds maximum: {} (max: {})",
            archive.len(),
            security.max_entry_count
        )));
    }

    let mut total: u64 = 0;
    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .map_err(|e| CsvToXlsxError::InvalidArchive(e.to_string()))?;
        let size = entry.size();

        if size > security.max_entry_size {
            return Err(CsvToXlsxError::SecurityViolation(format!(
                "Archive entry '{}' exceeds maximum size: {} bytes (max: {} bytes)",
                entry.name(),
                size,
                security.max_entry_size
            )));
        }

        total = total.saturating_add(size);
        if total > security.max_decompressed_size {
            return Err(CsvToXlsxError::SecurityViolation(format!(
                "Total decompressed size exceeds maximum: {} bytes (max: {} bytes)",
                total, security.max_decompressed_size
            )));
        }
    }

    Ok(())
}
