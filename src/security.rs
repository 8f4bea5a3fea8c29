//! Security Module
//!
//! セキュリティ対策を実装するモジュール。
//! ZIP bomb攻撃、パストラバーサル攻撃などへの対策を提供します。

/// セキュリティ設定
///
/// アーカイブ展開時のセキュリティ制限を定義します。
/// 入力アーカイブそのもののサイズには固有の上限を設けません
/// （必要なら呼び出し側が課します）。制限の対象は展開側です。
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 展開後の合計最大サイズ（バイト）
    /// デフォルト: 1GB (1_073_741_824 bytes)
    pub max_decompressed_size: u64,
    /// ZIPアーカイブ内の最大エントリ数
    /// デフォルト: 10000
    pub max_entry_count: usize,
    /// 単一エントリの展開後最大サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_entry_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_decompressed_size: 1_073_741_824, // 1GB
            max_entry_count: 10_000,
            max_entry_size: 104_857_600, // 100MB
        }
    }
}

/// アーカイブエントリ名の検証
///
/// パストラバーサル攻撃を防ぐため、エントリ名を検証します。
/// 検証に失敗したエントリは致命的エラーにはならず、スキップされて
/// レポートに警告として記録されます。
///
/// # 引数
///
/// * `path` - 検証するエントリ名（アーカイブ内の相対パス）
///
/// # 戻り値
///
/// * `Ok(())` - パスが安全な場合
/// * `Err(String)` - パスが危険な場合（`..`や絶対パスを含む）
pub(crate) fn validate_entry_path(path: &str) -> Result<(), String> {
    // 空のパスは拒否
    if path.is_empty() {
        return Err("Empty path is not allowed".to_string());
    }

    // 絶対パスを拒否（Windows形式の`C:\`やUnix形式の`/`で始まるパス）
    if path.starts_with('/') || path.starts_with("C:\\") || path.starts_with("c:\\") {
        return Err(format!("Absolute path is not allowed: {}", path));
    }

    // `..`を含むパスを拒否（ディレクトリトラバーサル攻撃）
    if path.contains("..") {
        return Err(format!("Path traversal detected: {}", path));
    }

    // `\`を含むパスを拒否（Windows形式のパスセパレータ）
    if path.contains('\\') {
        return Err(format!("Backslash in path is not allowed: {}", path));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_entry_path_valid() {
        assert!(validate_entry_path("data.csv").is_ok());
        assert!(validate_entry_path("reports/2024/sales.csv").is_ok());
        assert!(validate_entry_path("folder/").is_ok());
    }

    #[test]
    fn test_validate_entry_path_empty() {
        assert!(validate_entry_path("").is_err());
    }

    #[test]
    fn test_validate_entry_path_absolute_unix() {
        assert!(validate_entry_path("/etc/passwd").is_err());
        assert!(validate_entry_path("/data.csv").is_err());
    }

    #[test]
    fn test_validate_entry_path_absolute_windows() {
        assert!(validate_entry_path("C:\\Windows\\system32").is_err());
        assert!(validate_entry_path("c:\\data.csv").is_err());
    }

    #[test]
    fn test_validate_entry_path_traversal() {
        assert!(validate_entry_path("../etc/passwd").is_err());
        assert!(validate_entry_path("data/../../etc/passwd").is_err());
        assert!(validate_entry_path("data/..").is_err());
        assert!(validate_entry_path("..").is_err());
    }

    #[test]
    fn test_validate_entry_path_backslash() {
        assert!(validate_entry_path("folder\\data.csv").is_err());
    }

    #[test]
    fn test_default_limits() {
        let config = SecurityConfig::default();
        assert_eq!(config.max_entry_count, 10_000);
        assert_eq!(config.max_entry_size, 104_857_600);
        assert_eq!(config.max_decompressed_size, 1_073_741_824);
    }
}
