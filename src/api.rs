//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 候補ファイルの走査ポリシー
///
/// 展開されたアーカイブの中からCSVファイルを探す方法を指定します。
/// どちらのポリシーでも、ファイル名が`.`で始まる隠しファイルは除外され、
/// 発見順序は決定的（ファイル名の辞書順）です。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TraversalMode {
    /// 作業領域全体を再帰的に走査（デフォルト）
    ///
    /// ディレクトリ階層の深さに関係なく、拡張子が`.csv`
    /// （大文字小文字を区別しない）であるすべてのファイルを候補とします。
    /// アーカイブがルート直下にファイルを持つ場合も、フォルダごと
    /// 圧縮されている場合も、同じように扱えます。
    RecursiveFlat,

    /// 単一のトップレベルフォルダの直下のみを走査
    ///
    /// 作業領域の直下にちょうど1つの（隠しでない）フォルダが存在することを
    /// 要求し、そのフォルダ直下の`.csv`ファイルのみを候補とします。
    /// サブフォルダは走査しません。トップレベルフォルダが0個または
    /// 複数ある場合は`CsvToXlsxError::NoCandidatesFound`になります。
    ///
    /// 「フォルダを右クリックして圧縮」で作られた、1フォルダ構成の
    /// アーカイブだけを受け付けたい場合に使用します。
    SingleSubfolder,
}
