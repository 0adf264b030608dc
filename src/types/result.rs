/// 一括登録の結果を格納する構造体
/// 新規挿入と重複スキップの件数を記録する（更新は行わない設計）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatabaseInsertResult {
    /// 新規挿入された件数
    pub inserted: usize,
    /// GUID重複によりスキップされた件数
    pub skipped_duplicate: usize,
}

impl DatabaseInsertResult {
    /// 新しい登録結果を作成
    pub fn new(inserted: usize, skipped_duplicate: usize) -> Self {
        Self {
            inserted,
            skipped_duplicate,
        }
    }

    /// 空の結果（全て0）を作成
    pub fn empty() -> Self {
        Self::new(0, 0)
    }
}

impl std::fmt::Display for DatabaseInsertResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "処理完了: 新規保存{}件、重複スキップ{}件",
            self.inserted, self.skipped_duplicate
        )
    }
}
