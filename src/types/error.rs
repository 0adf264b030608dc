use thiserror::Error;

/// リポジトリ層のエラー型
/// ストレージ由来の失敗を3種類のドメインエラーに分類して表現する
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// GUIDの一意制約違反（同じ記事が既に存在する）
    #[error("データベースエラー: 重複エントリ")]
    Duplicate,

    /// 1件取得系の操作で対象の行が見つからなかった
    #[error("データベースエラー: エントリが見つかりません")]
    NotFound,

    /// その他のストレージ障害（接続断、不正なクエリなど）
    #[error("データベースエラー: {operation} - {source}")]
    Service {
        operation: String,
        #[source]
        source: sqlx::Error,
    },
}

impl RepositoryError {
    /// 汎用ストレージエラーを作成
    pub fn service<O: Into<String>>(operation: O, source: sqlx::Error) -> Self {
        Self::Service {
            operation: operation.into(),
            source,
        }
    }

    /// sqlxのエラーをドメインエラーに分類する
    ///
    /// 分類はストレージ境界のこの1箇所でのみ行い、上位のコードは
    /// 閉じたenumへのmatchだけで済むようにする。重複の判定は
    /// ドライバのネイティブなエラーコード（PostgreSQLの23505）に
    /// 基づいて行い、事前SELECTによるチェックは行わない。
    pub fn classify<O: Into<String>>(operation: O, source: sqlx::Error) -> Self {
        if Self::is_unique_violation(&source) {
            return Self::Duplicate;
        }
        Self::service(operation, source)
    }

    /// 一意制約違反かどうかをドライバのエラーコードから判定
    pub fn is_unique_violation(source: &sqlx::Error) -> bool {
        matches!(source, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
    }
}

/// リポジトリエラーのResult型エイリアス
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
