use crate::types::{ConnectionSource, DbConfig, RepositoryError, RepositoryResult};
use sqlx::PgPool;

/// データベース接続プールを作成
/// 環境変数（DATABASE_URLまたはDB_*）から接続先を決定する
pub async fn create_pool() -> anyhow::Result<PgPool> {
    let source = DbConfig::from_env()?;
    let pool = create_pool_with_source(source).await?;
    Ok(pool)
}

/// 指定された接続情報からプールを作成
pub async fn create_pool_with_source(source: ConnectionSource) -> RepositoryResult<PgPool> {
    PgPool::connect(&source.into_url())
        .await
        .map_err(|e| RepositoryError::service("データベース接続", e))
}

/// データベースの初期化（マイグレーション実行）
pub async fn initialize_database(pool: &PgPool) -> RepositoryResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| RepositoryError::service("マイグレーション実行", e.into()))
}

/// プールの作成とデータベース初期化を一括で行う便利関数
pub async fn setup_database() -> anyhow::Result<PgPool> {
    let pool = create_pool().await?;
    initialize_database(&pool).await?;
    Ok(pool)
}
