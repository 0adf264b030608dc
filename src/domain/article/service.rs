use super::model::{Article, Articles};
use super::repository::{find_article, insert_article, search_articles, ArticleQuery};
use crate::types::{DatabaseInsertResult, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use sqlx::{Connection, PgPool};

/// 記事リポジトリの契約
///
/// HTTP層はこのtraitにのみ依存する。テスト時にはモック実装を
/// 注入することで実際のデータベースへの接続を避けることができます。
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// ストレージとの疎通を確認する（クエリは発行しない）
    async fn health_check(&self) -> RepositoryResult<()>;

    /// 条件に合致する記事を取得する。該当なしは空のリスト
    async fn get_articles(&self, query: &ArticleQuery) -> RepositoryResult<Articles>;

    /// GUIDで記事を1件取得する。該当なしはNotFound
    async fn get_article(&self, guid: &str) -> RepositoryResult<Article>;

    /// 記事を1件登録する。GUID重複はDuplicate
    async fn add_article(&self, article: &Article) -> RepositoryResult<()>;

    /// 記事を一括登録する。重複はスキップして続行し、
    /// それ以外の失敗は残りを中断してエラーを返す
    async fn add_articles(&self, articles: &[Article]) -> RepositoryResult<DatabaseInsertResult>;
}

/// 記事リポジトリのPostgreSQL実装
///
/// 接続プールは構築時に外から注入する。プロセス全体で共有する
/// グローバルな接続は持たない。
#[derive(Debug, Clone)]
pub struct ArticleService {
    pool: PgPool,
}

impl ArticleService {
    /// 注入されたプールからサービスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for ArticleService {
    async fn health_check(&self) -> RepositoryResult<()> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RepositoryError::service("接続の取得", e))?;
        conn.ping()
            .await
            .map_err(|e| RepositoryError::service("疎通確認", e))
    }

    async fn get_articles(&self, query: &ArticleQuery) -> RepositoryResult<Articles> {
        search_articles(query, &self.pool).await
    }

    async fn get_article(&self, guid: &str) -> RepositoryResult<Article> {
        find_article(guid, &self.pool).await
    }

    async fn add_article(&self, article: &Article) -> RepositoryResult<()> {
        insert_article(article, &self.pool).await
    }

    async fn add_articles(&self, articles: &[Article]) -> RepositoryResult<DatabaseInsertResult> {
        let mut result = DatabaseInsertResult::empty();

        for article in articles {
            match insert_article(article, &self.pool).await {
                Ok(()) => result.inserted += 1,
                // 重複は黙ってスキップして次へ
                Err(RepositoryError::Duplicate) => result.skipped_duplicate += 1,
                // 重複以外の失敗は残りを中断して伝播
                Err(e) => return Err(e),
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_article(guid: &str, provider: &str, category: &str, hour: u32) -> Article {
        Article {
            guid: guid.to_string(),
            title: format!("記事 {}", guid),
            description: "テスト用の本文要約".to_string(),
            link: format!("https://example.com/{}", guid),
            published_date: Utc.with_ymd_and_hms(2020, 5, 10, hour, 0, 0).unwrap(),
            provider: provider.to_string(),
            category: category.to_string(),
        }
    }

    #[sqlx::test]
    async fn test_health_check(pool: PgPool) -> Result<(), anyhow::Error> {
        let service = ArticleService::new(pool);
        service.health_check().await?;

        println!("✅ ヘルスチェック検証成功");
        Ok(())
    }

    #[sqlx::test]
    async fn test_bulk_insert_skips_duplicates(pool: PgPool) -> Result<(), anyhow::Error> {
        let service = ArticleService::new(pool);

        // 事前に1件登録しておき、一括登録にその重複を混ぜる
        service
            .add_article(&make_article("g1", "BBC", "tech", 10))
            .await?;

        let batch = vec![
            make_article("g1", "BBC", "tech", 10), // 重複
            make_article("g2", "BBC", "sports", 11),
            make_article("g3", "Reuters", "tech", 12),
        ];
        let result = service.add_articles(&batch).await?;

        assert_eq!(result.inserted, 2, "新規2件が登録されるはず");
        assert_eq!(result.skipped_duplicate, 1, "重複1件がスキップされるはず");

        let all = service.get_articles(&ArticleQuery::default()).await?;
        assert_eq!(all.len(), 3);

        println!("✅ 一括登録の重複スキップ検証成功: {}", result);
        Ok(())
    }

    #[sqlx::test]
    async fn test_get_article_not_found(pool: PgPool) -> Result<(), anyhow::Error> {
        let service = ArticleService::new(pool);

        let result = service.get_article("missing").await;
        assert!(
            matches!(result, Err(RepositoryError::NotFound)),
            "未登録のGUIDはNotFoundになるべき: {:?}",
            result
        );

        println!("✅ NotFound検証成功");
        Ok(())
    }

    // 仕様シナリオ: 登録→重複→絞り込み取得
    #[sqlx::test]
    async fn test_submit_then_query_scenario(pool: PgPool) -> Result<(), anyhow::Error> {
        let service = ArticleService::new(pool);

        let article = Article {
            guid: "g1".to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
            link: "L".to_string(),
            published_date: "2020-05-10T12:30:00Z".parse().unwrap(),
            provider: "BBC".to_string(),
            category: "tech".to_string(),
        };

        // 初回登録は成功
        service.add_article(&article).await?;

        // 2回目はDuplicate
        let second = service.add_article(&article).await;
        assert!(matches!(second, Err(RepositoryError::Duplicate)));

        // プロバイダだけで絞り込んで取得すると、投入した記事が1件だけ返る
        let query = ArticleQuery {
            provider: "BBC".to_string(),
            ..Default::default()
        };
        let articles = service.get_articles(&query).await?;

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0], article, "取得結果が投入した記事と一致しません");

        println!("✅ 登録→重複→取得シナリオ検証成功");
        Ok(())
    }
}
