use super::model::{Article, Articles, Sorting};
use crate::types::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

// 記事検索の条件構造体
// provider / category は空文字列で「そのディメンションでは絞り込まない」を表す
#[derive(Debug, Clone)]
pub struct ArticleQuery {
    pub provider: String,
    pub category: String,
    pub sorting: Sorting,
    pub limit: i64,
    pub after: Option<DateTime<Utc>>,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            provider: String::new(),
            category: String::new(),
            sorting: Sorting::Desc,
            limit: 50,
            after: None,
        }
    }
}

// 記事テーブルとディメンションテーブルのJOIN結果行（テーブル定義と一致）
#[derive(Debug, Clone, FromRow)]
pub struct ArticleRecord {
    pub guid: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub published_date: DateTime<Utc>,
    pub provider: String,
    pub category: String,
}

// JOIN済み行からドメイン記事への変換。純粋な詰め替えでエラー経路を持たない。
impl From<ArticleRecord> for Article {
    fn from(record: ArticleRecord) -> Self {
        Article {
            guid: record.guid,
            title: record.title,
            description: record.description,
            link: record.link,
            published_date: record.published_date,
            provider: record.provider,
            category: record.category,
        }
    }
}

// 記事とディメンション名を一度のJOINで引くSELECT句
const ARTICLE_SELECT: &str = r#"
SELECT a.guid, a.title, a.description, a.link, a.published_date,
       p.name AS provider, c.name AS category
FROM articles a
JOIN providers p ON a.provider_id = p.id
JOIN categories c ON a.category_id = c.id
"#;

/// # 概要
/// 条件に合致する記事をデータベースから検索する。
///
/// ## 動作
/// - `provider` / `category` は空でなければディメンション名への完全一致フィルター
/// - `published_date` を基準に `sorting` の方向で並べ替える
/// - `after` はページングカーソル: 昇順なら `>`、降順なら `<` の厳密比較で、
///   カーソルと同時刻の行はどちらの方向でも含まれない
/// - 同時刻の行同士の相対順序は定義しない（セカンダリキーなし）
/// - 該当0件はエラーではなく空のリストを返す
///
/// ## 引数
/// - `query`: フィルター・ソート・件数上限。limitの値域検証は呼び出し側の責務
pub async fn search_articles(query: &ArticleQuery, pool: &PgPool) -> RepositoryResult<Articles> {
    // QueryBuilderベースで動的にクエリを構築
    let mut qb = sqlx::QueryBuilder::<sqlx::Postgres>::new(ARTICLE_SELECT);

    let has_cond =
        !query.provider.is_empty() || !query.category.is_empty() || query.after.is_some();

    if has_cond {
        qb.push(" WHERE ");
        let mut separated = qb.separated(" AND ");

        if !query.provider.is_empty() {
            separated
                .push("p.name = ")
                .push_bind_unseparated(&query.provider);
        }
        if !query.category.is_empty() {
            separated
                .push("c.name = ")
                .push_bind_unseparated(&query.category);
        }
        if let Some(after) = query.after {
            // カーソルはソート方向に依存する（常に「直前のページの端の先」）
            match query.sorting {
                Sorting::Asc => separated
                    .push("a.published_date > ")
                    .push_bind_unseparated(after),
                Sorting::Desc => separated
                    .push("a.published_date < ")
                    .push_bind_unseparated(after),
            };
        }
    }

    match query.sorting {
        Sorting::Asc => qb.push(" ORDER BY a.published_date ASC"),
        Sorting::Desc => qb.push(" ORDER BY a.published_date DESC"),
    };
    qb.push(" LIMIT ").push_bind(query.limit);

    let records = qb
        .build_query_as::<ArticleRecord>()
        .fetch_all(pool)
        .await
        .map_err(|e| RepositoryError::service("記事の検索", e))?;

    Ok(records.into_iter().map(Article::from).collect())
}

/// GUIDを指定して記事を1件取得する。
/// 該当行がなければ `RepositoryError::NotFound` を返す。
pub async fn find_article(guid: &str, pool: &PgPool) -> RepositoryResult<Article> {
    let mut qb = sqlx::QueryBuilder::<sqlx::Postgres>::new(ARTICLE_SELECT);
    qb.push(" WHERE a.guid = ").push_bind(guid);

    let record = qb
        .build_query_as::<ArticleRecord>()
        .fetch_optional(pool)
        .await
        .map_err(|e| RepositoryError::service("記事の取得", e))?;

    record.map(Article::from).ok_or(RepositoryError::NotFound)
}

/// # 概要
/// 記事をデータベースに挿入する。
///
/// ## 動作
/// 3つのストレージ操作を順に実行する:
/// 1. プロバイダ行をfirst-or-createで解決
/// 2. カテゴリ行を同様に解決
/// 3. 解決した外部キーとGUIDで記事行を挿入
///
/// 3ステップは単一トランザクションにまとめない。ステップ3が重複で失敗しても
/// 1〜2で作られたディメンション行はそのまま残り、同じ名前を使う次の投稿が
/// 再利用する冪等な事前作成として扱う。ステップ1・2の失敗は3に進む前に中断する。
///
/// ## エラー
/// - GUIDが既に存在する場合は `RepositoryError::Duplicate`
/// - それ以外のストレージ障害は `RepositoryError::Service`
pub async fn insert_article(article: &Article, pool: &PgPool) -> RepositoryResult<()> {
    let provider_id = resolve_provider_id(&article.provider, pool).await?;
    let category_id = resolve_category_id(&article.category, pool).await?;

    sqlx::query(
        r#"
        INSERT INTO articles (guid, provider_id, category_id, title, description, link, published_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(&article.guid)
    .bind(provider_id)
    .bind(category_id)
    .bind(&article.title)
    .bind(&article.description)
    .bind(&article.link)
    .bind(article.published_date)
    .execute(pool)
    .await
    .map_err(|e| RepositoryError::classify("記事の挿入", e))?;

    Ok(())
}

/// プロバイダ名をディメンション行のIDに解決する（なければ作成）
pub async fn resolve_provider_id(name: &str, pool: &PgPool) -> RepositoryResult<i64> {
    first_or_create_id(
        "SELECT id FROM providers WHERE name = $1",
        "INSERT INTO providers (name) VALUES ($1) RETURNING id",
        name,
        "プロバイダ",
        pool,
    )
    .await
}

/// カテゴリ名をディメンション行のIDに解決する（なければ作成）
pub async fn resolve_category_id(name: &str, pool: &PgPool) -> RepositoryResult<i64> {
    first_or_create_id(
        "SELECT id FROM categories WHERE name = $1",
        "INSERT INTO categories (name) VALUES ($1) RETURNING id",
        name,
        "カテゴリ",
        pool,
    )
    .await
}

// first-or-createの共通実装。
// SELECT→INSERTの順で試し、INSERTが名前の一意制約に当たった場合は
// 並行する別リクエストが先に行を作ったということなので、SELECTをやり直す。
// 事前チェックではなく制約違反からの再検索で競合窓を閉じる。
async fn first_or_create_id(
    select_sql: &str,
    insert_sql: &str,
    name: &str,
    what: &str,
    pool: &PgPool,
) -> RepositoryResult<i64> {
    if let Some(id) = sqlx::query_scalar::<_, i64>(select_sql)
        .bind(name)
        .fetch_optional(pool)
        .await
        .map_err(|e| RepositoryError::service(format!("{}の検索", what), e))?
    {
        return Ok(id);
    }

    match sqlx::query_scalar::<_, i64>(insert_sql)
        .bind(name)
        .fetch_one(pool)
        .await
    {
        Ok(id) => Ok(id),
        Err(e) if RepositoryError::is_unique_violation(&e) => {
            sqlx::query_scalar::<_, i64>(select_sql)
                .bind(name)
                .fetch_one(pool)
                .await
                .map_err(|e| RepositoryError::service(format!("{}の再検索", what), e))
        }
        Err(e) => Err(RepositoryError::service(format!("{}の作成", what), e)),
    }
}
