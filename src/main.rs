use newsstand::domain::article::{Article, ArticleQuery, ArticleRepository, ArticleService};
use newsstand::infra::db::setup_database;
use newsstand::types::RepositoryError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 環境変数を読み込み（.envファイルがあれば使用）
    let _ = dotenvy::dotenv();

    println!("=== データベース接続 ===");
    let pool = setup_database().await?;
    let service = ArticleService::new(pool);

    service.health_check().await?;
    println!("疎通確認に成功しました。");

    // 動作確認用のサンプル記事を登録
    println!("\n=== 記事登録 ===");
    let article = Article {
        guid: "demo-0001".to_string(),
        title: "サンプル記事".to_string(),
        description: "デモ用に登録する記事です。".to_string(),
        link: "https://example.com/demo-0001".to_string(),
        published_date: chrono::Utc::now(),
        provider: "BBC".to_string(),
        category: "tech".to_string(),
    };

    match service.add_article(&article).await {
        Ok(()) => println!("記事を登録しました: {}", article.guid),
        Err(RepositoryError::Duplicate) => {
            println!("記事は既に登録済みです: {}", article.guid)
        }
        Err(e) => eprintln!("記事の登録中にエラーが発生しました: {}", e),
    }

    println!("\n=== 記事取得 ===");
    let query = ArticleQuery {
        provider: "BBC".to_string(),
        ..Default::default()
    };
    match service.get_articles(&query).await {
        Ok(articles) => {
            println!("BBCの記事を{}件取得しました。", articles.len());
            for article in &articles {
                println!("- [{}] {}", article.published_date, article.title);
            }
        }
        Err(e) => eprintln!("記事の取得中にエラーが発生しました: {}", e),
    }

    Ok(())
}
