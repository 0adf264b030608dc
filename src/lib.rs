//! ニュース記事メタデータのリポジトリ/クエリサービス
//!
//! 投稿側はGUIDで重複排除された記事を登録し、参照側はプロバイダ・
//! カテゴリ・ソート方向・時刻カーソルで絞り込んで取得します。
//! HTTP層やプロセス起動はこのクレートの外側にあり、外部の呼び出し側は
//! [`domain::article::ArticleRepository`] の契約を通してのみ接続します。

pub mod domain;
pub mod infra;
pub mod types;

// 利用頻度の高い型の再エクスポート
pub use domain::article::{
    Article, ArticleQuery, ArticleRepository, ArticleService, Articles, Sorting,
};
pub use types::{DatabaseInsertResult, DbConfig, RepositoryError, RepositoryResult};
