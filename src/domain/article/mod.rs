pub mod model;
pub mod repository;
pub mod service;

// 公開APIの再エクスポート

// model.rsから
pub use model::{Article, Articles, Sorting};

// repository.rsから
pub use repository::{
    find_article, insert_article, resolve_category_id, resolve_provider_id, search_articles,
    ArticleQuery, ArticleRecord,
};

// service.rsから
pub use service::{ArticleRepository, ArticleService};
