//! ドメイン層
//!
//! 記事のエンティティ・検索条件・リポジトリ操作を提供します。

pub mod article;
