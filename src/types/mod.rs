//! 型定義モジュール
//!
//! アプリケーション全体で使用される共通的な型定義を管理します。
//! - エラー分類: ストレージ障害のドメインエラーへの正規化
//! - 接続設定: データベース接続パラメータ
//! - 登録結果: 一括登録の件数サマリ

pub mod config;
pub mod error;
pub mod result;

// 便利な再エクスポート
pub use config::{ConfigError, ConfigResult, ConnectionSource, DbConfig};
pub use error::{RepositoryError, RepositoryResult};
pub use result::DatabaseInsertResult;
