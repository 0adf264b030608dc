//! インフラストラクチャ層
//!
//! データベース接続プールの作成とマイグレーション実行を担当します。

pub mod db;

pub use db::{create_pool, create_pool_with_source, initialize_database, setup_database};
