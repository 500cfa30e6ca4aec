//! # リポジトリ実装
//!
//! タスクの永続化操作を定義するトレイトと、その PostgreSQL 実装を提供する。
//!
//! ユースケース層はトレイト経由でのみリポジトリに触れる。
//! テストでは [`crate::mock`] のインメモリ実装に差し替える。

pub mod task_repository;

pub use task_repository::{PostgresTaskRepository, TaskRepository};
