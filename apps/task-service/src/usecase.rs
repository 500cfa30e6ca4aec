//! # ユースケース層
//!
//! Task Service のビジネスロジックを実装する。
//!
//! - **依存性注入**: リポジトリと時刻を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: 入力検証とリポジトリ呼び出しの組み立てはここに集約

pub mod task;

pub use task::{CreateTaskInput, TaskUseCaseImpl, UpdateTaskInput};
