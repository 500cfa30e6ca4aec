//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲する

pub mod health;
pub mod task;

pub use health::{ReadinessState, health_check, readiness_check};
pub use task::{TaskState, create_task, delete_task, get_task, list_tasks, update_task};
