//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するエンティティ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use task_manager_domain::task::{Task, TaskDraft, TaskId};

/// テスト用の固定日時
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// 説明なしのタスクを作成
pub fn create_test_task(title: &str) -> Task {
    create_test_task_at(title, test_now())
}

/// 指定時刻に作成されたタスクを作成
pub fn create_test_task_at(title: &str, created_at: DateTime<Utc>) -> Task {
    let draft = TaskDraft::parse(Some(title.to_string().into()), None).unwrap();
    Task::new(TaskId::new(), draft, created_at)
}

/// 説明付きのタスクを作成
pub fn create_test_task_with_description(title: &str, description: &str) -> Task {
    let draft = TaskDraft::parse(
        Some(title.to_string().into()),
        Some(description.to_string().into()),
    )
    .unwrap();
    Task::new(TaskId::new(), draft, test_now())
}

/// `test_now()` から `seconds` 秒後
pub fn seconds_later(seconds: i64) -> DateTime<Utc> {
    test_now() + Duration::seconds(seconds)
}
