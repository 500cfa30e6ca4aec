//! # TaskRepository
//!
//! タスクの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **一覧は作成順**: `created_at ASC, id ASC` で返す（同時刻は UUID v7 の順）
//! - **1 往復で完結**: 更新・削除は `RETURNING` で結果の行を受け取り、
//!   該当行がなければ `None` を返す
//! - **行の復元で再検証**: DB の値もドメインの値オブジェクトを通して復元する

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use task_manager_domain::task::{
    Task,
    TaskChanges,
    TaskDescription,
    TaskId,
    TaskStatusFilter,
    TaskTitle,
};
use uuid::Uuid;

use crate::error::InfraError;

/// タスクリポジトリトレイト
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// 新規タスクを保存する
    async fn insert(&self, task: &Task) -> Result<(), InfraError>;

    /// タスク一覧を作成順で取得する
    ///
    /// `filter` が `Some` の場合は完了状態で絞り込む。
    async fn find_all(&self, filter: Option<TaskStatusFilter>) -> Result<Vec<Task>, InfraError>;

    /// ID でタスクを取得する
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, InfraError>;

    /// 指定されたフィールドだけを更新し、更新後のタスクを返す
    ///
    /// 該当するタスクがなければ `None`。
    async fn update(&self, id: &TaskId, changes: &TaskChanges)
    -> Result<Option<Task>, InfraError>;

    /// タスクを削除し、削除したタスクを返す
    ///
    /// 該当するタスクがなければ `None`。
    async fn delete(&self, id: &TaskId) -> Result<Option<Task>, InfraError>;
}

/// DB の tasks テーブルの行を表す中間構造体
#[derive(sqlx::FromRow)]
struct TaskRow {
    id:          Uuid,
    title:       String,
    description: Option<String>,
    completed:   bool,
    created_at:  DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = InfraError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let title = TaskTitle::new(row.title).map_err(|e| InfraError::unexpected(e.to_string()))?;
        let description = row
            .description
            .map(TaskDescription::new)
            .transpose()
            .map_err(|e| InfraError::unexpected(e.to_string()))?;

        Ok(Task::from_db(
            TaskId::from_uuid(row.id),
            title,
            description,
            row.completed,
            row.created_at,
        ))
    }
}

/// PostgreSQL 実装の TaskRepository
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(id = %task.id()))]
    async fn insert(&self, task: &Task) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, title, description, completed, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(task.id().as_uuid())
        .bind(task.title().as_str())
        .bind(task.description().map(TaskDescription::as_str))
        .bind(task.completed())
        .bind(task.created_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(?filter))]
    async fn find_all(&self, filter: Option<TaskStatusFilter>) -> Result<Vec<Task>, InfraError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, description, completed, created_at
            FROM tasks
            WHERE ($1::BOOLEAN IS NULL OR completed = $1)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(filter.map(TaskStatusFilter::completed))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Task::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, InfraError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, description, completed, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Task::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(
        &self,
        id: &TaskId,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, InfraError> {
        // description は「変更しない」と「NULL にする」を区別するためフラグを別に渡す
        let description = changes.description();

        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                completed = COALESCE($5, completed)
            WHERE id = $1
            RETURNING id, title, description, completed, created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(changes.title().map(TaskTitle::as_str))
        .bind(description.is_some())
        .bind(description.flatten().map(TaskDescription::as_str))
        .bind(changes.completed())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Task::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &TaskId) -> Result<Option<Task>, InfraError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            RETURNING id, title, description, completed, created_at
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Task::try_from).transpose()
    }
}
