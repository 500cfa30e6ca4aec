//! タスク管理ユースケース

use std::sync::Arc;

use task_manager_domain::{
    DomainError,
    clock::Clock,
    task::{Task, TaskChanges, TaskDraft, TaskId, TaskStatusFilter},
    validation::FieldInput,
};
use task_manager_infra::repository::TaskRepository;

use crate::error::{CoreError, TASK_NOT_FOUND};

/// タスク作成の入力（未検証）
///
/// `None` はフィールドの欠落。
#[derive(Debug, Default)]
pub struct CreateTaskInput {
    pub title:       Option<FieldInput<String>>,
    pub description: Option<FieldInput<String>>,
}

/// タスク更新の入力（未検証）
///
/// `None` は「変更なし」。
#[derive(Debug, Default)]
pub struct UpdateTaskInput {
    pub title:       Option<FieldInput<String>>,
    pub description: Option<FieldInput<String>>,
    pub completed:   Option<FieldInput<bool>>,
}

/// タスク管理ユースケース
pub struct TaskUseCaseImpl {
    task_repository: Arc<dyn TaskRepository>,
    clock:           Arc<dyn Clock>,
}

impl TaskUseCaseImpl {
    pub fn new(task_repository: Arc<dyn TaskRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            task_repository,
            clock,
        }
    }

    /// タスクを作成する
    ///
    /// ID と作成日時はサーバー側で決め、未完了で保存する。
    pub async fn create_task(&self, input: CreateTaskInput) -> Result<Task, CoreError> {
        let draft = TaskDraft::parse(input.title, input.description).map_err(DomainError::from)?;
        let task = Task::new(TaskId::new(), draft, self.clock.now());

        self.task_repository.insert(&task).await?;

        tracing::info!(task_id = %task.id(), "タスクを作成しました");
        Ok(task)
    }

    /// タスク一覧を取得する
    pub async fn list_tasks(
        &self,
        filter: Option<TaskStatusFilter>,
    ) -> Result<Vec<Task>, CoreError> {
        let tasks = self.task_repository.find_all(filter).await?;
        Ok(tasks)
    }

    /// タスクを 1 件取得する
    pub async fn get_task(&self, id: &TaskId) -> Result<Task, CoreError> {
        self.task_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(TASK_NOT_FOUND.to_string()))
    }

    /// タスクを部分更新する
    ///
    /// 入力の検証はリポジトリに触れる前に行う。
    pub async fn update_task(
        &self,
        id: &TaskId,
        input: UpdateTaskInput,
    ) -> Result<Task, CoreError> {
        let changes = TaskChanges::parse(input.title, input.description, input.completed)
            .map_err(DomainError::from)?;

        let task = self
            .task_repository
            .update(id, &changes)
            .await?
            .ok_or_else(|| CoreError::NotFound(TASK_NOT_FOUND.to_string()))?;

        tracing::info!(task_id = %id, "タスクを更新しました");
        Ok(task)
    }

    /// タスクを削除する
    pub async fn delete_task(&self, id: &TaskId) -> Result<Task, CoreError> {
        let task = self
            .task_repository
            .delete(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(TASK_NOT_FOUND.to_string()))?;

        tracing::info!(task_id = %id, "タスクを削除しました");
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use task_manager_domain::clock::FixedClock;
    use task_manager_infra::mock::MockTaskRepository;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn create_sut(repo: &MockTaskRepository) -> TaskUseCaseImpl {
        TaskUseCaseImpl::new(
            Arc::new(repo.clone()) as Arc<dyn TaskRepository>,
            Arc::new(FixedClock::new(fixed_now())) as Arc<dyn Clock>,
        )
    }

    fn create_input(title: &str) -> CreateTaskInput {
        CreateTaskInput {
            title:       Some(title.to_string().into()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_taskは未完了のタスクを保存する() {
        let repo = MockTaskRepository::new();
        let sut = create_sut(&repo);

        let task = sut.create_task(create_input("Buy groceries")).await.unwrap();

        assert!(!task.completed());
        assert_eq!(task.created_at(), fixed_now());
        assert_eq!(repo.tasks(), vec![task]);
    }

    #[tokio::test]
    async fn test_create_taskは検証エラーで保存しない() {
        let repo = MockTaskRepository::new();
        let sut = create_sut(&repo);

        let result = sut.create_task(CreateTaskInput::default()).await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert!(repo.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_list_tasksはフィルタを適用する() {
        let repo = MockTaskRepository::new();
        let sut = create_sut(&repo);
        let done = sut.create_task(create_input("done")).await.unwrap();
        sut.create_task(create_input("todo")).await.unwrap();
        let done = sut
            .update_task(
                done.id(),
                UpdateTaskInput {
                    completed: Some(true.into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let completed = sut
            .list_tasks(Some(TaskStatusFilter::Completed))
            .await
            .unwrap();
        let all = sut.list_tasks(None).await.unwrap();

        assert_eq!(completed, vec![done]);
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_update_taskは型の異なる完了フラグを検証エラーにする() {
        let repo = MockTaskRepository::new();
        let sut = create_sut(&repo);
        let task = sut.create_task(create_input("Buy groceries")).await.unwrap();
        let input = UpdateTaskInput {
            completed: Some(FieldInput::WrongType),
            ..Default::default()
        };

        let result = sut.update_task(task.id(), input).await;

        match result {
            Err(CoreError::Validation(errors)) => {
                assert_eq!(errors.errors()[0].message, "Completed must be a boolean value");
            }
            other => panic!("検証エラーになること: {other:?}"),
        }
        assert_eq!(repo.tasks(), vec![task]);
    }

    #[tokio::test]
    async fn test_get_taskは保存済みのタスクを返す() {
        let repo = MockTaskRepository::new();
        let draft = TaskDraft::parse(Some("seeded".to_string().into()), None).unwrap();
        let task = Task::new(TaskId::new(), draft, fixed_now());
        repo.add_task(task.clone());
        let sut = create_sut(&repo);

        let found = sut.get_task(task.id()).await.unwrap();

        assert_eq!(found, task);
    }

    #[tokio::test]
    async fn test_get_taskは存在しないidでnot_found() {
        let sut = create_sut(&MockTaskRepository::new());

        let result = sut.get_task(&TaskId::new()).await;

        assert!(matches!(result, Err(CoreError::NotFound(msg)) if msg == "Task not found"));
    }

    #[tokio::test]
    async fn test_update_taskは検証をidの検索より先に行う() {
        // 存在しない ID でも検証エラーが優先される
        let sut = create_sut(&MockTaskRepository::new());
        let input = UpdateTaskInput {
            title: Some(FieldInput::Null),
            ..Default::default()
        };

        let result = sut.update_task(&TaskId::new(), input).await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_taskは指定していないフィールドを保つ() {
        let repo = MockTaskRepository::new();
        let sut = create_sut(&repo);
        let created = sut
            .create_task(CreateTaskInput {
                title:       Some("Buy groceries".to_string().into()),
                description: Some("milk".to_string().into()),
            })
            .await
            .unwrap();

        let updated = sut
            .update_task(
                created.id(),
                UpdateTaskInput {
                    completed: Some(true.into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.completed());
        assert_eq!(updated.title(), created.title());
        assert_eq!(updated.description(), created.description());
    }

    #[tokio::test]
    async fn test_delete_taskは2回目にnot_found() {
        let repo = MockTaskRepository::new();
        let sut = create_sut(&repo);
        let task = sut.create_task(create_input("once")).await.unwrap();

        let first = sut.delete_task(task.id()).await;
        let second = sut.delete_task(task.id()).await;

        assert_eq!(first.unwrap(), task);
        assert!(matches!(second, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_リポジトリの失敗はdatabaseエラーになる() {
        let repo = MockTaskRepository::new();
        repo.fail_with_unexpected();
        let sut = create_sut(&repo);

        let result = sut.list_tasks(None).await;

        assert!(matches!(result, Err(CoreError::Database(_))));
    }
}
