//! # テスト用モックリポジトリ
//!
//! ユースケーステスト・ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! task-manager-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use task_manager_domain::task::{Task, TaskChanges, TaskId, TaskStatusFilter};

use crate::{error::InfraError, repository::TaskRepository};

// ===== MockTaskRepository =====

/// インメモリのタスクリポジトリ
///
/// 挿入順を保持するため、一覧は作成順になる。
/// [`fail_with_unexpected`](Self::fail_with_unexpected) で以降の全操作を失敗させられる。
#[derive(Clone, Default)]
pub struct MockTaskRepository {
    tasks:   Arc<Mutex<Vec<Task>>>,
    failing: Arc<AtomicBool>,
}

impl MockTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_task(&self, task: Task) {
        self.tasks.lock().unwrap().push(task);
    }

    /// 現在保持しているタスクのスナップショット
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    /// 以降の操作をすべて `InfraError` で失敗させる
    pub fn fail_with_unexpected(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), InfraError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("mock failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), InfraError> {
        self.check_failure()?;
        self.tasks.lock().unwrap().push(task.clone());
        Ok(())
    }

    async fn find_all(&self, filter: Option<TaskStatusFilter>) -> Result<Vec<Task>, InfraError> {
        self.check_failure()?;
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|task| filter.is_none_or(|f| f.matches(task)))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, InfraError> {
        self.check_failure()?;
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .find(|task| task.id() == id)
            .cloned())
    }

    async fn update(
        &self,
        id: &TaskId,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, InfraError> {
        self.check_failure()?;
        let mut tasks = self.tasks.lock().unwrap();
        let Some(slot) = tasks.iter_mut().find(|task| task.id() == id) else {
            return Ok(None);
        };
        *slot = slot.clone().apply(changes);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &TaskId) -> Result<Option<Task>, InfraError> {
        self.check_failure()?;
        let mut tasks = self.tasks.lock().unwrap();
        let Some(index) = tasks.iter().position(|task| task.id() == id) else {
            return Ok(None);
        };
        Ok(Some(tasks.remove(index)))
    }
}
