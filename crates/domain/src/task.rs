//! # タスク
//!
//! 本システム唯一のエンティティ。タイトル・説明・完了フラグ・作成日時を持つ。
//!
//! ## 不変条件
//!
//! - `title` は 1〜100 文字（空文字列は不可）
//! - `description` は存在する場合 500 文字以内
//! - `completed` は作成時 `false`、更新でのみ変化する
//! - `id` と `created_at` は作成時に決まり、以後変わらない
//!
//! 文字数は Unicode スカラー値（`chars().count()`）で数える。
//!
//! ## 入力の検証
//!
//! 作成は [`TaskDraft`]、部分更新は [`TaskChanges`] を経由する。
//! どちらも失敗したフィールドをすべて集めた [`ValidationErrors`] を返すため、
//! 検証済みの値だけがリポジトリに到達する。
//!
//! ```rust
//! use chrono::Utc;
//! use task_manager_domain::task::{Task, TaskDraft, TaskId};
//!
//! let draft = TaskDraft::parse(Some("Buy groceries".to_string().into()), None).unwrap();
//! let task = Task::new(TaskId::new(), draft, Utc::now());
//!
//! assert_eq!(task.title().as_str(), "Buy groceries");
//! assert!(!task.completed());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::validation::{FieldError, FieldInput, ValidationErrors};

define_uuid_id! {
    /// タスクの一意識別子
    pub struct TaskId;
}

/// タイトルの最大文字数（DB: CHECK 制約と一致させる）
pub const MAX_TITLE_LENGTH: usize = 100;

/// 説明の最大文字数（DB: CHECK 制約と一致させる）
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// リクエストボディ上のフィールド名
pub mod field {
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const COMPLETED: &str = "completed";
}

const TITLE_REQUIRED: &str = "Title is required";
const TITLE_TOO_LONG: &str = "Title must not be more than 100 characters long";
const DESCRIPTION_TOO_LONG: &str = "Description must not be more than 500 characters long";
const TITLE_NOT_STRING: &str = "Title must be a string";
const DESCRIPTION_NOT_STRING: &str = "Description must be a string";
const COMPLETED_NOT_BOOLEAN: &str = "Completed must be a boolean value";

// =========================================================================
// TaskTitle / TaskDescription（値オブジェクト）
// =========================================================================

/// タスクのタイトル
///
/// 前後の空白は保持する（入力どおりに保存する）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTitle(String);

impl TaskTitle {
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();

        if value.is_empty() {
            return Err(FieldError::new(field::TITLE, TITLE_REQUIRED));
        }
        if value.chars().count() > MAX_TITLE_LENGTH {
            return Err(FieldError::new(field::TITLE, TITLE_TOO_LONG));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// タスクの説明
///
/// 空文字列は許容する（0〜500 文字）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescription(String);

impl TaskDescription {
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();

        if value.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(FieldError::new(field::DESCRIPTION, DESCRIPTION_TOO_LONG));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// =========================================================================
// TaskStatusFilter（一覧の絞り込み条件）
// =========================================================================

/// 一覧取得時の完了状態フィルタ
///
/// クエリパラメータ `status` の値に対応する。
/// 未知の値はフィルタなしとして扱うため、パース失敗はエラーにしない。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskStatusFilter {
    /// 完了済みのみ
    Completed,
    /// 未完了のみ
    Pending,
}

impl TaskStatusFilter {
    /// クエリパラメータから解釈する（未指定・未知の値は `None`）
    pub fn from_query(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.parse().ok())
    }

    /// このフィルタが要求する `completed` の値
    pub fn completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn matches(self, task: &Task) -> bool {
        task.completed() == self.completed()
    }
}

// =========================================================================
// TaskDraft（作成入力）/ TaskChanges（部分更新入力）
// =========================================================================

/// 検証済みのタスク作成入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title:       TaskTitle,
    description: Option<TaskDescription>,
}

impl TaskDraft {
    /// リクエストの生の値を検証する
    ///
    /// 外側の `Option` はフィールドの有無を表す。
    /// `title` の欠落と `null` は「必須」エラー、`description` の欠落と `null` は説明なし。
    pub fn parse(
        title: Option<FieldInput<String>>,
        description: Option<FieldInput<String>>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = errors.collect(parse_title(title.unwrap_or(FieldInput::Null)));
        let description = match description {
            None | Some(FieldInput::Null) => None,
            Some(input) => errors.collect(parse_description(input)),
        };

        match title {
            Some(title) => errors.into_result(Self { title, description }),
            None => Err(errors),
        }
    }

    pub fn title(&self) -> &TaskTitle {
        &self.title
    }

    pub fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }
}

/// 検証済みの部分更新入力
///
/// 各フィールドの意味:
/// - `None`: 変更しない
/// - `description` の `Some(None)`: 説明を削除する
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    title:       Option<TaskTitle>,
    description: Option<Option<TaskDescription>>,
    completed:   Option<bool>,
}

impl TaskChanges {
    /// リクエストの生の値を検証する
    ///
    /// 外側の `Option` はフィールドの有無を表す。
    /// `title` と `completed` は `null` を受け付けない。`description` の `null` は削除。
    pub fn parse(
        title: Option<FieldInput<String>>,
        description: Option<FieldInput<String>>,
        completed: Option<FieldInput<bool>>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = title.and_then(|input| errors.collect(parse_title(input)));
        let description = description.and_then(|input| match input {
            FieldInput::Null => Some(None),
            input => errors.collect(parse_description(input)).map(Some),
        });
        let completed = completed.and_then(|input| match input {
            FieldInput::Value(value) => Some(value),
            FieldInput::Null | FieldInput::WrongType => {
                errors.push(FieldError::new(field::COMPLETED, COMPLETED_NOT_BOOLEAN));
                None
            }
        });

        errors.into_result(Self {
            title,
            description,
            completed,
        })
    }

    pub fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    pub fn description(&self) -> Option<Option<&TaskDescription>> {
        self.description.as_ref().map(Option::as_ref)
    }

    pub fn completed(&self) -> Option<bool> {
        self.completed
    }

    /// 変更対象のフィールドが 1 つもないか
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

fn parse_title(input: FieldInput<String>) -> Result<TaskTitle, FieldError> {
    match input {
        FieldInput::Value(value) => TaskTitle::new(value),
        FieldInput::Null => Err(FieldError::new(field::TITLE, TITLE_REQUIRED)),
        FieldInput::WrongType => Err(FieldError::new(field::TITLE, TITLE_NOT_STRING)),
    }
}

fn parse_description(input: FieldInput<String>) -> Result<TaskDescription, FieldError> {
    match input {
        FieldInput::Value(value) => TaskDescription::new(value),
        FieldInput::Null | FieldInput::WrongType => {
            Err(FieldError::new(field::DESCRIPTION, DESCRIPTION_NOT_STRING))
        }
    }
}

// =========================================================================
// Task（エンティティ）
// =========================================================================

/// タスクエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id:          TaskId,
    title:       TaskTitle,
    description: Option<TaskDescription>,
    completed:   bool,
    created_at:  DateTime<Utc>,
}

impl Task {
    /// 新しいタスクを作成する（未完了で開始）
    pub fn new(id: TaskId, draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            completed: false,
            created_at: now,
        }
    }

    /// データベースからタスクを復元する
    pub fn from_db(
        id: TaskId,
        title: TaskTitle,
        description: Option<TaskDescription>,
        completed: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            completed,
            created_at,
        }
    }

    /// 部分更新を適用した新しい状態を返す
    ///
    /// 指定されなかったフィールドは元の値を保つ。
    pub fn apply(self, changes: &TaskChanges) -> Self {
        Self {
            title: changes.title.clone().unwrap_or(self.title),
            description: match &changes.description {
                Some(description) => description.clone(),
                None => self.description,
            },
            completed: changes.completed.unwrap_or(self.completed),
            ..self
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn title(&self) -> &TaskTitle {
        &self.title
    }

    pub fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
