//! # タスクハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/tasks` - タスク作成
//! - `GET /api/tasks` - タスク一覧（`?status=completed|pending`）
//! - `GET /api/tasks/{id}` - タスク取得
//! - `PUT /api/tasks/{id}` - タスク部分更新
//! - `DELETE /api/tasks/{id}` - タスク削除
//!
//! 空のボディは `{}` として扱う。JSON オブジェクトとして解釈できないボディは
//! 検証前に 400 `{"error": "..."}` で拒否する。フィールドの型の不一致は
//! 他の検証エラーと同じく 400 `{"errors": [...]}` になる。

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use chrono::SecondsFormat;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;
use task_manager_domain::{
    task::{Task, TaskId, TaskStatusFilter},
    validation::FieldInput,
};
use task_manager_shared::{ErrorResponse, MessageResponse, ValidationErrorResponse};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::CoreError,
    usecase::{CreateTaskInput, TaskUseCaseImpl, UpdateTaskInput},
};

const CREATE_FAILED: &str = "An error occurred while creating the task";
const LIST_FAILED: &str = "An error occurred while fetching tasks";
const GET_FAILED: &str = "An error occurred while fetching the task";
const UPDATE_FAILED: &str = "An error occurred while updating the task";
const DELETE_FAILED: &str = "An error occurred while deleting the task";
const DELETED: &str = "Task deleted successfully";
const MISSING_JSON_CONTENT_TYPE: &str = "Expected request with `Content-Type: application/json`";
const INVALID_JSON: &str = "Request body must be valid JSON";
const NOT_AN_OBJECT: &str = "Request body must be a JSON object";

/// タスク API の共有状態
pub struct TaskState {
    pub usecase: TaskUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// タスク作成リクエスト
///
/// `id` / `completed` / `createdAt` など未知のフィールドは無視する。
/// 型の検査は検証時に行うため、値は JSON のまま受け取る。
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = String, example = "Buy groceries")]
    pub title:       Option<Value>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>, example = "Remember to buy milk and bread")]
    pub description: Option<Value>,
}

/// タスク更新リクエスト
///
/// 省略したフィールドは変更しない。`description: null` は説明を削除する。
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>, example = "Buy groceries")]
    pub title:       Option<Value>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<bool>, example = true)]
    pub completed:   Option<Value>,
}

/// フィールドが存在すれば `Some` で包む（`null` は `Some(Value::Null)` になる）
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn string_input(value: Value) -> FieldInput<String> {
    match value {
        Value::Null => FieldInput::Null,
        Value::String(text) => FieldInput::Value(text),
        _ => FieldInput::WrongType,
    }
}

fn bool_input(value: Value) -> FieldInput<bool> {
    match value {
        Value::Null => FieldInput::Null,
        Value::Bool(flag) => FieldInput::Value(flag),
        _ => FieldInput::WrongType,
    }
}

impl From<CreateTaskRequest> for CreateTaskInput {
    fn from(req: CreateTaskRequest) -> Self {
        Self {
            title:       req.title.map(string_input),
            description: req.description.map(string_input),
        }
    }
}

impl From<UpdateTaskRequest> for UpdateTaskInput {
    fn from(req: UpdateTaskRequest) -> Self {
        Self {
            title:       req.title.map(string_input),
            description: req.description.map(string_input),
            completed:   req.completed.map(bool_input),
        }
    }
}

/// 一覧取得のクエリパラメータ
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTasksQuery {
    /// `completed` または `pending`。それ以外は絞り込みなし
    pub status: Option<String>,
}

/// タスク DTO
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id:          Uuid,
    #[schema(example = "Buy groceries")]
    pub title:       String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Remember to buy milk and bread")]
    pub description: Option<String>,
    pub completed:   bool,
    /// RFC 3339（UTC、ミリ秒）
    #[schema(example = "2023-12-01T15:23:45.123Z")]
    pub created_at:  String,
}

impl From<&Task> for TaskDto {
    fn from(task: &Task) -> Self {
        Self {
            id:          *task.id().as_uuid(),
            title:       task.title().as_str().to_string(),
            description: task.description().map(|d| d.as_str().to_string()),
            completed:   task.completed(),
            created_at:  task.created_at().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// リクエストボディを JSON オブジェクトとして読む
///
/// 空（空白のみを含む）のボディは Content-Type によらず `{}` として扱う。
fn parse_body<T>(headers: &HeaderMap, body: &Bytes) -> Result<T, CoreError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    if !is_json_content_type(headers) {
        return Err(CoreError::BadRequest(MISSING_JSON_CONTENT_TYPE.to_string()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|_| CoreError::BadRequest(INVALID_JSON.to_string()))?;
    if !value.is_object() {
        return Err(CoreError::BadRequest(NOT_AN_OBJECT.to_string()));
    }
    serde_json::from_value(value).map_err(|_| CoreError::BadRequest(NOT_AN_OBJECT.to_string()))
}

/// `application/json` または `application/*+json`
fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .is_some_and(|mime| {
            mime.eq_ignore_ascii_case("application/json")
                || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
}

// --- ハンドラ ---

/// POST /api/tasks
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "作成されたタスク", body = TaskDto),
        (status = 400, description = "検証エラー", body = ValidationErrorResponse),
        (status = 500, description = "保存に失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_task(
    State(state): State<Arc<TaskState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, CoreError> {
    let req: CreateTaskRequest = parse_body(&headers, &body)?;
    let input = CreateTaskInput::from(req);

    let task = state
        .usecase
        .create_task(input)
        .await
        .map_err(|e| e.or_internal(CREATE_FAILED))?;

    Ok((StatusCode::CREATED, Json(TaskDto::from(&task))))
}

/// GET /api/tasks
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "tasks",
    params(ListTasksQuery),
    responses(
        (status = 200, description = "タスク一覧（作成順）", body = Vec<TaskDto>),
        (status = 500, description = "取得に失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(status = ?query.status))]
pub async fn list_tasks(
    State(state): State<Arc<TaskState>>,
    Query(query): Query<ListTasksQuery>,
) -> Result<impl IntoResponse, CoreError> {
    let filter = TaskStatusFilter::from_query(query.status.as_deref());

    let tasks = state
        .usecase
        .list_tasks(filter)
        .await
        .map_err(|e| e.or_internal(LIST_FAILED))?;

    let items: Vec<TaskDto> = tasks.iter().map(TaskDto::from).collect();
    Ok((StatusCode::OK, Json(items)))
}

/// GET /api/tasks/{id}
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "タスク ID（UUID）")),
    responses(
        (status = 200, description = "タスク", body = TaskDto),
        (status = 400, description = "ID の形式が不正", body = ErrorResponse),
        (status = 404, description = "タスクが存在しない", body = ErrorResponse),
        (status = 500, description = "取得に失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_task(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CoreError> {
    let id = TaskId::parse_str(&id)?;

    let task = state
        .usecase
        .get_task(&id)
        .await
        .map_err(|e| e.or_internal(GET_FAILED))?;

    Ok((StatusCode::OK, Json(TaskDto::from(&task))))
}

/// PUT /api/tasks/{id}
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "タスク ID（UUID）")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "更新後のタスク", body = TaskDto),
        (status = 400, description = "検証エラー", body = ValidationErrorResponse),
        (status = 404, description = "タスクが存在しない", body = ErrorResponse),
        (status = 500, description = "更新に失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_task(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, CoreError> {
    let id = TaskId::parse_str(&id)?;
    let req: UpdateTaskRequest = parse_body(&headers, &body)?;
    let input = UpdateTaskInput::from(req);

    let task = state
        .usecase
        .update_task(&id, input)
        .await
        .map_err(|e| e.or_internal(UPDATE_FAILED))?;

    Ok((StatusCode::OK, Json(TaskDto::from(&task))))
}

/// DELETE /api/tasks/{id}
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "タスク ID（UUID）")),
    responses(
        (status = 200, description = "削除成功", body = MessageResponse),
        (status = 400, description = "ID の形式が不正", body = ErrorResponse),
        (status = 404, description = "タスクが存在しない", body = ErrorResponse),
        (status = 500, description = "削除に失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_task(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CoreError> {
    let id = TaskId::parse_str(&id)?;

    state
        .usecase
        .delete_task(&id)
        .await
        .map_err(|e| e.or_internal(DELETE_FAILED))?;

    Ok((StatusCode::OK, Json(MessageResponse::new(DELETED))))
}
