//! # OpenAPI 仕様定義
//!
//! utoipa を使用して Task Manager API の OpenAPI 仕様を Rust の型から生成する。
//! `ApiDoc::openapi()` で OpenAPI ドキュメントを取得できる。
//! 実行中のサーバーでは `/api-docs` で Swagger UI として閲覧できる。

use task_manager_shared::{
    CheckStatus,
    ErrorResponse,
    FieldErrorBody,
    HealthResponse,
    MessageResponse,
    ReadinessResponse,
    ReadinessStatus,
    ValidationErrorResponse,
};
use utoipa::OpenApi;

use crate::handler::{
    health,
    task::{self, CreateTaskRequest, TaskDto, UpdateTaskRequest},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task Manager API",
        version = "1.0.0",
        description = "A simple Task Manager API as a personal Project"
    ),
    paths(
        // health
        health::health_check,
        health::readiness_check,
        // tasks
        task::create_task,
        task::list_tasks,
        task::get_task,
        task::update_task,
        task::delete_task,
    ),
    components(schemas(
        TaskDto,
        CreateTaskRequest,
        UpdateTaskRequest,
        ErrorResponse,
        FieldErrorBody,
        ValidationErrorResponse,
        MessageResponse,
        HealthResponse,
        ReadinessResponse,
        ReadinessStatus,
        CheckStatus,
    )),
    tags(
        (name = "tasks", description = "タスクの作成・取得・更新・削除"),
        (name = "health", description = "ヘルスチェック"),
    )
)]
pub struct ApiDoc;
