//! # Task Service エラー定義
//!
//! Task Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | バリアント | ステータス | ボディ |
//! |-----------|-----------|--------|
//! | `Validation` | 400 | `{"errors": [{"field", "message"}]}` |
//! | `BadRequest` | 400 | `{"error": "..."}` |
//! | `NotFound` | 404 | `{"error": "..."}` |
//! | `Database` | 500 | `{"error": "Internal server error"}` |
//! | `Internal` | 500 | `{"error": "..."}`（操作ごとの汎用メッセージ） |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use task_manager_domain::{DomainError, validation::ValidationErrors};
use task_manager_infra::InfraError;
use task_manager_shared::{ErrorResponse, FieldErrorBody, ValidationErrorResponse};
use thiserror::Error;

/// 不正な ID に対するメッセージ
pub const INVALID_TASK_ID: &str = "Invalid task id";

/// 存在しないタスクに対するメッセージ
pub const TASK_NOT_FOUND: &str = "Task not found";

/// Task Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// フィールド単位の検証エラー
    #[error("バリデーションエラー: {0}")]
    Validation(ValidationErrors),

    /// 不正なリクエスト（ID の形式、Content-Type、JSON の構文）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),

    /// 内部エラー（メッセージはそのままクライアントに返す）
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl CoreError {
    /// データベースエラーを操作ごとの汎用メッセージに置き換える
    ///
    /// 原因はここでログに出し、クライアントには `message` だけを返す。
    /// それ以外のバリアントはそのまま返す。
    pub fn or_internal(self, message: &str) -> Self {
        match self {
            CoreError::Database(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "{message}"
                );
                CoreError::Internal(message.to_string())
            }
            other => other,
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(errors) => CoreError::Validation(errors),
            DomainError::InvalidId(_) => CoreError::BadRequest(INVALID_TASK_ID.to_string()),
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        match self {
            CoreError::Validation(errors) => {
                let body = ValidationErrorResponse {
                    errors: errors
                        .into_errors()
                        .into_iter()
                        .map(|e| FieldErrorBody {
                            field:   e.field,
                            message: e.message,
                        })
                        .collect(),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            CoreError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            CoreError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new(msg))).into_response()
            }
            CoreError::Database(e) => {
                tracing::error!(error = %e, span_trace = %e.span_trace(), "データベースエラー");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Internal server error")),
                )
                    .into_response()
            }
            CoreError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(msg)),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use task_manager_domain::validation::FieldError;

    use super::*;

    async fn into_parts(error: CoreError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validationは400とerrors配列を返す() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::new("title", "Title is required"));

        let (status, body) = into_parts(CoreError::Validation(errors)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({
                "errors": [{ "field": "title", "message": "Title is required" }]
            })
        );
    }

    #[tokio::test]
    async fn test_not_foundは404とerrorを返す() {
        let (status, body) = into_parts(CoreError::NotFound(TASK_NOT_FOUND.to_string())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Task not found" }));
    }

    #[tokio::test]
    async fn test_databaseエラーは詳細を返さない() {
        let error = CoreError::Database(InfraError::unexpected("接続が切れました"));

        let (status, body) = into_parts(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_or_internalはdatabaseエラーを汎用メッセージに置き換える() {
        let error = CoreError::Database(InfraError::unexpected("接続が切れました"))
            .or_internal("An error occurred while fetching tasks");

        let (status, body) = into_parts(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({ "error": "An error occurred while fetching tasks" })
        );
    }

    #[test]
    fn test_or_internalはdatabase以外を変えない() {
        let error = CoreError::NotFound(TASK_NOT_FOUND.to_string()).or_internal("unused");

        assert!(matches!(error, CoreError::NotFound(msg) if msg == TASK_NOT_FOUND));
    }

    #[test]
    fn test_ドメインの検証エラーはvalidationに変換される() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::new("completed", "Completed must be a boolean value"));

        let error = CoreError::from(DomainError::from(errors.clone()));

        assert!(matches!(error, CoreError::Validation(e) if e == errors));
    }

    #[test]
    fn test_不正なidはbad_requestに変換される() {
        let error = CoreError::from(DomainError::InvalidId("abc".to_string()));

        assert!(matches!(error, CoreError::BadRequest(msg) if msg == "Invalid task id"));
    }
}
