//! # エラーレスポンス
//!
//! API が返すエラー・メッセージ系レスポンスのボディ。
//!
//! | 型 | 形状 | 用途 |
//! |----|------|------|
//! | [`ErrorResponse`] | `{"error": "..."}` | 404 / 500 / 不正なリクエスト |
//! | [`ValidationErrorResponse`] | `{"errors": [{"field", "message"}]}` | フィールド検証失敗 |
//! | [`MessageResponse`] | `{"message": "..."}` | 削除成功など |

use serde::{Deserialize, Serialize};

/// 単一メッセージのエラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// エラーメッセージ
    #[cfg_attr(feature = "openapi", schema(example = "Task not found"))]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// 検証エラー 1 件分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldErrorBody {
    /// 失敗したフィールド名
    #[cfg_attr(feature = "openapi", schema(example = "title"))]
    pub field:   String,
    /// 人間可読なメッセージ
    #[cfg_attr(feature = "openapi", schema(example = "Title is required"))]
    pub message: String,
}

/// 検証エラーのレスポンス
///
/// 失敗したすべてのフィールドを検証順に含む。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldErrorBody>,
}

/// 成功メッセージのレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    #[cfg_attr(feature = "openapi", schema(example = "Task deleted successfully"))]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
