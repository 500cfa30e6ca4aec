//! # Task Manager 共有ユーティリティ
//!
//! HTTP レスポンスの共通型とトレーシング基盤を提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` 変換はサービス側の責務）
//! - OpenAPI スキーマは `openapi` feature、トレーシング初期化は `observability` feature

pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::{ErrorResponse, FieldErrorBody, MessageResponse, ValidationErrorResponse};
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
