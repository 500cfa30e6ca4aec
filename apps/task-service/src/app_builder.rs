//! # アプリケーション構築
//!
//! State を受け取ってルーターを組み立てる。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use task_manager_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    handler::{
        ReadinessState,
        TaskState,
        create_task,
        delete_task,
        get_task,
        health_check,
        list_tasks,
        readiness_check,
        update_task,
    },
    openapi::ApiDoc,
};

/// Swagger UI のパス
pub const API_DOCS_PATH: &str = "/api-docs";

/// OpenAPI JSON のパス
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// CORS レイヤーを構築する
///
/// `allowed_origins` が空なら全オリジンを許可する。
/// ヘッダー値として不正なオリジンは警告を出して読み飛ばす。
pub fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let mut parsed = Vec::new();
    for origin in allowed_origins {
        match HeaderValue::from_str(origin) {
            Ok(value) => parsed.push(value),
            Err(err) => tracing::warn!("ignoring invalid CORS origin '{origin}': {err}"),
        }
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// ルーターを構築する
pub fn build_app(
    task_state: Arc<TaskState>,
    readiness_state: Arc<ReadinessState>,
    cors: CorsLayer,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        // タスク API
        .merge(
            Router::new()
                .route("/api/tasks", get(list_tasks).post(create_task))
                .route(
                    "/api/tasks/{id}",
                    get(get_task).put(update_task).delete(delete_task),
                )
                .with_state(task_state),
        )
        // API ドキュメント
        .merge(SwaggerUi::new(API_DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        // 下に書いたものが外側
        // 1. SetRequestIdLayer（最外）: UUID v7 を発行（またはクライアント提供値を使用）
        // 2. TraceLayer: request_id を含むスパンを作り、リクエスト中のログに紐付ける
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
