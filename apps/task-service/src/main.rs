//! # Task Service サーバー
//!
//! タスクの作成・取得・更新・削除を提供する REST API サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `CORS_ALLOWED_ORIGINS` | No | 許可するオリジン（カンマ区切り、未設定で全許可） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/task_manager cargo run -p task-manager-task-service
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use task_manager_domain::clock::SystemClock;
use task_manager_infra::{
    db::{self, PgConnectionCheck},
    repository::PostgresTaskRepository,
};
use task_manager_shared::observability::{TracingConfig, init_tracing};
use task_manager_task_service::{
    app_builder::{API_DOCS_PATH, build_app, build_cors_layer},
    config::TaskServiceConfig,
    handler::{ReadinessState, TaskState},
    usecase::TaskUseCaseImpl,
};
use tokio::net::TcpListener;
use tracing::Instrument as _;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("task-service"));

    let app_span = tracing::info_span!("app", service = "task-service");
    if let Err(e) = run().instrument(app_span).await {
        tracing::error!(error = ?e, "Task Service の起動に失敗しました");
        return Err(e);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let config = TaskServiceConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!("Task Service サーバーを起動します: {}", config.bind_address());

    // データベース接続プールの作成とマイグレーション
    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    // 依存コンポーネントを初期化
    let task_repository = Arc::new(PostgresTaskRepository::new(pool.clone()));
    let usecase = TaskUseCaseImpl::new(task_repository, Arc::new(SystemClock));
    let task_state = Arc::new(TaskState { usecase });
    let readiness_state = Arc::new(ReadinessState {
        database: Arc::new(PgConnectionCheck::new(pool)),
    });

    let app = build_app(
        task_state,
        readiness_state,
        build_cors_layer(&config.cors_allowed_origins),
    );

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("{} へのバインドに失敗しました", config.bind_address()))?;
    let addr = listener.local_addr()?;
    tracing::info!("Task Service サーバーが起動しました: {}", addr);
    tracing::info!("API ドキュメント: http://{}{}", addr, API_DOCS_PATH);

    axum::serve(listener, app).await?;

    Ok(())
}
