use color_eyre::Result;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use game_design_core::{AppConfig, GameDesignService};
use game_design_web::{app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // エラーハンドリングの初期化
    color_eyre::install()?;

    // 環境変数のロード（.envがなければ無視）
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    // ロギングの初期化: 標準出力 + (LOG_DIR指定時のみ) 日次ローテーションのファイル
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,game_design_web=debug,game_design_core=debug,tower_http=debug"))?;

    let (file_layer, _guard) = match &config.server.log_dir {
        Some(dir) => {
            let file_appender = rolling::daily(dir, "game-design-agent.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false); // ファイルにANSIカラー不要
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    tracing::info!(
        target: "game_design_web",
        model = %config.openai.model,
        json_mode = config.openai.json_mode,
        temperature = config.openai.temperature,
        schema_mode = %config.schema_mode,
        "Starting game design expert agent..."
    );

    // モデルクライアントは起動時に一度だけ作成して共有する
    let service = GameDesignService::from_config(&config)?;
    let router = app(AppState::new(service));

    // サーバー起動
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.server.port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!(target: "game_design_web", "🚀 Server running on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
