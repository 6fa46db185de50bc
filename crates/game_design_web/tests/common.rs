#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use color_eyre::eyre::eyre;
use game_design_core::{
    CompletionRequest, GameDesignService, GenerationSettings, ModelClient, SchemaMode,
};
use game_design_web::{app, AppState};
use once_cell::sync::Lazy;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static START: Once = Once::new();
static _GUARD: Lazy<Mutex<Option<tracing_appender::non_blocking::WorkerGuard>>> =
    Lazy::new(|| Mutex::new(None));

/// Initialize test environment: dotenv and tracing (stderr + file).
/// Idempotent: safe to call multiple times.
pub fn init() {
    START.call_once(|| {
        let _ = dotenvy::dotenv();
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .expect("env filter");

        // Daily rotating log file separate from app runtime logs
        let file_appender = rolling::daily("logs", "tests.log");
        let (file_nb, guard) = tracing_appender::non_blocking(file_appender);
        *_GUARD.lock().unwrap() = Some(guard); // retain guard for lifetime

        let stderr_layer = fmt::layer()
            .with_target(true)
            .with_test_writer();

        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(file_nb);

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .try_init();

        tracing::info!(target: "test_init", "Test tracing initialized (stderr + rotating file)");
    });
}

/// Model client stub: records every request and returns a canned reply.
pub struct StubModel {
    reply: Result<String, String>,
    pub calls: Mutex<Vec<CompletionRequest>>,
}

impl StubModel {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(text.to_string()), calls: Mutex::new(Vec::new()) })
    }

    pub fn failing(msg: &str) -> Arc<Self> {
        Arc::new(Self { reply: Err(msg.to_string()), calls: Mutex::new(Vec::new()) })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelClient for StubModel {
    async fn complete(&self, request: &CompletionRequest) -> color_eyre::Result<String> {
        self.calls.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(|m| eyre!(m))
    }
}

/// Build the router around the given stub.
pub fn router_with(stub: Arc<StubModel>) -> axum::Router {
    let settings = GenerationSettings {
        model: "gpt-4o".to_string(),
        temperature: 0.6,
        json_mode: true,
        max_tokens: 4096,
        schema_mode: SchemaMode::Fixed,
    };
    app(AppState::new(GameDesignService::new(stub, settings)))
}
