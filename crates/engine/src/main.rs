//! Infinite Craft Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use infcraft_engine::api;
use infcraft_engine::infrastructure::{
    clock::SystemClock,
    config::{EngineConfig, VocabularyStorage},
    openai_compat::OpenAiCompatClient,
    persistence::{InMemoryVocabularyRepo, SqliteVocabularyRepo},
    ports::{ClockPort, VocabularyRepo},
    resilient_llm::ResilientLlmClient,
    word_generator::LlmWordGenerator,
};
use infcraft_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "infcraft_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Infinite Craft Engine");

    let config = EngineConfig::from_env();
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    // Generation stack: HTTP client, retries, prompt + parsing
    let llm_client = Arc::new(OpenAiCompatClient::new(
        &config.llm_base_url,
        &config.llm_model,
        config.llm_api_key.clone(),
        config.llm_timeout,
    ));
    tracing::info!(
        base_url = %config.llm_base_url,
        model = %config.llm_model,
        authenticated = config.llm_api_key.is_some(),
        "LLM client configured with retry: max_retries={}, base_delay_ms={}",
        config.retry.max_retries,
        config.retry.base_delay_ms
    );
    let llm = Arc::new(ResilientLlmClient::new(llm_client, config.retry.clone()));
    let generator = Arc::new(LlmWordGenerator::new(llm));

    let repo: Arc<dyn VocabularyRepo> = match &config.storage {
        VocabularyStorage::Sqlite(path) => {
            tracing::info!(path = %path, "Using SQLite vocabulary storage");
            Arc::new(SqliteVocabularyRepo::new(path).await?)
        }
        VocabularyStorage::InMemory => {
            tracing::warn!("Using in-memory vocabulary storage; discoveries are lost on restart");
            Arc::new(InMemoryVocabularyRepo::new())
        }
    };

    let app = Arc::new(App::new(repo, generator, clock));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
