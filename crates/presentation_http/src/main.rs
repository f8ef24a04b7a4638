//! MailTriage HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use ai_core::config::DEFAULT_SYSTEM_PROMPT;
use application::{
    TriageService,
    ports::{ClassifierPort, InferencePort},
};
use infrastructure::{
    AppConfig, CachedClassifier, FallbackClassifier, KeywordClassifier, LlmInferenceAdapter,
    NullInference, TemplateEngine, ZeroShotClassifierAdapter,
};
use integration_classifier::ZeroShotClient;
use presentation_http::{
    AppState, RequestIdLayer, error::set_expose_internal_errors, routes,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config decides the log format, so load it before tracing is up
    // and report any load failure right after.
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config.server.log_format);

    info!("📬 MailTriage v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(e) = config_error {
        tracing::warn!("Failed to load config, using defaults: {e}");
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        classifier = %config.classifier.endpoint,
        "Configuration loaded"
    );

    // Restricted origins mark a production deployment; stop exposing
    // internal error details there.
    set_expose_internal_errors(config.server.allowed_origins.is_empty());

    let classifier = build_classifier(&config)?;
    let inference = build_inference(&config)?;

    let templates = TemplateEngine::new()
        .map_err(|e| anyhow::anyhow!("Failed to initialize reply templates: {e}"))?
        .with_signature(config.reply.agent_name.clone(), config.reply.team_name.clone());

    let triage_service = TriageService::new(classifier, inference, Arc::new(templates));

    let config = Arc::new(config);
    let state = AppState {
        triage_service: Arc::new(triage_service),
        config: Arc::clone(&config),
    };

    let mut app = routes::create_router(state)
        .layer(RequestBodyLimitLayer::new(
            config.server.max_body_size_json_bytes,
        ))
        .layer(TraceLayer::new_for_http());

    if config.server.cors_enabled {
        app = app.layer(build_cors_layer(&config.server.allowed_origins));
    }

    // Outermost so every trace event carries the correlation ID.
    let app = app.layer(RequestIdLayer::new());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{addr}");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

fn init_tracing(log_format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mailtriage_server=debug,presentation_http=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Assemble the classifier stack: hosted model, optionally cached,
/// optionally falling back to the offline keyword rules.
fn build_classifier(config: &AppConfig) -> anyhow::Result<Arc<dyn ClassifierPort>> {
    let client = ZeroShotClient::new(config.classifier.to_client_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialize classifier client: {e}"))?;
    let hosted = ZeroShotClassifierAdapter::new(client).with_retry(config.retry.clone());

    let mut classifier: Arc<dyn ClassifierPort> = Arc::new(hosted);

    if config.cache.enabled {
        classifier = Arc::new(CachedClassifier::new(
            classifier,
            config.cache.ttl(),
            config.cache.max_entries,
        ));
    }

    if config.classifier.fallback_enabled {
        classifier = Arc::new(FallbackClassifier::new(
            classifier,
            Arc::new(KeywordClassifier::new()),
        ));
    }

    Ok(classifier)
}

/// Build the reply generation port, degrading to template-only mode
/// when no provider is configured.
fn build_inference(config: &AppConfig) -> anyhow::Result<Arc<dyn InferencePort>> {
    let engine = config
        .llm
        .build_engine()
        .map_err(|e| anyhow::anyhow!("Failed to initialize reply generation: {e}"))?;

    Ok(match engine {
        Some(engine) => {
            info!(
                provider = engine.name(),
                model = engine.default_model(),
                "Reply generation enabled"
            );
            Arc::new(LlmInferenceAdapter::new(engine, DEFAULT_SYSTEM_PROMPT))
        },
        None => {
            info!("Reply generation disabled, serving template replies only");
            Arc::new(NullInference::new())
        },
    })
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production mode: restrict to configured origins
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {timeout:?} for connections to close...");
}
