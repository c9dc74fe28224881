//! HTTP front end for the portfolio analyzer.
//!
//! Serves the embedded single-page UI and the JSON API it talks to.

pub mod analyze_routes;
pub mod config;
pub mod embedded_frontend;
pub mod markdown;
pub mod request_id;
pub mod security_headers;


use analysis_core::AnalysisError;
use analysis_orchestrator::AnalysisOrchestrator;
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, State},
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use llm_client::LlmConfig;
use portfolio_reader::PdfError;
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

pub use config::ServerConfig;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: AnalysisOrchestrator,
    /// Request body cap applied to every route
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(orchestrator: AnalysisOrchestrator, max_upload_bytes: usize) -> Self {
        Self {
            orchestrator,
            max_upload_bytes,
        }
    }
}

/// Envelope for every JSON response
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Handler error rendered as an `ApiResponse` with a matching status code
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn with_status(status: StatusCode, error: anyhow::Error) -> Self {
        Self { status, error }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// A multipart read failure. Tripping the body limit reports the limit.
    pub fn from_multipart(error: MultipartError, max_upload_bytes: usize) -> Self {
        let status = error.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::with_status(
                status,
                anyhow::anyhow!(
                    "Upload too large. The maximum request size is {}.",
                    format_size(max_upload_bytes)
                ),
            );
        }
        Self::with_status(status, anyhow::anyhow!("Invalid upload: {}", error.body_text()))
    }
}

fn format_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.error.to_string();
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), "{}", message);
        } else {
            tracing::warn!(status = self.status.as_u16(), "{}", message);
        }
        (self.status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, error)
    }
}

impl From<AnalysisError> for AppError {
    fn from(error: AnalysisError) -> Self {
        let status = match &error {
            e if e.is_input_error() => StatusCode::BAD_REQUEST,
            AnalysisError::Llm(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::with_status(status, error.into())
    }
}

impl From<PdfError> for AppError {
    fn from(error: PdfError) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, error.into())
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stock Portfolio Analyzer API",
        description = "Upload a portfolio statement or describe it in text and get keep / sell / buy recommendations."
    ),
    paths(analyze_routes::analyze_portfolio, health_check),
    components(schemas(
        analyze_routes::AnalyzeForm,
        analyze_routes::AnalyzeResponse,
        analysis_core::Recommendation,
        analysis_core::RecommendationSections,
        analysis_core::TokenUsage,
        analysis_core::PortfolioSource,
    )),
    tags((name = "Analysis", description = "Portfolio recommendations"))
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "Analysis"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "backend": state.orchestrator.backend_name(),
        "model": state.orchestrator.model(),
    }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid origin in ALLOWED_ORIGINS: {}", o);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}

/// Builds the app. The body limit comes from `state`; CORS from `config`.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(embedded_frontend::index_handler))
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(analyze_routes::analyze_routes())
        .fallback(embedded_frontend::static_handler)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(middleware::from_fn(security_headers::security_headers_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = tracing::field::Empty,
                )
            }),
        );

    if let Some(cors) = cors_layer(&config.allowed_origins) {
        router = router.layer(cors);
    }

    router.with_state(state)
}

/// Install the global tracing subscriber; `RUST_LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    if json_logging {
        tracing_subscriber::fmt().json().with_env_filter(env_filter()).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    let llm_config = LlmConfig::from_env()?;
    tracing::info!(
        model = %llm_config.model,
        base_url = %llm_config.base_url,
        "Completion provider configured"
    );

    let orchestrator = AnalysisOrchestrator::with_groq(llm_config)?;
    let app = build_router(AppState::new(orchestrator, config.max_upload_bytes), &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Stock Portfolio Analyzer listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
