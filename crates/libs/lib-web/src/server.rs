//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module provides the main server setup function that creates the Axum router,
//! registers all routes, applies middleware, and starts the HTTP server.

// region: --- Imports
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use lib_core::Config;
use lib_pinning::{PinataClient, PinningService};
use lib_solana::{Network, SolanaClient, TokenChain};
use crate::handlers;
use crate::middleware::{stamp_req, log_requests};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
// endregion: --- Imports

/// Room for the text fields and multipart framing on top of the image itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub chain: Arc<dyn TokenChain>,
    pub pinning: Arc<dyn PinningService>,
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<dyn TokenChain> {
    fn from_ref(state: &AppState) -> Self {
        state.chain.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<dyn PinningService> {
    fn from_ref(state: &AppState) -> Self {
        state.pinning.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address override; `BIND_ADDRESS` from the environment when `None`
    pub bind_address: Option<String>,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: None,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - The pinning HTTP client cannot be built
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => tracing_subscriber::EnvFilter::new(&log_level),
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    info!(" TOKEN MINT STUDIO BACKEND STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let network = Network::from_name(&app_config.solana_network)
        .ok_or_else(|| anyhow::anyhow!("Unknown SOLANA_NETWORK '{}'", app_config.solana_network))?;
    match network {
        Network::Mainnet => info!("MAINNET MODE - Using Solana Mainnet"),
        Network::Devnet => info!("DEVNET MODE - Using Solana Devnet"),
    }

    info!(" Connecting to Solana...");
    let solana = SolanaClient::builder()
        .network(network)
        .helius_api_key(app_config.helius_api_key.clone())
        .custom_rpc_url(app_config.solana_rpc_url.clone())
        .build();
    if let Err(e) = solana.health_check().await {
        tracing::warn!("Solana RPC health check failed: {}, continuing", e);
    }

    info!(" Pinning through {}", app_config.pinata_api_url);
    let pinata = PinataClient::new(
        app_config.pinata_api_url.clone(),
        app_config.pinata_gateway_url.clone(),
        app_config.pinata_jwt.clone(),
    )?;

    let bind_address = config
        .bind_address
        .clone()
        .unwrap_or_else(|| app_config.bind_address.clone());

    let state = AppState {
        config: app_config,
        chain: Arc::new(solana),
        pinning: Arc::new(pinata),
    };

    let app = create_router(state, config.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!(" SERVER READY: http://{}", bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    use axum::http::{HeaderValue, Method};

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let body_limit = state.config.max_image_bytes + FORM_OVERHEAD_BYTES;

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/api/token/prepare", post(handlers::token::prepare_token))
        .route("/api/token/submit", post(handlers::token::submit_token))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(axum::middleware::from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<crate::middleware::mw_req_stamp::RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_failure(|error: tower_http::classify::ServerErrorsFailureClass, latency: std::time::Duration, span: &tracing::Span| {
                    let _enter = span.enter();
                    tracing::error!(
                        error = ?error,
                        latency_ms = latency.as_millis(),
                        "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                        error,
                        latency.as_millis()
                    );
                })
        )
        // Outermost after CORS so the logging and trace layers see the request ID
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" TOKEN CREATION:");
    info!("   • POST /api/token/prepare (multipart: owner, name, symbol, decimals, amount, description, image)");
    info!("   • POST /api/token/submit");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
