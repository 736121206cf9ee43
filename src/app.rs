use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::auth::{Argon2Verifier, CredentialVerifier};
use crate::config::{AppConfig, SecurityConfig};
use crate::database::SupplierStore;
use crate::handlers::{protected, public};
use crate::middleware::supplier_gate_middleware;

/// Shared collaborators handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SupplierStore>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn SupplierStore>) -> Self {
        Self {
            store,
            verifier: Arc::new(Argon2Verifier),
        }
    }
}

/// Routes without the session layer, so callers can add their own
pub fn routes(state: AppState) -> Router {
    let protected = Router::new()
        .route("/suppliers/me", get(protected::suppliers::me))
        .route("/suppliers/session", get(protected::suppliers::session_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), supplier_gate_middleware));

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/suppliers/login", post(public::suppliers::login))
        .route("/suppliers/logout", post(public::suppliers::logout))
        // Supplier gate
        .merge(protected)
        .with_state(state)
}

/// Full application: routes, session layer, CORS and request tracing per config
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = routes(state).layer(session_layer(&config.security));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

pub fn session_layer(security: &SecurityConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(security.secure_cookies)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(
            security.session_inactivity_hours,
        )))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    // Session cookies need credentialed CORS, which rules out wildcards
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Supplier Auth Bridge",
            "version": version,
            "description": "Reconciles platform user sessions with supplier accounts",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "login": "POST /suppliers/login (public)",
                "logout": "POST /suppliers/logout (public)",
                "me": "GET /suppliers/me (supplier)",
                "session": "GET /suppliers/session (supplier)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
