#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{extract::Json, http::StatusCode, routing::post, Router};
use serde_json::Value;
use tower_sessions::{MemoryStore, Session, SessionManagerLayer};

use supplier_auth_bridge::auth::session::USER_KEY;
use supplier_auth_bridge::auth::hash_password;
use supplier_auth_bridge::database::models::{SupplierId, SupplierProfile};
use supplier_auth_bridge::database::MemorySupplierStore;
use supplier_auth_bridge::{routes, AppState};

/// The real router on a loopback port, backed by an in-memory supplier store.
///
/// One extra route, `/test/general-identity`, plays the platform's primary
/// auth system: POST places a general identity in the session as given, in
/// any shape, and GET reads it back.
pub struct TestServer {
    pub base_url: String,
    pub store: MemorySupplierStore,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let store = MemorySupplierStore::new();
        let state = AppState::new(Arc::new(store.clone()));

        let app = routes(state)
            .merge(Router::new().route(
                "/test/general-identity",
                post(seed_general_identity).get(read_general_identity),
            ))
            .layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false));

        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("test server stopped: {}", e);
            }
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            store,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A client with its own cookie jar, i.e. its own session
    pub fn client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder().cookie_store(true).build()?)
    }

    pub async fn add_supplier(&self, id: SupplierId, email: &str, password: Option<&str>) -> Result<()> {
        let hash = match password {
            Some(password) => Some(hash_password(password).map_err(|e| anyhow::anyhow!("{}", e))?),
            None => None,
        };
        self.store
            .insert(SupplierProfile::new(id, format!("Supplier {}", id), email), hash)
            .await;
        Ok(())
    }

    pub async fn sign_in_general(&self, client: &reqwest::Client, identity: Value) -> Result<()> {
        let res = client
            .post(self.url("/test/general-identity"))
            .json(&identity)
            .send()
            .await?;
        anyhow::ensure!(res.status() == reqwest::StatusCode::NO_CONTENT, "seeding failed: {}", res.status());
        Ok(())
    }

    pub async fn general_identity(&self, client: &reqwest::Client) -> Result<Value> {
        Ok(client
            .get(self.url("/test/general-identity"))
            .send()
            .await?
            .json()
            .await?)
    }

    pub async fn login(&self, client: &reqwest::Client, email: &str, password: &str) -> Result<reqwest::Response> {
        Ok(client
            .post(self.url("/suppliers/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?)
    }
}

async fn seed_general_identity(session: Session, Json(identity): Json<Value>) -> StatusCode {
    match session.insert(USER_KEY, identity).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn read_general_identity(session: Session) -> Json<Value> {
    let identity: Option<Value> = session.get(USER_KEY).await.unwrap_or(None);
    Json(identity.unwrap_or(Value::Null))
}
