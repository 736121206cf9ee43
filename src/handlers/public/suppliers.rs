use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::app::AppState;
use crate::auth::{self, SupplierSession};
use crate::database::models::SupplierId;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: SupplierId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

/// POST /suppliers/login - Authenticate a supplier and bind it to the session
///
/// Expected Input:
/// ```json
/// { "email": "string", "password": "string" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "success": true, "data": { "id": 42, "name": "Acme", "email": "s@x.com" } }
/// ```
///
/// Unknown email and wrong password both answer 401 with the same body.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(payload) = payload?;

    let mut supplier_session = SupplierSession::load(&session).await?;
    let identity = auth::login(
        &mut supplier_session,
        state.store.as_ref(),
        state.verifier.as_ref(),
        &payload.email,
        &payload.password,
    )
    .await?;

    // New session id for the newly privileged session
    session.cycle_id().await.map_err(auth::SupplierAuthError::from)?;
    supplier_session.persist(&session).await?;

    Ok(ApiResponse::success(LoginResponse {
        id: identity.id,
        name: identity.name,
        email: identity.email,
    }))
}

/// POST /suppliers/logout - Drop the supplier facet of the session
///
/// Always answers 200; `logged_out` is false only when the session store
/// failed. The platform user stays logged in.
pub async fn logout(session: Session) -> ApiResponse<LogoutResponse> {
    let logged_out = match auth::logout(&session).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Failed to clear supplier session: {}", e);
            false
        }
    };

    ApiResponse::success(LogoutResponse { logged_out })
}
