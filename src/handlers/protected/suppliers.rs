use axum::extract::{Extension, State};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::{get_self, EvidenceKind};
use crate::database::models::{SupplierId, SupplierProfile};
use crate::middleware::{ApiResponse, ApiResult, SupplierContext};

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub supplier_id: Option<SupplierId>,
    pub evidence: Vec<EvidenceKind>,
}

/// GET /suppliers/me - Full profile of the bound supplier
///
/// Needs a bound supplier id; a session admitted only by the role flag or an
/// embedded identity gets 401. A bound id whose record is gone gets 404.
pub async fn me(
    State(state): State<AppState>,
    Extension(ctx): Extension<SupplierContext>,
) -> ApiResult<SupplierProfile> {
    let profile = get_self(&ctx.session, state.store.as_ref()).await?;
    Ok(ApiResponse::success(profile))
}

/// GET /suppliers/session - Which supplier proofs the session carries
pub async fn session_status(Extension(ctx): Extension<SupplierContext>) -> ApiResponse<SessionStatus> {
    ApiResponse::success(SessionStatus {
        authenticated: ctx.evidence.any(),
        supplier_id: ctx.session.supplier_id,
        evidence: ctx.evidence.kinds(),
    })
}
