use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

use crate::app::AppState;
use crate::auth::{authorize, EvidenceSet, SupplierSession};
use crate::error::ApiError;

/// Supplier view of the request, injected once the gate has passed
#[derive(Clone, Debug)]
pub struct SupplierContext {
    pub session: SupplierSession,
    pub evidence: EvidenceSet,
}

/// Middleware that admits only requests acting for a supplier.
///
/// Loads the supplier slice of the web session, lets the bridge bind a
/// supplier id if it can, and rejects with a uniform 401 when no proof is
/// present. A new binding is written back before the handler runs.
pub async fn supplier_gate_middleware(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let mut supplier_session = SupplierSession::load(&session).await?;
    let was_bound = supplier_session.is_bound();

    let evidence = authorize(&mut supplier_session, state.store.as_ref()).await;

    if !was_bound && supplier_session.is_bound() {
        // Not persisting only costs a repeat lookup on the next request
        if let Err(e) = supplier_session.persist(&session).await {
            tracing::warn!("Failed to persist bridged supplier id: {}", e);
        }
    }

    let evidence = evidence?;
    request.extensions_mut().insert(SupplierContext {
        session: supplier_session,
        evidence,
    });

    Ok(next.run(request).await)
}
