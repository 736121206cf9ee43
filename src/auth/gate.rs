use super::bridge::resolve;
use super::evidence::EvidenceSet;
use super::session::SupplierSession;
use super::SupplierAuthError;
use crate::database::SupplierStore;

/// Decide whether the session may proceed as an authenticated supplier.
///
/// Runs the bridge once first, so a supplier-role user can gain a bound id in
/// the same request. Any single proof passes. The failure is always
/// `Unauthenticated`, whatever the bridge did.
pub async fn authorize(
    session: &mut SupplierSession,
    store: &dyn SupplierStore,
) -> Result<EvidenceSet, SupplierAuthError> {
    let outcome = resolve(session, store).await;
    let evidence = EvidenceSet::from_session(session);

    if evidence.any() {
        Ok(evidence)
    } else {
        tracing::debug!(bridge = outcome.as_str(), "Supplier gate rejected session");
        Err(SupplierAuthError::Unauthenticated)
    }
}

pub async fn is_supplier_authenticated(session: &mut SupplierSession, store: &dyn SupplierStore) -> bool {
    authorize(session, store).await.is_ok()
}
