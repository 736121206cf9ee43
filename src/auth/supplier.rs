use once_cell::sync::Lazy;
use tower_sessions::Session;

use super::password::{hash_password, CredentialVerifier};
use super::session::{SupplierIdentity, SupplierSession};
use super::SupplierAuthError;
use crate::database::models::SupplierProfile;
use crate::database::SupplierStore;

// Verified against when the email is unknown, so both rejections cost the same
static UNKNOWN_SUPPLIER_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("unknown-supplier-credential").ok());

/// Full profile of the session's bound supplier.
///
/// Only a bound supplier id is accepted here; the other proofs do not name a
/// record to project.
pub async fn get_self(
    session: &SupplierSession,
    store: &dyn SupplierStore,
) -> Result<SupplierProfile, SupplierAuthError> {
    let id = session.supplier_id.ok_or(SupplierAuthError::Unauthenticated)?;

    store.find_supplier_profile(id).await?.ok_or_else(|| {
        tracing::warn!(supplier_id = id, "Bound supplier has no backing record");
        SupplierAuthError::NotFound
    })
}

/// Authenticate a supplier directly and bind it to the session.
///
/// On success both the supplier id and the embedded identity are set. Every
/// rejection is the same `Unauthorized`; store failures propagate.
pub async fn login(
    session: &mut SupplierSession,
    store: &dyn SupplierStore,
    verifier: &dyn CredentialVerifier,
    email: &str,
    password: &str,
) -> Result<SupplierIdentity, SupplierAuthError> {
    if email.is_empty() || password.is_empty() {
        tracing::warn!("Supplier login rejected: empty credentials");
        return Err(SupplierAuthError::Unauthorized);
    }

    let credentials = store.find_supplier_credentials(email).await?;

    let verified = match &credentials {
        Some(credentials) => credentials
            .password_hash
            .as_deref()
            .is_some_and(|stored| verifier.verify(password, stored)),
        None => {
            if let Some(stored) = UNKNOWN_SUPPLIER_HASH.as_deref() {
                let _ = verifier.verify(password, stored);
            }
            false
        }
    };

    let Some(credentials) = credentials.filter(|_| verified) else {
        tracing::warn!("Supplier login rejected");
        return Err(SupplierAuthError::Unauthorized);
    };

    let identity = SupplierIdentity::from(&credentials.record());
    session.bind_login(identity.clone());
    tracing::info!(supplier_id = identity.id, "Supplier logged in");

    Ok(identity)
}

/// Clear the supplier facet of the web session. The general identity is
/// neither read nor written, so its shape cannot block a logout.
pub async fn logout(session: &Session) -> Result<(), SupplierAuthError> {
    if let Some(id) = SupplierSession::clear(session).await? {
        tracing::info!(supplier_id = id, "Supplier logged out");
    }
    Ok(())
}
