use super::session::SupplierSession;
use crate::database::models::SupplierId;
use crate::database::SupplierStore;

/// What a bridge attempt did. Every variant except `Bound` leaves the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeOutcome {
    /// A supplier id was already bound; nothing looked up
    AlreadyBound,
    /// No general identity, or its role is not `supplier`
    NotApplicable,
    /// Supplier-role identity without an email to key the lookup
    MissingEmail,
    /// Lookup matched and the id is now bound
    Bound(SupplierId),
    /// Lookup found no supplier; retried on the next request
    NoMatch,
    /// Lookup failed; the request carries on unbridged
    StoreFailed,
}

impl BridgeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeOutcome::AlreadyBound => "already_bound",
            BridgeOutcome::NotApplicable => "not_applicable",
            BridgeOutcome::MissingEmail => "missing_email",
            BridgeOutcome::Bound(_) => "bound",
            BridgeOutcome::NoMatch => "no_match",
            BridgeOutcome::StoreFailed => "store_error",
        }
    }
}

/// Bind a supplier id to a session that only carries a supplier-role general identity.
///
/// Never fails: a store error is logged and reported as
/// [`BridgeOutcome::StoreFailed`] so the caller decides without it. A bound
/// id is never overwritten, which makes repeated calls no-ops. Misses are not
/// cached; the next request looks up again.
pub async fn resolve(session: &mut SupplierSession, store: &dyn SupplierStore) -> BridgeOutcome {
    if session.is_bound() {
        tracing::debug!(outcome = "already_bound", "Supplier bridge skipped");
        return BridgeOutcome::AlreadyBound;
    }

    if !session.has_supplier_role() {
        tracing::debug!(outcome = "not_applicable", "Supplier bridge skipped");
        return BridgeOutcome::NotApplicable;
    }

    let general_id = session.general.as_ref().map(|general| general.id);
    let Some(email) = session.bridge_email() else {
        tracing::debug!(outcome = "missing_email", ?general_id, "Supplier bridge skipped");
        return BridgeOutcome::MissingEmail;
    };

    let lookup = store.find_supplier_by_email(email).await;
    match lookup {
        Ok(Some(record)) => {
            session.supplier_id = Some(record.id);
            tracing::info!(outcome = "bound", ?general_id, supplier_id = record.id, "Supplier bridged from general identity");
            BridgeOutcome::Bound(record.id)
        }
        Ok(None) => {
            tracing::debug!(outcome = "no_match", ?general_id, "No supplier record for general identity");
            BridgeOutcome::NoMatch
        }
        Err(error) => {
            tracing::warn!(outcome = "store_error", ?general_id, %error, "Supplier bridge skipped after store failure");
            BridgeOutcome::StoreFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::{GeneralIdentity, SupplierIdentity};
    use crate::auth::SUPPLIER_ROLE;
    use crate::database::models::{SupplierCredentials, SupplierProfile, SupplierRecord};
    use crate::database::{MemorySupplierStore, StoreError};
    use async_trait::async_trait;
    use std::time::Duration;

    fn general_session(role: &str, email: Option<&str>) -> SupplierSession {
        SupplierSession::with_general(GeneralIdentity {
            id: 7,
            email: email.map(str::to_string),
            role: Some(role.to_string()),
        })
    }

    async fn store_with(id: SupplierId, email: &str) -> MemorySupplierStore {
        let store = MemorySupplierStore::new();
        store.insert(SupplierProfile::new(id, "Acme", email), None).await;
        store
    }

    #[tokio::test]
    async fn binds_matching_supplier() {
        let store = store_with(42, "a@b.com").await;
        let mut session = general_session("supplier", Some("a@b.com"));

        assert_eq!(resolve(&mut session, &store).await, BridgeOutcome::Bound(42));
        assert_eq!(session.supplier_id, Some(42));
        assert_eq!(session.supplier, None);
    }

    #[tokio::test]
    async fn bound_session_is_left_alone_whatever_the_general_identity() {
        let store = store_with(42, "a@b.com").await;
        let mut session = general_session("supplier", Some("a@b.com"));
        session.supplier_id = Some(99);
        let before = session.clone();

        assert_eq!(resolve(&mut session, &store).await, BridgeOutcome::AlreadyBound);
        assert_eq!(session, before);
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn repeated_resolution_is_a_no_op() {
        let store = store_with(42, "a@b.com").await;
        let mut session = general_session("supplier", Some("a@b.com"));

        resolve(&mut session, &store).await;
        let bound = session.clone();
        assert_eq!(resolve(&mut session, &store).await, BridgeOutcome::AlreadyBound);
        assert_eq!(session, bound);
        assert_eq!(store.lookup_count(), 1);
    }

    #[tokio::test]
    async fn same_email_resolves_to_same_id() {
        let store = store_with(42, "a@b.com").await;
        let mut first = general_session("supplier", Some("a@b.com"));
        let mut second = first.clone();

        resolve(&mut first, &store).await;
        resolve(&mut second, &store).await;
        assert_eq!(first.supplier_id, second.supplier_id);
    }

    #[tokio::test]
    async fn other_roles_are_not_bridged() {
        let store = store_with(42, "a@b.com").await;
        for role in ["admin", "Supplier", "supplier ", ""] {
            let mut session = general_session(role, Some("a@b.com"));
            assert_eq!(resolve(&mut session, &store).await, BridgeOutcome::NotApplicable);
            assert_eq!(session.supplier_id, None);
        }

        let mut anonymous = SupplierSession::default();
        assert_eq!(resolve(&mut anonymous, &store).await, BridgeOutcome::NotApplicable);
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn missing_email_skips_lookup() {
        let store = store_with(42, "a@b.com").await;
        let mut session = general_session("supplier", None);

        assert_eq!(resolve(&mut session, &store).await, BridgeOutcome::MissingEmail);
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn misses_are_retried_on_every_call() {
        let store = MemorySupplierStore::new();
        let mut session = general_session("supplier", Some("a@b.com"));

        assert_eq!(resolve(&mut session, &store).await, BridgeOutcome::NoMatch);
        assert_eq!(resolve(&mut session, &store).await, BridgeOutcome::NoMatch);
        assert_eq!(store.lookup_count(), 2);

        store.insert(SupplierProfile::new(42, "Acme", "a@b.com"), None).await;
        assert_eq!(resolve(&mut session, &store).await, BridgeOutcome::Bound(42));
    }

    #[tokio::test]
    async fn email_is_matched_as_stored() {
        let store = store_with(42, "A@B.com").await;
        let mut session = general_session("supplier", Some("a@b.com"));

        assert_eq!(resolve(&mut session, &store).await, BridgeOutcome::NoMatch);
        assert_eq!(session.supplier_id, None);
    }

    #[tokio::test]
    async fn store_failure_is_swallowed() {
        let store = store_with(42, "a@b.com").await;
        store.set_unavailable(true);
        let mut session = general_session("supplier", Some("a@b.com"));
        let before = session.clone();

        assert_eq!(resolve(&mut session, &store).await, BridgeOutcome::StoreFailed);
        assert_eq!(session, before);
    }

    struct TimedOutStore;

    #[async_trait]
    impl SupplierStore for TimedOutStore {
        async fn find_supplier_by_email(&self, _email: &str) -> Result<Option<SupplierRecord>, StoreError> {
            Err(StoreError::Timeout(Duration::from_millis(5)))
        }

        async fn find_supplier_credentials(&self, _email: &str) -> Result<Option<SupplierCredentials>, StoreError> {
            Err(StoreError::Timeout(Duration::from_millis(5)))
        }

        async fn find_supplier_profile(&self, _id: SupplierId) -> Result<Option<SupplierProfile>, StoreError> {
            Err(StoreError::Timeout(Duration::from_millis(5)))
        }

        async fn health_check(&self) -> Result<(), StoreError> {
            Err(StoreError::Timeout(Duration::from_millis(5)))
        }
    }

    #[tokio::test]
    async fn timeout_is_treated_like_an_outage() {
        let mut session = general_session("supplier", Some("a@b.com"));
        let before = session.clone();

        assert_eq!(resolve(&mut session, &TimedOutStore).await, BridgeOutcome::StoreFailed);
        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn embedded_identity_alone_still_bridges_by_role() {
        let store = store_with(42, "a@b.com").await;
        let mut session = general_session("supplier", Some("a@b.com"));
        session.supplier = Some(SupplierIdentity {
            id: 42,
            name: "Acme".to_string(),
            email: "a@b.com".to_string(),
            role: SUPPLIER_ROLE.to_string(),
        });

        assert_eq!(resolve(&mut session, &store).await, BridgeOutcome::Bound(42));
    }
}
