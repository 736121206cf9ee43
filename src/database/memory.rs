//! In-process supplier store.
//!
//! Backs the test suites and `--in-memory` local runs. It can be switched into
//! an unavailable state to exercise the store-failure paths, and it counts
//! lookups so callers can observe how often the store was consulted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::{SupplierCredentials, SupplierId, SupplierProfile, SupplierRecord};
use super::supplier_store::{StoreError, SupplierStore};

#[derive(Debug, Clone)]
struct StoredSupplier {
    profile: SupplierProfile,
    password_hash: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MemorySupplierStore {
    suppliers: Arc<RwLock<HashMap<SupplierId, StoredSupplier>>>,
    unavailable: Arc<AtomicBool>,
    lookups: Arc<AtomicUsize>,
}

impl MemorySupplierStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a supplier. Emails are expected to be unique, as the
    /// Postgres schema enforces.
    pub async fn insert(&self, profile: SupplierProfile, password_hash: Option<String>) {
        self.suppliers
            .write()
            .await
            .insert(profile.id, StoredSupplier { profile, password_hash });
    }

    pub async fn remove(&self, id: SupplierId) {
        self.suppliers.write().await.remove(&id);
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of calls that reached the store, failed ones included
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn begin_lookup(&self) -> Result<(), StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Option<StoredSupplier> {
        self.suppliers
            .read()
            .await
            .values()
            .find(|stored| stored.profile.email == email)
            .cloned()
    }
}

#[async_trait]
impl SupplierStore for MemorySupplierStore {
    async fn find_supplier_by_email(&self, email: &str) -> Result<Option<SupplierRecord>, StoreError> {
        self.begin_lookup()?;
        Ok(self.find_by_email(email).await.map(|stored| stored.profile.record()))
    }

    async fn find_supplier_credentials(&self, email: &str) -> Result<Option<SupplierCredentials>, StoreError> {
        self.begin_lookup()?;
        Ok(self.find_by_email(email).await.map(|stored| SupplierCredentials {
            id: stored.profile.id,
            name: stored.profile.name,
            email: stored.profile.email,
            status: stored.profile.status,
            password_hash: stored.password_hash,
        }))
    }

    async fn find_supplier_profile(&self, id: SupplierId) -> Result<Option<SupplierProfile>, StoreError> {
        self.begin_lookup()?;
        Ok(self
            .suppliers
            .read()
            .await
            .get(&id)
            .map(|stored| stored.profile.clone()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}
