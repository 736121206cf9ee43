//! Supplier session authentication.
//!
//! A request can prove it acts for a supplier in three ways: a bound supplier
//! id, an embedded supplier identity set at login, or a platform user whose
//! role is `supplier`. The bridge upgrades the last form to a bound id when a
//! supplier record with the same email exists; the gate accepts any one of
//! the three.

pub mod bridge;
pub mod evidence;
pub mod gate;
pub mod password;
pub mod session;
pub mod supplier;

use thiserror::Error;

use crate::database::StoreError;

pub use bridge::{resolve, BridgeOutcome};
pub use evidence::{AuthEvidence, EvidenceKind, EvidenceSet};
pub use gate::{authorize, is_supplier_authenticated};
pub use password::{hash_password, Argon2Verifier, CredentialVerifier};
pub use session::{GeneralIdentity, SupplierIdentity, SupplierSession};
pub use supplier::{get_self, login, logout};

/// Role value on a platform user that marks it as a supplier. Compared exactly.
pub const SUPPLIER_ROLE: &str = "supplier";

#[derive(Debug, Error)]
pub enum SupplierAuthError {
    /// No proof of supplier identity. Deliberately says nothing about whether
    /// a bridge was attempted.
    #[error("Supplier authentication required. Please log in as a supplier.")]
    Unauthenticated,

    /// Bound supplier id with no backing record
    #[error("Supplier account not found. Please contact support.")]
    NotFound,

    /// Login rejected; identical for unknown email and wrong password
    #[error("Invalid email or password")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}
