use serde::Serialize;

use super::session::{SupplierIdentity, SupplierSession};
use crate::database::models::SupplierId;

/// One proof that a session acts for a supplier. Every variant is sufficient
/// on its own and none grants more than another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvidence {
    BoundId(SupplierId),
    EmbeddedIdentity(SupplierIdentity),
    RoleFlag,
}

impl AuthEvidence {
    pub fn kind(&self) -> EvidenceKind {
        match self {
            AuthEvidence::BoundId(_) => EvidenceKind::BoundId,
            AuthEvidence::EmbeddedIdentity(_) => EvidenceKind::EmbeddedIdentity,
            AuthEvidence::RoleFlag => EvidenceKind::RoleFlag,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    BoundId,
    EmbeddedIdentity,
    RoleFlag,
}

/// All proofs present on a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceSet(Vec<AuthEvidence>);

impl EvidenceSet {
    pub fn from_session(session: &SupplierSession) -> Self {
        let mut evidence = Vec::with_capacity(3);
        if let Some(id) = session.supplier_id {
            evidence.push(AuthEvidence::BoundId(id));
        }
        if let Some(identity) = &session.supplier {
            evidence.push(AuthEvidence::EmbeddedIdentity(identity.clone()));
        }
        if session.has_supplier_role() {
            evidence.push(AuthEvidence::RoleFlag);
        }
        Self(evidence)
    }

    /// True when at least one proof is present. Proofs are alternatives, so
    /// the count never matters.
    pub fn any(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn kinds(&self) -> Vec<EvidenceKind> {
        self.0.iter().map(AuthEvidence::kind).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuthEvidence> {
        self.0.iter()
    }
}
