use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_sessions::Session;

use super::{SupplierAuthError, SUPPLIER_ROLE};
use crate::database::models::{SupplierId, SupplierRecord};

/// Session key written by the platform's primary auth system
pub const USER_KEY: &str = "user";
/// Session key holding the bound supplier id, set by the bridge or by login
pub const SUPPLIER_ID_KEY: &str = "supplier_id";
/// Session key holding the supplier identity embedded at login
pub const SUPPLIER_KEY: &str = "supplier";

/// Platform-wide user account, as placed in the session by the primary auth system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralIdentity {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Supplier identity embedded in the session by the login path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierIdentity {
    pub id: SupplierId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&SupplierRecord> for SupplierIdentity {
    fn from(record: &SupplierRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            email: record.email.clone(),
            role: SUPPLIER_ROLE.to_string(),
        }
    }
}

/// The supplier-relevant slice of a web session.
///
/// Loaded once per request, mutated by the bridge or the login path, and
/// written back with [`SupplierSession::persist`]. The general identity is
/// read-only here: `persist` never writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierSession {
    pub general: Option<GeneralIdentity>,
    pub supplier_id: Option<SupplierId>,
    pub supplier: Option<SupplierIdentity>,
}

impl SupplierSession {
    pub fn with_general(general: GeneralIdentity) -> Self {
        Self {
            general: Some(general),
            ..Self::default()
        }
    }

    pub async fn load(session: &Session) -> Result<Self, SupplierAuthError> {
        Ok(Self {
            general: load_general(session).await?,
            supplier_id: session.get(SUPPLIER_ID_KEY).await?,
            supplier: session.get(SUPPLIER_KEY).await?,
        })
    }

    /// Remove the supplier keys straight from the web session, without
    /// reading the general identity. Returns the id that was bound, if any.
    pub async fn clear(session: &Session) -> Result<Option<SupplierId>, SupplierAuthError> {
        let bound = session.remove::<Value>(SUPPLIER_ID_KEY).await?;
        session.remove::<Value>(SUPPLIER_KEY).await?;
        Ok(bound.and_then(|id| serde_json::from_value(id).ok()))
    }

    /// Write the supplier fields back, removing the ones that are cleared
    pub async fn persist(&self, session: &Session) -> Result<(), SupplierAuthError> {
        match self.supplier_id {
            Some(id) => session.insert(SUPPLIER_ID_KEY, id).await?,
            None => {
                session.remove::<SupplierId>(SUPPLIER_ID_KEY).await?;
            }
        }
        match &self.supplier {
            Some(identity) => session.insert(SUPPLIER_KEY, identity).await?,
            None => {
                session.remove::<SupplierIdentity>(SUPPLIER_KEY).await?;
            }
        }
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.supplier_id.is_some()
    }

    pub fn has_supplier_role(&self) -> bool {
        self.general
            .as_ref()
            .and_then(|general| general.role.as_deref())
            .is_some_and(|role| role == SUPPLIER_ROLE)
    }

    /// Email of a supplier-role general identity, if it has a usable one
    pub fn bridge_email(&self) -> Option<&str> {
        self.general
            .as_ref()
            .and_then(|general| general.email.as_deref())
            .filter(|email| !email.is_empty())
    }

    /// Bound state set by the dedicated login path
    pub fn bind_login(&mut self, identity: SupplierIdentity) {
        self.supplier_id = Some(identity.id);
        self.supplier = Some(identity);
    }

}

// The platform owns `USER_KEY`. A value of another shape is only a missing
// bridge input and must not fail the request.
async fn load_general(session: &Session) -> Result<Option<GeneralIdentity>, SupplierAuthError> {
    let Some(raw) = session.get::<Value>(USER_KEY).await? else {
        return Ok(None);
    };

    match serde_json::from_value(raw) {
        Ok(general) => Ok(Some(general)),
        Err(error) => {
            tracing::warn!(%error, "Ignoring unreadable general identity in session");
            Ok(None)
        }
    }
}
