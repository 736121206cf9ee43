use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Primary key of the `suppliers` table (`SERIAL`)
pub type SupplierId = i32;

/// Lookup projection used by the session bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SupplierRecord {
    pub id: SupplierId,
    pub name: String,
    pub email: String,
    pub status: String,
}

/// Lookup projection plus the stored credential, used only by the login path
#[derive(Debug, Clone, FromRow)]
pub struct SupplierCredentials {
    pub id: SupplierId,
    pub name: String,
    pub email: String,
    pub status: String,
    /// argon2 PHC string; `None` for accounts that never set a password
    pub password_hash: Option<String>,
}

impl SupplierCredentials {
    pub fn record(&self) -> SupplierRecord {
        SupplierRecord {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            status: self.status.clone(),
        }
    }
}

/// Full supplier profile returned by `GET /suppliers/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SupplierProfile {
    pub id: SupplierId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub trading_name: Option<String>,
    pub cnpj: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub verified: Option<bool>,
    pub rating: Option<Decimal>,
    pub rating_count: Option<i32>,
}

impl SupplierProfile {
    /// Minimal profile with every optional column empty
    pub fn new(id: SupplierId, name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: None,
            description: None,
            status: "active".to_string(),
            created_at: now,
            updated_at: now,
            logo: None,
            website: None,
            trading_name: None,
            cnpj: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            contact_name: None,
            contact_email: None,
            contact_phone: None,
            verified: None,
            rating: None,
            rating_count: None,
        }
    }

    pub fn record(&self) -> SupplierRecord {
        SupplierRecord {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            status: self.status.clone(),
        }
    }
}
