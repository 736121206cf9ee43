pub mod supplier;

pub use supplier::{SupplierCredentials, SupplierId, SupplierProfile, SupplierRecord};
