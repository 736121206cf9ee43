pub mod manager;
pub mod memory;
pub mod models;
pub mod supplier_store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemorySupplierStore;
pub use supplier_store::{PgSupplierStore, StoreError, SupplierStore};
