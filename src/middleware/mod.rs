pub mod response;
pub mod supplier_gate;

pub use response::{ApiResponse, ApiResult};
pub use supplier_gate::{supplier_gate_middleware, SupplierContext};
