// Protected handlers: run behind supplier_gate_middleware and read SupplierContext.
pub mod suppliers;
