// Public handlers: no supplier proof required.
// Login establishes one; logout removes it.
pub mod suppliers;
