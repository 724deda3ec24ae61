//! Contract handle - function tables, signatures and signed submission

mod handle;
mod method;

pub use handle::ContractHandle;
pub use method::MethodCall;
