//! Transaction assembly with per-account nonce serialization

mod assembler;
mod nonce;
mod options;

pub use assembler::TxParams;
pub use nonce::NonceLocks;
pub use options::TxOptions;
