//! Wrapped contract - a thin convenience layer over `ethers` contract calls
//!
//! Binds a deployed contract's ABI to an RPC connection and an optional
//! default signer, derives canonical `name(inputs)(outputs)` method
//! signatures, and assembles, signs and submits transactions that carry only
//! the parameters the caller supplied.

pub mod abi;
pub mod chain;
pub mod config;
pub mod contract;
pub mod error;
pub mod metrics;
pub mod tx;

pub use abi::{method_signature, MethodDescriptor};
pub use chain::RpcConnection;
pub use contract::{ContractHandle, MethodCall};
pub use error::{ContractError, ContractResult};
pub use tx::{NonceLocks, TxOptions};
