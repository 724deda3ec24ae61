//! ABI helpers - canonical type normalization and method signatures
//!
//! Encoding and decoding stay with `ethers::abi`; this module only derives the
//! textual `name(inputs)(outputs)` signature used to identify a method.

mod normalize;
mod signature;

pub use normalize::{canonical_type, normalize_json_params};
pub use signature::{method_signature, MethodDescriptor};
