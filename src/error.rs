//! Error types for wrapped contract operations

use thiserror::Error;

/// Boxed error raised by an external collaborator (RPC transport or signer)
pub type ExternalError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for contract handle operations
#[derive(Error, Debug)]
pub enum ContractError {
    #[error("No account to call function '{function_name}' of contract '{contract_address}' with")]
    NoSigningCredential {
        contract_address: String,
        function_name: String,
    },

    #[error("Invalid ABI: {0}")]
    InvalidAbi(String),

    #[error("Invalid address {address}: {message}")]
    InvalidAddress { address: String, message: String },

    #[error("Invalid transaction parameters: {0}")]
    InvalidParams(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Abi(#[from] ethers::abi::Error),

    #[error(transparent)]
    Rpc(ExternalError),

    #[error(transparent)]
    Signer(ExternalError),
}

impl ContractError {
    /// Check if error is retryable
    ///
    /// Only RPC failures can be transient. Whether and how to resubmit is left
    /// to the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ContractError::Rpc(_))
    }

    /// Borrow the underlying external error, if it is of type `E`
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            ContractError::Rpc(e) | ContractError::Signer(e) => e.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Result type for contract handle operations
pub type ContractResult<T> = Result<T, ContractError>;
