//! Transaction request assembly
//!
//! Only parameters the caller supplied end up in the request. Gas estimation
//! and fee discovery are left to the node.

use super::options::TxOptions;
use crate::contract::MethodCall;
use crate::error::{ContractError, ContractResult};

use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Eip1559TransactionRequest, TransactionRequest, U256};
use serde::Serialize;

/// Filtered transaction parameters for one call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
}

impl TxParams {
    /// Keep the supplied options, rejecting a mix of legacy and EIP-1559 pricing
    pub fn from_options(options: &TxOptions) -> ContractResult<Self> {
        if options.gas_price.is_some() && options.is_eip1559() {
            return Err(ContractError::InvalidParams(
                "gas_price cannot be combined with max_fee_per_gas or max_priority_fee_per_gas"
                    .to_string(),
            ));
        }

        Ok(Self {
            nonce: None,
            gas: options.gas,
            gas_price: options.gas_price,
            max_fee_per_gas: options.max_fee_per_gas,
            max_priority_fee_per_gas: options.max_priority_fee_per_gas,
            value: options.value,
        })
    }

    /// Inject the account nonce
    pub fn with_nonce(mut self, nonce: U256) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Build the typed request for `call`, sent from `from`
    ///
    /// Legacy when a gas price was given, EIP-1559 otherwise.
    pub fn into_transaction(self, call: &MethodCall, from: Address) -> TypedTransaction {
        let mut tx: TypedTransaction = match self.gas_price {
            Some(gas_price) => TransactionRequest::new()
                .from(from)
                .to(call.address())
                .data(call.calldata().clone())
                .gas_price(gas_price)
                .into(),
            None => {
                let mut request = Eip1559TransactionRequest::new()
                    .from(from)
                    .to(call.address())
                    .data(call.calldata().clone());
                if let Some(max_fee) = self.max_fee_per_gas {
                    request = request.max_fee_per_gas(max_fee);
                }
                if let Some(priority_fee) = self.max_priority_fee_per_gas {
                    request = request.max_priority_fee_per_gas(priority_fee);
                }
                request.into()
            }
        };

        if let Some(nonce) = self.nonce {
            tx.set_nonce(nonce);
        }
        if let Some(gas) = self.gas {
            tx.set_gas(gas);
        }
        if let Some(value) = self.value {
            tx.set_value(value);
        }

        tx
    }
}
