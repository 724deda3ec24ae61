//! Chain module - the RPC connection a contract handle talks through
//!
//! This module provides:
//! - The `RpcConnection` seam (nonce lookup, chain id, node defaults, raw submission)
//! - A blanket implementation for every `ethers` middleware
//! - HTTP provider construction from settings

pub mod provider;

pub use provider::{connect, http_provider};

use crate::error::ExternalError;

use async_trait::async_trait;
use ethers::providers::Middleware;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, H256, U256, U64};

/// RPC operations needed to sign and submit contract transactions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RpcConnection: Send + Sync {
    /// Current transaction count (next nonce) of an account
    async fn transaction_count(&self, address: Address) -> Result<U256, ExternalError>;

    /// Chain id reported by the node
    async fn chain_id(&self) -> Result<U64, ExternalError>;

    /// Let the node fill the fields the caller left out (gas, fee caps)
    async fn fill_defaults(&self, tx: &mut TypedTransaction) -> Result<(), ExternalError>;

    /// Submit a signed raw transaction and return its hash
    async fn submit_raw(&self, raw: Bytes) -> Result<H256, ExternalError>;
}

#[async_trait]
impl<M> RpcConnection for M
where
    M: Middleware + 'static,
    M::Error: 'static,
{
    async fn transaction_count(&self, address: Address) -> Result<U256, ExternalError> {
        self.get_transaction_count(address, None)
            .await
            .map_err(|e| Box::new(e) as ExternalError)
    }

    async fn chain_id(&self) -> Result<U64, ExternalError> {
        let id = self
            .get_chainid()
            .await
            .map_err(|e| Box::new(e) as ExternalError)?;
        Ok(U64::from(id.low_u64()))
    }

    async fn fill_defaults(&self, tx: &mut TypedTransaction) -> Result<(), ExternalError> {
        self.fill_transaction(tx, None)
            .await
            .map_err(|e| Box::new(e) as ExternalError)
    }

    async fn submit_raw(&self, raw: Bytes) -> Result<H256, ExternalError> {
        let pending = self
            .send_raw_transaction(raw)
            .await
            .map_err(|e| Box::new(e) as ExternalError)?;
        Ok(pending.tx_hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::providers::Provider;
    use ethers::types::Eip1559TransactionRequest;

    #[tokio::test]
    async fn test_provider_transaction_count() {
        let (provider, mock) = Provider::mocked();
        mock.push(U256::from(7)).unwrap();

        let address = Address::repeat_byte(0x11);
        let count = provider.transaction_count(address).await.unwrap();
        assert_eq!(count, U256::from(7));

        mock.assert_request("eth_getTransactionCount", (address, "latest"))
            .unwrap();
    }

    #[tokio::test]
    async fn test_provider_chain_id() {
        let (provider, mock) = Provider::mocked();
        mock.push(U64::from(31337)).unwrap();

        let chain_id = provider.chain_id().await.unwrap();
        assert_eq!(chain_id, U64::from(31337));

        mock.assert_request("eth_chainId", ()).unwrap();
    }

    #[tokio::test]
    async fn test_provider_submit_raw() {
        let (provider, mock) = Provider::mocked();
        let hash = H256::repeat_byte(0xab);
        mock.push(hash).unwrap();

        let raw = Bytes::from(vec![0x02, 0x01, 0x02]);
        let submitted = provider.submit_raw(raw.clone()).await.unwrap();
        assert_eq!(submitted, hash);

        mock.assert_request("eth_sendRawTransaction", [raw]).unwrap();
    }

    #[tokio::test]
    async fn test_provider_fill_defaults_keeps_supplied_fields() {
        let (provider, _mock) = Provider::mocked();

        // Gas and both fee caps supplied: nothing left for the node to fill
        let mut tx: TypedTransaction = Eip1559TransactionRequest::new()
            .to(Address::repeat_byte(0x22))
            .gas(50_000u64)
            .max_fee_per_gas(30_000_000_000u64)
            .max_priority_fee_per_gas(1_000_000_000u64)
            .into();

        provider.fill_defaults(&mut tx).await.unwrap();
        assert_eq!(tx.gas(), Some(&U256::from(50_000u64)));
    }

    #[tokio::test]
    async fn test_provider_errors_pass_through() {
        let (provider, _mock) = Provider::mocked();

        // No queued response: the mock transport fails the request
        let err = provider
            .transaction_count(Address::zero())
            .await
            .unwrap_err();
        assert!(err
            .downcast_ref::<ethers::providers::ProviderError>()
            .is_some());
    }
}
