//! Contract handle with signed transaction submission
//!
//! A transaction moves UNSIGNED -> SIGNED -> SUBMITTED:
//! - the signer is resolved (per-call override first, then the handle default)
//! - the nonce is fetched fresh, the request assembled and node defaults filled
//! - the signer produces the raw payload, which is handed to the RPC connection
//!
//! Nothing is retried here. RPC and signer failures reach the caller unchanged.

use super::method::MethodCall;
use crate::abi::method_signature;
use crate::chain::RpcConnection;
use crate::error::{ContractError, ContractResult};
use crate::metrics;
use crate::tx::{NonceLocks, TxOptions, TxParams};

use ethers::abi::{Abi, Event, Function, Tokenize};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, Bytes};
use ethers::utils::to_checksum;
use std::sync::Arc;
use tracing::{debug, info};

/// A deployed contract bound to an RPC connection and an optional default signer
pub struct ContractHandle<R, S = LocalWallet> {
    /// Contract address
    address: Address,
    /// Contract ABI
    abi: Abi,
    /// Shared RPC connection
    rpc: Arc<R>,
    /// Default signing account, owned by the caller
    signer: Option<Arc<S>>,
    /// Per-account nonce serialization
    nonce_locks: Arc<NonceLocks>,
}

impl<R, S> ContractHandle<R, S>
where
    R: RpcConnection,
    S: Signer,
    S::Error: 'static,
{
    /// Create a handle for the contract at `address`
    pub fn new(
        rpc: Arc<R>,
        address: &str,
        abi: Abi,
        signer: Option<Arc<S>>,
    ) -> ContractResult<Self> {
        let parsed = address
            .parse::<Address>()
            .map_err(|e| ContractError::InvalidAddress {
                address: address.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            address: parsed,
            abi,
            rpc,
            signer,
            nonce_locks: Arc::new(NonceLocks::new()),
        })
    }

    /// Share a nonce lock table with other handles driven by the same accounts
    pub fn with_nonce_locks(mut self, nonce_locks: Arc<NonceLocks>) -> Self {
        self.nonce_locks = nonce_locks;
        self
    }

    /// EIP-55 checksummed contract address
    pub fn address(&self) -> String {
        to_checksum(&self.address, None)
    }

    pub fn address_bytes(&self) -> Address {
        self.address
    }

    pub fn abi(&self) -> &Abi {
        &self.abi
    }

    pub fn rpc(&self) -> &Arc<R> {
        &self.rpc
    }

    /// Default signing account, if any
    pub fn signer(&self) -> Option<&S> {
        self.signer.as_deref()
    }

    /// All functions in the ABI
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.abi.functions()
    }

    /// All events in the ABI
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.abi.events()
    }

    /// Look up a function by name (the first one for overloaded names)
    pub fn function(&self, name: &str) -> ContractResult<&Function> {
        Ok(self.abi.function(name)?)
    }

    /// Look up an event by name
    pub fn event(&self, name: &str) -> ContractResult<&Event> {
        Ok(self.abi.event(name)?)
    }

    /// Bind `args` to the function `name`
    pub fn method<T: Tokenize>(&self, name: &str, args: T) -> ContractResult<MethodCall> {
        let function = self.function(name)?.clone();
        MethodCall::new(self.address, function, args)
    }

    /// `name(inputs)(outputs)` of a bound call
    pub fn method_signature(method: &MethodCall) -> ContractResult<String> {
        method_signature(method.function())
    }

    /// Sign `call` without submitting it
    ///
    /// `signer` overrides the handle's default account for this call. The
    /// chain id is taken from the node, not from the signer.
    pub async fn raw_transaction(
        &self,
        call: &MethodCall,
        options: &TxOptions,
        signer: Option<&S>,
    ) -> ContractResult<Bytes> {
        let signer = self.resolve_signer(call, signer)?;
        let _guard = self.nonce_locks.acquire(signer.address()).await;

        self.sign(call, options, signer).await
    }

    /// Sign and submit `call`, returning the transaction hash as hex
    pub async fn send_transaction(
        &self,
        call: &MethodCall,
        options: &TxOptions,
        signer: Option<&S>,
    ) -> ContractResult<String> {
        let signer = self.resolve_signer(call, signer)?;
        let _guard = self.nonce_locks.acquire(signer.address()).await;

        let raw = self.sign(call, options, signer).await?;
        let tx_hash = self.rpc.submit_raw(raw).await.map_err(ContractError::Rpc)?;

        info!(
            "Transaction sent: {:?} ({} on {})",
            tx_hash,
            call.name(),
            self.address()
        );
        metrics::record_tx_submitted(&self.address());

        Ok(format!("{:#x}", tx_hash))
    }

    /// Per-call override first, then the handle default
    fn resolve_signer<'a>(
        &'a self,
        call: &MethodCall,
        signer: Option<&'a S>,
    ) -> ContractResult<&'a S> {
        signer
            .or(self.signer.as_deref())
            .ok_or_else(|| ContractError::NoSigningCredential {
                contract_address: to_checksum(&call.address(), None),
                function_name: call.name().to_string(),
            })
    }

    async fn sign(
        &self,
        call: &MethodCall,
        options: &TxOptions,
        signer: &S,
    ) -> ContractResult<Bytes> {
        let params = TxParams::from_options(options)?;
        let from = signer.address();

        let nonce = self
            .rpc
            .transaction_count(from)
            .await
            .map_err(ContractError::Rpc)?;
        debug!("Fetched nonce {} for {:?}", nonce, from);

        let mut tx = params.with_nonce(nonce).into_transaction(call, from);
        self.rpc
            .fill_defaults(&mut tx)
            .await
            .map_err(ContractError::Rpc)?;

        // The node decides which chain the transaction is replayable on
        if tx.chain_id().is_none() {
            let chain_id = self.rpc.chain_id().await.map_err(ContractError::Rpc)?;
            tx.set_chain_id(chain_id);
        }

        let signature = signer
            .sign_transaction(&tx)
            .await
            .map_err(|e| ContractError::Signer(Box::new(e)))?;

        debug!("Signed {} with nonce {} from {:?}", call.name(), nonce, from);
        metrics::record_tx_signed(&self.address());

        Ok(tx.rlp_signed(&signature))
    }
}
