//! HTTP provider construction and handle wiring from settings

use crate::config::{RpcConfig, Settings};
use crate::contract::ContractHandle;
use crate::error::{ContractError, ContractResult};

use anyhow::Context;
use ethers::providers::{Http, Provider};
use ethers::signers::{LocalWallet, Signer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Create an HTTP provider for the configured node
pub fn http_provider(config: &RpcConfig) -> ContractResult<Provider<Http>> {
    let provider = Provider::<Http>::try_from(config.url.as_str())
        .map_err(|e| ContractError::Config(format!("Invalid RPC URL {}: {}", config.url, e)))?;

    debug!("Added HTTP provider for chain {}: {}", config.chain_id, config.url);

    Ok(provider.interval(Duration::from_millis(config.poll_interval_ms)))
}

/// Build a contract handle from settings
///
/// Loads the ABI and the optional default signer, then binds both to an HTTP
/// provider.
pub fn connect(settings: &Settings) -> anyhow::Result<ContractHandle<Provider<Http>, LocalWallet>> {
    let provider = Arc::new(http_provider(&settings.rpc)?);
    let abi = settings.load_abi()?;
    let signer = settings.signer()?.map(Arc::new);

    if let Some(signer) = &signer {
        info!("Default signer: {:?}", signer.address());
    }

    let handle = ContractHandle::new(provider, &settings.contract.address, abi, signer)
        .with_context(|| format!("Failed to bind contract {}", settings.contract.address))?;

    info!(
        "Contract {} bound on chain {} ({} functions, {} events)",
        handle.address(),
        settings.rpc.chain_id,
        handle.functions().count(),
        handle.events().count()
    );

    Ok(handle)
}
