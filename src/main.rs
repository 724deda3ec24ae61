//! Wrapped contract inspector
//!
//! Loads the configured contract and prints its function table as
//! `selector  name(inputs)(outputs)` lines, followed by its event topics.

use anyhow::Result;
use tracing::{info, warn};
use wrapped_contract::chain;
use wrapped_contract::config::Settings;
use wrapped_contract::{MethodDescriptor, RpcConnection};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    info!("Starting wrapped-contract v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let settings = Settings::load()?;
    let handle = chain::connect(&settings)?;

    for function in handle.functions() {
        match MethodDescriptor::from_function(function) {
            Ok(descriptor) => println!(
                "0x{}  {}",
                hex::encode(function.short_signature()),
                descriptor
            ),
            Err(e) => warn!("Skipping function: {}", e),
        }
    }

    for event in handle.events() {
        println!("{:#x}  {}", event.signature(), event.name);
    }

    if let Some(signer) = handle.signer() {
        use ethers::signers::Signer;

        match handle.rpc().transaction_count(signer.address()).await {
            Ok(nonce) => info!("Signer {:?} next nonce: {}", signer.address(), nonce),
            Err(e) => warn!("Could not fetch signer nonce: {}", e),
        }
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wrapped_contract=debug,hyper=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
