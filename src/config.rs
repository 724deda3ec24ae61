//! Configuration management for wrapped contracts
//!
//! Loads configuration from TOML files with environment variable substitution.

use anyhow::{Context, Result};
use ethers::abi::Abi;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref ENV_VAR: Regex = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub rpc: RpcConfig,
    pub contract: ContractConfig,
    #[serde(default)]
    pub signer: SignerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    pub url: String,
    pub chain_id: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfig {
    pub address: String,
    pub abi_path: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignerConfig {
    /// Name of the environment variable holding the hex private key
    pub private_key_env: Option<String>,
}

fn default_poll_interval_ms() -> u64 {
    100
}

impl Settings {
    /// Load settings from `$WRAPPED_CONTRACT_CONFIG` or `config/default.toml`
    pub fn load() -> Result<Self> {
        let config_path = env::var("WRAPPED_CONTRACT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/default.toml"));

        Self::load_from(&config_path)
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut settings = Self::from_toml_str(&config_str)?;

        // Relative ABI paths are resolved against the config file
        if settings.contract.abi_path.is_relative() {
            if let Some(dir) = path.parent() {
                settings.contract.abi_path = dir.join(&settings.contract.abi_path);
            }
        }

        Ok(settings)
    }

    /// Parse settings from TOML text
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        // Substitute environment variables
        let config_str = substitute_env_vars(config_str);

        let settings: Settings =
            toml::from_str(&config_str).with_context(|| "Failed to parse configuration")?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.rpc.url.trim().is_empty() {
            anyhow::bail!("RPC URL must not be empty");
        }

        self.contract
            .address
            .parse::<Address>()
            .map_err(|e| anyhow::anyhow!("Invalid contract address {}: {}", self.contract.address, e))?;

        if self.signer.private_key_env.is_none() {
            tracing::warn!("No signer configured - transactions need a per-call account");
        }

        Ok(())
    }

    /// Read the contract ABI
    ///
    /// Accepts a bare ABI array or a build artifact with an `abi` field.
    pub fn load_abi(&self) -> Result<Abi> {
        let path = &self.contract.abi_path;
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ABI file: {:?}", path))?;

        let value: serde_json::Value =
            serde_json::from_str(&raw).with_context(|| format!("ABI file is not JSON: {:?}", path))?;

        let abi_value = match value {
            serde_json::Value::Object(mut artifact) => artifact
                .remove("abi")
                .with_context(|| format!("Artifact has no abi field: {:?}", path))?,
            other => other,
        };

        serde_json::from_value(abi_value).with_context(|| format!("Invalid ABI in {:?}", path))
    }

    /// Load the default signing account, if one is configured
    pub fn signer(&self) -> Result<Option<LocalWallet>> {
        let Some(var) = &self.signer.private_key_env else {
            return Ok(None);
        };

        let key = env::var(var).with_context(|| format!("Signer key variable {} is not set", var))?;
        let wallet = key
            .trim()
            .parse::<LocalWallet>()
            .map_err(|e| anyhow::anyhow!("Invalid private key in {}: {}", var, e))?;

        Ok(Some(wallet.with_chain_id(self.rpc.chain_id)))
    }
}

/// Substitute environment variables in the format ${VAR_NAME}
fn substitute_env_vars(input: &str) -> String {
    let mut result = input.to_string();

    for cap in ENV_VAR.captures_iter(input) {
        let var_name = &cap[1];
        let var_value = env::var(var_name).unwrap_or_default();
        result = result.replace(&cap[0], &var_value);
    }

    result
}
