//! Per-account serialization of nonce-sensitive work
//!
//! Fetching a nonce and signing with it is not atomic. Two concurrent calls
//! for the same account would read the same transaction count and produce
//! conflicting transactions, so every account gets its own lock that is held
//! from the nonce fetch until the signed payload is submitted.

use dashmap::DashMap;
use ethers::types::Address;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

/// Lock table keyed by signing account
#[derive(Debug, Default)]
pub struct NonceLocks {
    accounts: DashMap<Address, Arc<Mutex<()>>>,
}

impl NonceLocks {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive use of `account`'s nonce
    ///
    /// Entries of accounts nobody holds or waits on are dropped first, so the
    /// table only grows with the number of accounts in use at the same time.
    pub async fn acquire(&self, account: Address) -> OwnedMutexGuard<()> {
        self.prune();

        // Clone the Arc so the map shard is not held across the await
        let lock = self.accounts.entry(account).or_default().clone();

        trace!("Waiting for nonce lock of {:?}", account);
        lock.lock_owned().await
    }

    /// Drop the locks of idle accounts
    ///
    /// A lock only referenced by the table has no holder and no waiter.
    pub fn prune(&self) {
        self.accounts.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    /// Number of accounts currently in the table
    pub fn tracked_accounts(&self) -> usize {
        self.accounts.len()
    }
}
