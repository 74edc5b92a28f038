//! The ledger client the provisioner drives.
//!
//! Implementations wrap whatever network access the surrounding test harness
//! has (a JSON-RPC node, a forked chain, an in-memory simulator). The
//! provisioner never retries: errors returned here are surfaced unchanged.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use log::debug;

#[cfg(test)]
use mockall::automock;

use crate::{
    types::{Operation, Receipt},
    utils::error::{ResolverError, ResolverResult},
};

/// Network access needed to read balances and submit confirmable operations.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait LedgerClient: Send + Sync {
    /// Gets the native currency balance of an address.
    async fn get_balance(&self, address: Address) -> ResolverResult<U256>;

    /// Performs a read-only contract call.
    ///
    /// # Arguments
    /// * `to` - The contract to call
    /// * `data` - ABI encoded calldata
    ///
    /// # Returns
    /// The hex encoded return data
    async fn eth_call(&self, to: Address, data: Vec<u8>) -> ResolverResult<String>;

    /// Submits a state-changing operation signed by `operation.from`.
    /// Returns the transaction hash without waiting for inclusion.
    async fn submit(&self, operation: Operation) -> ResolverResult<B256>;

    /// Suspends until the operation is included and returns its receipt.
    async fn wait_for_receipt(&self, transaction_hash: B256) -> ResolverResult<Receipt>;

    /// Timestamp of the latest block, in seconds.
    async fn block_timestamp(&self) -> ResolverResult<u64>;
}

/// A submitted operation that has not been confirmed yet.
pub struct PendingOperation<'a> {
    ledger: &'a dyn LedgerClient,
    transaction_hash: B256,
}

impl<'a> PendingOperation<'a> {
    pub fn new(ledger: &'a dyn LedgerClient, transaction_hash: B256) -> Self {
        Self {
            ledger,
            transaction_hash,
        }
    }

    pub fn transaction_hash(&self) -> B256 {
        self.transaction_hash
    }

    /// Waits for inclusion. A reverted receipt is a failed operation.
    pub async fn confirm(self) -> ResolverResult<Receipt> {
        let receipt = self.ledger.wait_for_receipt(self.transaction_hash).await?;
        debug!(
            "Operation {} included in block {} (status: {})",
            receipt.transaction_hash, receipt.block_number, receipt.status
        );

        if !receipt.status {
            return Err(ResolverError::NetworkOperation(format!(
                "Operation {} reverted in block {}.",
                receipt.transaction_hash, receipt.block_number
            )));
        }
        Ok(receipt)
    }
}
