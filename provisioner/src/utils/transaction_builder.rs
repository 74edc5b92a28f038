//! Operation builder (and sender) that submits through the ledger client

use alloy_primitives::{Address, Bytes, U256};
use log::debug;

use crate::{
    ledger::{LedgerClient, PendingOperation},
    types::{Operation, Receipt},
};

use super::error::ResolverResult;

/// Operation builder struct
#[derive(Default)]
pub struct OperationBuilder {
    to: Address,
    from: Address,
    data: Vec<u8>,
    value: U256,
}

impl OperationBuilder {
    /// Sets the `to` field
    pub fn to(mut self, to: Address) -> Self {
        self.to = to;
        self
    }

    /// Sets the `from` field, the account that signs the operation
    pub fn from(mut self, from: Address) -> Self {
        self.from = from;
        self
    }

    /// Sets the `data` field
    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Sets the `value` field
    pub fn value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn build(self) -> Operation {
        Operation {
            from: self.from,
            to: self.to,
            value: self.value,
            data: Bytes::from(self.data),
        }
    }

    /// Builds the operation and submits it
    pub async fn send(self, ledger: &dyn LedgerClient) -> ResolverResult<PendingOperation<'_>> {
        let operation = self.build();
        debug!(
            "Submitting operation from {} to {} (value: {}, {} bytes of data)",
            operation.from,
            operation.to,
            operation.value,
            operation.data.len()
        );
        let transaction_hash = ledger.submit(operation).await?;
        Ok(PendingOperation::new(ledger, transaction_hash))
    }

    /// Submits the operation and suspends until it is confirmed
    pub async fn send_and_confirm(self, ledger: &dyn LedgerClient) -> ResolverResult<Receipt> {
        self.send(ledger).await?.confirm().await
    }
}
