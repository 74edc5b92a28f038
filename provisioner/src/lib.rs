//! Balance provisioning for protocol integration tests.
//!
//! Given a symbol, an account and a target amount, [`ensure_balance`] makes
//! sure the account ends up holding at least that much, acquiring the
//! shortfall from funded peers, the administrative authority, wrapping or
//! stable asset issuance. Prerequisite assets are acquired recursively.

pub mod constants;
pub mod context;
pub mod journal;
pub mod ledger;
pub mod settings;
pub mod strategy;
pub mod types;
pub mod utils;

#[cfg(test)]
mod testing;

pub use context::{AccountPool, ContractSetInput, ProtocolContractSet, ResolutionContext};
pub use journal::{JournalCollection, JournalEntry, LogType};
pub use ledger::{LedgerClient, PendingOperation};
pub use settings::{ResolverSettings, ResolverSettingsInput};
pub use strategy::dispatcher::{
    ensure_balance, ensure_balance_with_journal, ensure_balances, BalanceRequest,
};
pub use types::{Account, AccountInput, AssetSymbol, Operation, Receipt};
pub use utils::error::{ResolverError, ResolverResult};
