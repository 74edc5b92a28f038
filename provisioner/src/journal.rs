//! Resolution journal
//!
//! Records what a resolution read and submitted. Every note is also emitted
//! through the `log` facade, so the journal is for callers that want to assert
//! on the steps taken, not a replacement for logging.

use alloy_primitives::{Address, B256, U256};
use log::{debug, info};

use crate::{types::AssetSymbol, utils::common::format_amount};

/// Kind of journal entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogType {
    /// Free-form note
    Info,
    /// Balance read before or after a resolution
    BalanceSnapshot,
    /// Strategy chosen for a shortfall
    Strategy,
    /// A state-changing operation was submitted and confirmed
    Submission,
}

/// Journal entry
#[derive(Clone, Debug)]
pub struct JournalEntry {
    /// Block timestamp at which the resolution started
    pub timestamp: u64,
    pub log_type: LogType,
    pub symbol: Option<AssetSymbol>,
    pub account: Option<Address>,
    pub amount: Option<U256>,
    pub transaction_hash: Option<B256>,
    pub note: Option<String>,
}

/// Builder for journal entries
impl JournalEntry {
    /// Create a new instance of a journal entry
    /// Fills the `timestamp` and `log_type` fields
    pub fn new(timestamp: u64, log_type: LogType) -> Self {
        Self {
            timestamp,
            log_type,
            symbol: None,
            account: None,
            amount: None,
            transaction_hash: None,
            note: None,
        }
    }

    /// Fills the `symbol` field of the entry
    pub fn symbol(&mut self, symbol: &AssetSymbol) -> &mut Self {
        self.symbol = Some(symbol.clone());
        self
    }

    /// Fills the `account` field of the entry
    pub fn account(&mut self, account: Address) -> &mut Self {
        self.account = Some(account);
        self
    }

    /// Fills the `amount` field of the entry
    pub fn amount(&mut self, amount: U256) -> &mut Self {
        self.amount = Some(amount);
        self
    }

    /// Fills the `transaction_hash` field of the entry
    pub fn transaction_hash(&mut self, transaction_hash: B256) -> &mut Self {
        self.transaction_hash = Some(transaction_hash);
        self
    }

    /// Fills the `note` field of the entry
    pub fn note<S: AsRef<str>>(&mut self, text: S) -> &mut Self {
        self.note = Some(text.as_ref().to_string());
        self
    }
}

/// Ordered collection of the entries of one resolution
#[derive(Clone, Debug, Default)]
pub struct JournalCollection {
    pub opened_at: u64,
    pub entries: Vec<JournalEntry>,
}

impl JournalCollection {
    pub fn open(opened_at: u64) -> Self {
        Self {
            opened_at,
            entries: vec![],
        }
    }

    /// Appends a free-form note
    pub fn append_note<S: AsRef<str>>(&mut self, log_type: LogType, note: S) {
        info!("{}", note.as_ref());
        let mut entry = JournalEntry::new(self.opened_at, log_type);
        entry.note(note);
        self.entries.push(entry);
    }

    /// Records a balance read, logged as `<symbol> <label>=<amount>`
    pub fn append_balance(
        &mut self,
        symbol: &AssetSymbol,
        account: Address,
        label: &str,
        amount: U256,
    ) {
        let note = format!("{} {}={}", symbol, label, format_amount(amount));
        info!("{} (account {})", note, account);
        let mut entry = JournalEntry::new(self.opened_at, LogType::BalanceSnapshot);
        entry.symbol(symbol).account(account).amount(amount).note(note);
        self.entries.push(entry);
    }

    /// Records a confirmed state-changing operation
    pub fn append_submission<S: AsRef<str>>(
        &mut self,
        account: Address,
        transaction_hash: B256,
        note: S,
    ) {
        debug!("{} (signer {}, tx {})", note.as_ref(), account, transaction_hash);
        let mut entry = JournalEntry::new(self.opened_at, LogType::Submission);
        entry
            .account(account)
            .transaction_hash(transaction_hash)
            .note(note);
        self.entries.push(entry);
    }

    /// Records which strategy closes a shortfall
    pub fn append_strategy(&mut self, symbol: &AssetSymbol, account: Address, shortfall: U256) {
        let note = format!(
            "Acquiring {} {} for {}",
            format_amount(shortfall),
            symbol,
            account
        );
        info!("{}", note);
        let mut entry = JournalEntry::new(self.opened_at, LogType::Strategy);
        entry
            .symbol(symbol)
            .account(account)
            .amount(shortfall)
            .note(note);
        self.entries.push(entry);
    }

    /// Number of confirmed state-changing operations recorded so far
    pub fn submissions(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.log_type == LogType::Submission)
            .count()
    }
}
