//! Resolution context handed over by the fixture bootstrap

use std::{collections::BTreeMap, sync::Arc};

use alloy_primitives::Address;
use serde::Deserialize;

use crate::{
    constants::{BRIDGE_REGISTRY_NAME, SYNTH_CONTRACT_PREFIX},
    ledger::LedgerClient,
    settings::ResolverSettings,
    types::{Account, AccountInput},
    utils::{
        common::string_to_address,
        error::{ResolverError, ResolverResult},
    },
};

/// Contract name of a synth, e.g. `SynthhUSD`
pub fn synth_contract_name(ticker: &str) -> String {
    format!("{}{}", SYNTH_CONTRACT_PREFIX, ticker)
}

/// Live protocol contracts, keyed by role.
/// Owned by the test context; the provisioner only reads addresses from it.
#[derive(Clone, Debug, PartialEq)]
pub struct ProtocolContractSet {
    /// Staking asset token
    pub staking_token: Address,
    /// Wrapped native asset token
    pub wrapped_native: Address,
    /// Name to address registry
    pub registry: Address,
    /// Holds the issuance ratio
    pub system_settings: Address,
    /// Exchange rate view
    pub exchange_rates: Address,
    /// Synth contracts keyed by contract name (`Synth` + ticker)
    pub synths: BTreeMap<String, Address>,
    /// Registry name of the bridge role
    pub bridge_name: String,
}

impl ProtocolContractSet {
    /// Returns the synth contract registered for `ticker`, if any
    pub fn synth(&self, ticker: &str) -> Option<Address> {
        self.synths.get(&synth_contract_name(ticker)).copied()
    }
}

/// String form of the contract set, as found in deployment files
#[derive(Debug, Deserialize)]
pub struct ContractSetInput {
    pub staking_token: String,
    pub wrapped_native: String,
    pub registry: String,
    pub system_settings: String,
    pub exchange_rates: String,
    /// Keyed by contract name, e.g. `SynthhUSD`
    #[serde(default)]
    pub synths: BTreeMap<String, String>,
    pub bridge_name: Option<String>,
}

impl TryFrom<ContractSetInput> for ProtocolContractSet {
    type Error = ResolverError;

    fn try_from(value: ContractSetInput) -> Result<Self, Self::Error> {
        let synths = value
            .synths
            .into_iter()
            .map(|(name, address)| -> ResolverResult<(String, Address)> {
                Ok((name, string_to_address(address)?))
            })
            .collect::<ResolverResult<BTreeMap<_, _>>>()?;

        Ok(Self {
            staking_token: string_to_address(value.staking_token)?,
            wrapped_native: string_to_address(value.wrapped_native)?,
            registry: string_to_address(value.registry)?,
            system_settings: string_to_address(value.system_settings)?,
            exchange_rates: string_to_address(value.exchange_rates)?,
            synths,
            bridge_name: value
                .bridge_name
                .unwrap_or_else(|| BRIDGE_REGISTRY_NAME.to_string()),
        })
    }
}

/// Every known account, in a fixed order, and which of them is the administrative authority.
#[derive(Clone, Debug, PartialEq)]
pub struct AccountPool {
    accounts: Vec<Account>,
    owner: usize,
}

impl AccountPool {
    /// Fails if no account is named `owner_name`.
    pub fn new(accounts: Vec<Account>, owner_name: &str) -> ResolverResult<Self> {
        let owner = accounts
            .iter()
            .position(|account| account.name == owner_name)
            .ok_or_else(|| ResolverError::UnknownAccount(owner_name.to_string()))?;
        Ok(Self { accounts, owner })
    }

    /// Builds the pool from its string form
    pub fn from_inputs(inputs: Vec<AccountInput>, owner_name: &str) -> ResolverResult<Self> {
        let accounts = inputs
            .into_iter()
            .map(|input| -> ResolverResult<Account> {
                Ok(Account::new(input.name, string_to_address(input.address)?))
            })
            .collect::<ResolverResult<Vec<_>>>()?;
        Self::new(accounts, owner_name)
    }

    /// The administrative authority
    pub fn owner(&self) -> &Account {
        &self.accounts[self.owner]
    }

    /// Accounts in pool order
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    /// Accounts in pool order, skipping `address`
    pub fn peers_of(&self, address: Address) -> impl Iterator<Item = &Account> {
        self.accounts
            .iter()
            .filter(move |account| account.address != address)
    }
}

/// Everything a resolution needs. Lives for one test run; nothing is cached across calls.
#[derive(Clone)]
pub struct ResolutionContext {
    pub ledger: Arc<dyn LedgerClient>,
    pub contracts: ProtocolContractSet,
    pub accounts: AccountPool,
    /// Whether the cross-network bootstrap mint may be used when supply runs out
    pub cross_network_mint: bool,
    pub settings: ResolverSettings,
}

impl ResolutionContext {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        contracts: ProtocolContractSet,
        accounts: AccountPool,
        cross_network_mint: bool,
    ) -> Self {
        Self {
            ledger,
            contracts,
            accounts,
            cross_network_mint,
            settings: ResolverSettings::default(),
        }
    }

    /// Replaces the default settings
    pub fn with_settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn ledger(&self) -> &dyn LedgerClient {
        self.ledger.as_ref()
    }

    pub fn owner(&self) -> &Account {
        self.accounts.owner()
    }
}
