use std::{fmt, str::FromStr};

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::sol;
use serde::Deserialize;

use crate::utils::{common::to_bytes32, error::ResolverResult};

/// Ticker of the network's native currency
pub const NATIVE_TICKER: &str = "ETH";
/// Ticker of the wrapped native asset
pub const WRAPPED_NATIVE_TICKER: &str = "WETH";
/// Ticker of the protocol's staking asset
pub const STAKING_TICKER: &str = "HAKA";
/// Ticker of the synthetic stable asset
pub const STABLE_TICKER: &str = "hUSD";

const STABLE_PREREQUISITES: &[AssetSymbol] = &[AssetSymbol::Staking];
const WRAPPED_PREREQUISITES: &[AssetSymbol] = &[AssetSymbol::Native];

/// Assets the provisioner knows how to read and, for most of them, acquire.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetSymbol {
    /// Native currency, held at the ledger level
    Native,
    /// Wrapped native asset, minted 1:1 on deposit
    WrappedNative,
    /// Protocol staking asset, minted by the administrative authority
    Staking,
    /// Synthetic stable asset, issued as debt against staked collateral
    StableSynth,
    /// Any other synthetic asset. Readable, but no strategy acquires it.
    Synth(String),
}

impl AssetSymbol {
    /// Every symbol that has an acquisition strategy
    pub const ACQUIRABLE: [AssetSymbol; 4] = [
        AssetSymbol::Native,
        AssetSymbol::WrappedNative,
        AssetSymbol::Staking,
        AssetSymbol::StableSynth,
    ];

    pub fn ticker(&self) -> &str {
        match self {
            AssetSymbol::Native => NATIVE_TICKER,
            AssetSymbol::WrappedNative => WRAPPED_NATIVE_TICKER,
            AssetSymbol::Staking => STAKING_TICKER,
            AssetSymbol::StableSynth => STABLE_TICKER,
            AssetSymbol::Synth(ticker) => ticker,
        }
    }

    /// Assets whose strategies may be invoked while acquiring `self`.
    pub fn prerequisites(&self) -> &'static [AssetSymbol] {
        match self {
            AssetSymbol::StableSynth => STABLE_PREREQUISITES,
            AssetSymbol::WrappedNative => WRAPPED_PREREQUISITES,
            AssetSymbol::Staking | AssetSymbol::Native | AssetSymbol::Synth(_) => &[],
        }
    }

    /// Currency key used by the exchange rate views
    pub fn currency_key(&self) -> ResolverResult<B256> {
        to_bytes32(self.ticker())
    }
}

impl fmt::Display for AssetSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

impl FromStr for AssetSymbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            NATIVE_TICKER => AssetSymbol::Native,
            WRAPPED_NATIVE_TICKER => AssetSymbol::WrappedNative,
            STAKING_TICKER => AssetSymbol::Staking,
            STABLE_TICKER => AssetSymbol::StableSynth,
            other => AssetSymbol::Synth(other.to_string()),
        })
    }
}

/// A known account. Operations with `from == address` are signed on its behalf by the ledger client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub address: Address,
}

impl Account {
    pub fn new<S: Into<String>>(name: S, address: Address) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountInput {
    pub name: String,
    pub address: String,
}

/// A state-changing operation ready for submission
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Operation {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

/// Inclusion receipt of a confirmed operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: B256,
    pub block_number: u64,
    /// `false` if the operation was included but reverted
    pub status: bool,
}

sol!(
    // ERC20 surface shared by the staking asset, wrapped native and synths
    function balanceOf(address account) external view returns (uint256);
    function transfer(address to, uint256 amount) external returns (bool);

    // Wrapped native
    function deposit() external payable;

    // Staking asset
    function transferableSynthetix(address account) external view returns (uint256 transferable);
    function mintSecondary(address account, uint256 amount) external;
    function issueSynths(uint256 amount) external;

    // Name registry
    function getAddress(bytes32 name) external view returns (address);
    function importAddresses(bytes32[] names, address[] destinations) external;
    function rebuildCaches(address[] destinations) external;

    // Ratio and exchange rate views
    function issuanceRatio() external view returns (uint256);
    function getAmountsForExchange(
        uint256 sourceAmount,
        bytes32 sourceCurrencyKey,
        bytes32 destinationCurrencyKey
    ) external view returns (uint256 amountReceived, uint256 fee, uint256 exchangeFeeRate);
);
