//! In-memory ledger for tests.
//!
//! Simulates just enough of the protocol contracts for the strategies to run
//! end to end: token balances with staking locks, wrapped native deposits, a
//! name registry whose bridge entry is cached by the staking token, and debt
//! issuance bounded by the issuance ratio.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use alloy_primitives::{address, Address, B256, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;

use crate::{
    constants::{scale, BRIDGE_REGISTRY_NAME},
    context::{synth_contract_name, AccountPool, ProtocolContractSet, ResolutionContext},
    ledger::LedgerClient,
    types::*,
    utils::{
        common::to_bytes32,
        error::{ResolverError, ResolverResult},
    },
};

pub const OWNER: Address = address!("0101010101010101010101010101010101010101");
pub const ALICE: Address = address!("0202020202020202020202020202020202020202");
pub const BOB: Address = address!("0303030303030303030303030303030303030303");
pub const CAROL: Address = address!("0404040404040404040404040404040404040404");

pub const STAKING: Address = address!("a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1");
pub const WRAPPED: Address = address!("a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2");
pub const STABLE: Address = address!("a3a3a3a3a3a3a3a3a3a3a3a3a3a3a3a3a3a3a3a3");
pub const OTHER_SYNTH: Address = address!("a4a4a4a4a4a4a4a4a4a4a4a4a4a4a4a4a4a4a4a4");
pub const REGISTRY: Address = address!("a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5");
pub const SYSTEM_SETTINGS: Address = address!("a6a6a6a6a6a6a6a6a6a6a6a6a6a6a6a6a6a6a6a6");
pub const EXCHANGE_RATES: Address = address!("a7a7a7a7a7a7a7a7a7a7a7a7a7a7a7a7a7a7a7a7");
pub const BRIDGE: Address = address!("b1b1b1b1b1b1b1b1b1b1b1b1b1b1b1b1b1b1b1b1");

/// Ticker of a synth that has a contract but no acquisition strategy
pub const OTHER_SYNTH_TICKER: &str = "hETH";

/// `n` whole units at 18 decimals
pub fn units(n: u64) -> U256 {
    U256::from(n) * scale()
}

pub fn contract_set() -> ProtocolContractSet {
    let mut synths = std::collections::BTreeMap::new();
    synths.insert(synth_contract_name(STABLE_TICKER), STABLE);
    synths.insert(synth_contract_name(OTHER_SYNTH_TICKER), OTHER_SYNTH);

    ProtocolContractSet {
        staking_token: STAKING,
        wrapped_native: WRAPPED,
        registry: REGISTRY,
        system_settings: SYSTEM_SETTINGS,
        exchange_rates: EXCHANGE_RATES,
        synths,
        bridge_name: BRIDGE_REGISTRY_NAME.to_string(),
    }
}

pub fn account_pool() -> AccountPool {
    AccountPool::new(
        vec![
            Account::new("owner", OWNER),
            Account::new("alice", ALICE),
            Account::new("bob", BOB),
            Account::new("carol", CAROL),
        ],
        "owner",
    )
    .unwrap()
}

/// Context over an arbitrary ledger, e.g. a mock
pub fn context_with<L: LedgerClient + 'static>(
    ledger: L,
    cross_network_mint: bool,
) -> ResolutionContext {
    ResolutionContext::new(
        Arc::new(ledger),
        contract_set(),
        account_pool(),
        cross_network_mint,
    )
}

#[derive(Default)]
struct FakeState {
    native: HashMap<Address, U256>,
    /// Keyed by (token, holder)
    tokens: HashMap<(Address, Address), U256>,
    locked_staking: HashMap<Address, U256>,
    debt: HashMap<Address, U256>,
    registry: HashMap<B256, Address>,
    /// Bridge address the staking token last loaded from the registry
    cached_bridge: Address,
    issuance_ratio: U256,
    /// Price of one staking unit in stable units, 18 decimals
    staking_price: U256,
    submitted: Vec<Operation>,
    receipts: HashMap<B256, Receipt>,
    revert_selectors: Vec<[u8; 4]>,
    reject_submissions: bool,
    block_number: u64,
}

/// Simulated ledger. Operations execute on submission; receipts are available immediately.
pub struct FakeLedger {
    state: Mutex<FakeState>,
}

impl FakeLedger {
    /// Ledger with the bridge registered and cached, a 20% issuance ratio and
    /// a staking asset price of 2 stable units.
    pub fn new() -> Arc<Self> {
        let bridge_key = to_bytes32(BRIDGE_REGISTRY_NAME).unwrap();
        let mut state = FakeState {
            issuance_ratio: scale() / U256::from(5u64),
            staking_price: units(2),
            cached_bridge: BRIDGE,
            block_number: 100,
            ..Default::default()
        };
        state.registry.insert(bridge_key, BRIDGE);
        Arc::new(Self {
            state: Mutex::new(state),
        })
    }

    pub fn context(self: &Arc<Self>, cross_network_mint: bool) -> ResolutionContext {
        ResolutionContext::new(
            self.clone(),
            contract_set(),
            account_pool(),
            cross_network_mint,
        )
    }

    pub fn set_native(&self, holder: Address, amount: U256) {
        self.state.lock().unwrap().native.insert(holder, amount);
    }

    pub fn set_token(&self, token: Address, holder: Address, amount: U256) {
        self.state
            .lock()
            .unwrap()
            .tokens
            .insert((token, holder), amount);
    }

    pub fn lock_staking(&self, holder: Address, amount: U256) {
        self.state
            .lock()
            .unwrap()
            .locked_staking
            .insert(holder, amount);
    }

    pub fn set_issuance_ratio(&self, ratio: U256) {
        self.state.lock().unwrap().issuance_ratio = ratio;
    }

    pub fn set_staking_price(&self, price: U256) {
        self.state.lock().unwrap().staking_price = price;
    }

    /// Every later operation with this selector reverts
    pub fn revert_on(&self, selector: [u8; 4]) {
        self.state.lock().unwrap().revert_selectors.push(selector);
    }

    /// Every later submission is rejected before inclusion
    pub fn reject_submissions(&self) {
        self.state.lock().unwrap().reject_submissions = true;
    }

    pub fn native(&self, holder: Address) -> U256 {
        self.state.lock().unwrap().native_of(holder)
    }

    pub fn token(&self, token: Address, holder: Address) -> U256 {
        self.state.lock().unwrap().token_of(token, holder)
    }

    pub fn submitted(&self) -> Vec<Operation> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn registry_entry(&self, name: &str) -> Option<Address> {
        let key = to_bytes32(name).unwrap();
        self.state.lock().unwrap().registry.get(&key).copied()
    }

    pub fn cached_bridge(&self) -> Address {
        self.state.lock().unwrap().cached_bridge
    }
}

impl FakeState {
    fn native_of(&self, holder: Address) -> U256 {
        self.native.get(&holder).copied().unwrap_or_default()
    }

    fn token_of(&self, token: Address, holder: Address) -> U256 {
        self.tokens.get(&(token, holder)).copied().unwrap_or_default()
    }

    fn transferable_staking(&self, holder: Address) -> U256 {
        let locked = self.locked_staking.get(&holder).copied().unwrap_or_default();
        self.token_of(STAKING, holder).saturating_sub(locked)
    }

    fn debit_native(&mut self, holder: Address, amount: U256) -> Result<(), String> {
        let balance = self.native_of(holder);
        let remaining = balance
            .checked_sub(amount)
            .ok_or_else(|| "insufficient native balance".to_string())?;
        self.native.insert(holder, remaining);
        Ok(())
    }

    fn credit_native(&mut self, holder: Address, amount: U256) {
        let balance = self.native_of(holder);
        self.native.insert(holder, balance + amount);
    }

    fn debit_token(&mut self, token: Address, holder: Address, amount: U256) -> Result<(), String> {
        if token == STAKING && self.transferable_staking(holder) < amount {
            return Err("cannot transfer locked staking asset".to_string());
        }
        let remaining = self
            .token_of(token, holder)
            .checked_sub(amount)
            .ok_or_else(|| "transfer amount exceeds balance".to_string())?;
        self.tokens.insert((token, holder), remaining);
        Ok(())
    }

    fn credit_token(&mut self, token: Address, holder: Address, amount: U256) {
        let balance = self.token_of(token, holder);
        self.tokens.insert((token, holder), balance + amount);
    }

    fn exchange(&self, amount: U256, source: B256, destination: B256) -> Result<U256, String> {
        let stable = to_bytes32(STABLE_TICKER).unwrap();
        let staking = to_bytes32(STAKING_TICKER).unwrap();
        if source == destination {
            Ok(amount)
        } else if source == stable && destination == staking {
            Ok(amount * scale() / self.staking_price)
        } else if source == staking && destination == stable {
            Ok(amount * self.staking_price / scale())
        } else {
            Err("no rate for currency pair".to_string())
        }
    }

    fn view(&self, to: Address, data: &[u8]) -> Result<Vec<u8>, String> {
        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| "missing selector".to_string())?;
        let decode_err = |err: alloy_sol_types::Error| err.to_string();

        match selector {
            balanceOfCall::SELECTOR => {
                let call = balanceOfCall::abi_decode(data, true).map_err(decode_err)?;
                Ok(balanceOfCall::abi_encode_returns(&(self.token_of(to, call.account),)))
            }
            transferableSynthetixCall::SELECTOR if to == STAKING => {
                let call = transferableSynthetixCall::abi_decode(data, true).map_err(decode_err)?;
                Ok(transferableSynthetixCall::abi_encode_returns(&(
                    self.transferable_staking(call.account),
                )))
            }
            getAddressCall::SELECTOR if to == REGISTRY => {
                let call = getAddressCall::abi_decode(data, true).map_err(decode_err)?;
                let address = self.registry.get(&call.name).copied().unwrap_or_default();
                Ok(getAddressCall::abi_encode_returns(&(address,)))
            }
            issuanceRatioCall::SELECTOR if to == SYSTEM_SETTINGS => {
                Ok(issuanceRatioCall::abi_encode_returns(&(self.issuance_ratio,)))
            }
            getAmountsForExchangeCall::SELECTOR if to == EXCHANGE_RATES => {
                let call = getAmountsForExchangeCall::abi_decode(data, true).map_err(decode_err)?;
                let received = self.exchange(
                    call.sourceAmount,
                    call.sourceCurrencyKey,
                    call.destinationCurrencyKey,
                )?;
                Ok(getAmountsForExchangeCall::abi_encode_returns(&(
                    received,
                    U256::ZERO,
                    U256::ZERO,
                )))
            }
            _ => Err("execution reverted".to_string()),
        }
    }

    fn execute(&mut self, operation: &Operation) -> Result<(), String> {
        let Operation {
            from,
            to,
            value,
            data,
        } = operation.clone();

        if data.is_empty() {
            self.debit_native(from, value)?;
            self.credit_native(to, value);
            return Ok(());
        }

        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| "missing selector".to_string())?;
        if self.revert_selectors.contains(&selector) {
            return Err("forced revert".to_string());
        }
        let decode_err = |err: alloy_sol_types::Error| err.to_string();

        match selector {
            depositCall::SELECTOR if to == WRAPPED => {
                self.debit_native(from, value)?;
                self.credit_token(WRAPPED, from, value);
            }
            transferCall::SELECTOR => {
                let call = transferCall::abi_decode(&data, true).map_err(decode_err)?;
                self.debit_token(to, from, call.amount)?;
                self.credit_token(to, call.to, call.amount);
            }
            mintSecondaryCall::SELECTOR if to == STAKING => {
                if from != self.cached_bridge {
                    return Err("only the bridge can mint".to_string());
                }
                let call = mintSecondaryCall::abi_decode(&data, true).map_err(decode_err)?;
                self.credit_token(STAKING, call.account, call.amount);
            }
            issueSynthsCall::SELECTOR if to == STAKING => {
                let call = issueSynthsCall::abi_decode(&data, true).map_err(decode_err)?;
                let collateral_value = self.token_of(STAKING, from) * self.staking_price / scale();
                let capacity = collateral_value * self.issuance_ratio / scale();
                let debt = self.debt.get(&from).copied().unwrap_or_default();
                if debt + call.amount > capacity {
                    return Err("Amount too large".to_string());
                }
                self.debt.insert(from, debt + call.amount);
                self.locked_staking.insert(
                    from,
                    (debt + call.amount) * scale() / self.issuance_ratio * scale()
                        / self.staking_price,
                );
                self.credit_token(STABLE, from, call.amount);
            }
            importAddressesCall::SELECTOR if to == REGISTRY => {
                if from != OWNER {
                    return Err("only the owner can import addresses".to_string());
                }
                let call = importAddressesCall::abi_decode(&data, true).map_err(decode_err)?;
                for (name, destination) in call.names.iter().zip(call.destinations.iter()) {
                    self.registry.insert(*name, *destination);
                }
            }
            rebuildCachesCall::SELECTOR if to == REGISTRY => {
                let call = rebuildCachesCall::abi_decode(&data, true).map_err(decode_err)?;
                if call.destinations.contains(&STAKING) {
                    let bridge_key = to_bytes32(BRIDGE_REGISTRY_NAME).unwrap();
                    self.cached_bridge =
                        self.registry.get(&bridge_key).copied().unwrap_or_default();
                }
            }
            _ => return Err("execution reverted".to_string()),
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerClient for FakeLedger {
    async fn get_balance(&self, address: Address) -> ResolverResult<U256> {
        Ok(self.native(address))
    }

    async fn eth_call(&self, to: Address, data: Vec<u8>) -> ResolverResult<String> {
        let state = self.state.lock().unwrap();
        state
            .view(to, &data)
            .map(|returned| format!("0x{}", hex::encode(returned)))
            .map_err(ResolverError::NetworkOperation)
    }

    async fn submit(&self, operation: Operation) -> ResolverResult<B256> {
        let mut state = self.state.lock().unwrap();
        if state.reject_submissions {
            return Err(ResolverError::NetworkOperation(
                "submission rejected".to_string(),
            ));
        }

        // State is only touched when the whole operation succeeds.
        let snapshot_tokens = state.tokens.clone();
        let snapshot_native = state.native.clone();
        let status = match state.execute(&operation) {
            Ok(()) => true,
            Err(_) => {
                state.tokens = snapshot_tokens;
                state.native = snapshot_native;
                false
            }
        };

        state.block_number += 1;
        state.submitted.push(operation);
        let transaction_hash = B256::from(U256::from(state.submitted.len()).to_be_bytes::<32>());
        let receipt = Receipt {
            transaction_hash,
            block_number: state.block_number,
            status,
        };
        state.receipts.insert(transaction_hash, receipt);
        Ok(transaction_hash)
    }

    async fn wait_for_receipt(&self, transaction_hash: B256) -> ResolverResult<Receipt> {
        self.state
            .lock()
            .unwrap()
            .receipts
            .get(&transaction_hash)
            .cloned()
            .ok_or_else(|| ResolverError::NetworkOperation("unknown transaction".to_string()))
    }

    async fn block_timestamp(&self) -> ResolverResult<u64> {
        Ok(1_700_000_000 + self.state.lock().unwrap().block_number * 12)
    }
}
