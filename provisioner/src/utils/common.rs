//! Common utility and helper functions that are used across the project

use std::str::FromStr;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolCall;

use super::error::*;

use crate::{constants::SCALE, ledger::LedgerClient};

/// Converts String to Address and returns ResolverError on failure
pub fn string_to_address(input: String) -> ResolverResult<Address> {
    Address::from_str(&input).map_err(|err| ResolverError::DecodingError(format!("{:#?}", err)))
}

/// Converts a decimal (or `0x` prefixed hex) string to `U256`
pub fn string_to_u256(input: &str) -> ResolverResult<U256> {
    let parsed = match input.strip_prefix("0x") {
        Some(hex_digits) => U256::from_str_radix(hex_digits, 16),
        None => U256::from_str_radix(input, 10),
    };
    parsed.map_err(|err| ResolverError::DecodingError(format!("{:#?}", err)))
}

/// Right pads a short string into a `bytes32` key, the way registry names and currency keys are stored.
pub fn to_bytes32(input: &str) -> ResolverResult<B256> {
    let raw = input.as_bytes();
    if raw.len() > 32 {
        return Err(ResolverError::DecodingError(format!(
            "`{}` does not fit in 32 bytes.",
            input
        )));
    }
    let mut padded_bytes = [0u8; 32];
    padded_bytes[..raw.len()].copy_from_slice(raw);
    Ok(B256::from(padded_bytes))
}

/// Renders an 18 decimals amount as a human readable decimal string
pub fn format_amount(amount: U256) -> String {
    let scale = U256::from(SCALE);
    let whole = amount / scale;
    let fraction = (amount % scale).to_string();
    let fraction = format!("{:0>18}", fraction);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// Returns `T` from Solidity struct.
pub fn decode_abi_response<T, F: SolCall<Return = T>>(hex_data: String) -> ResolverResult<T> {
    let stripped_hex = if hex_data.starts_with("0x") {
        hex_data[2..].to_string()
    } else {
        hex_data
    };
    let hex_bytes =
        hex::decode(stripped_hex).map_err(|err| ResolverError::DecodingError(err.to_string()))?;
    F::abi_decode_returns(&hex_bytes, false)
        .map_err(|err| ResolverError::DecodingError(err.to_string()))
}

/// Performs a read-only contract call and decodes its return values
pub async fn call_view<F: SolCall>(
    ledger: &dyn LedgerClient,
    to: Address,
    call: &F,
) -> ResolverResult<F::Return> {
    let response = ledger.eth_call(to, call.abi_encode()).await?;
    decode_abi_response::<F::Return, F>(response)
}
