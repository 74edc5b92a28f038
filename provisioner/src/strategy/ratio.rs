//! Conversions between the staking asset and the stable asset.
//!
//! The stable asset is issued as debt against staked collateral: an account
//! can issue up to `collateral value * issuance ratio`. Going the other way,
//! issuing `amount` needs `amount / issuance ratio` worth of collateral, which
//! the exchange rate view turns into a staking asset amount at the current
//! market price.

use alloy_primitives::U256;

use crate::{
    constants::scale,
    context::ResolutionContext,
    types::{getAmountsForExchangeCall, issuanceRatioCall, AssetSymbol},
    utils::{
        common::call_view,
        error::{arithmetic_err, ResolverResult},
    },
};

/// System-wide issuance ratio, 18 decimals
pub async fn issuance_ratio(ctx: &ResolutionContext) -> ResolverResult<U256> {
    Ok(call_view(ctx.ledger(), ctx.contracts.system_settings, &issuanceRatioCall {})
        .await?
        ._0)
}

/// Collateral value, in stable units, needed to issue `amount` at `ratio`.
pub fn collateral_value_for(amount: U256, ratio: U256) -> ResolverResult<U256> {
    amount
        .checked_mul(scale())
        .ok_or_else(|| arithmetic_err("Collateral value overflowed."))?
        .checked_div(ratio)
        .ok_or_else(|| arithmetic_err("Issuance ratio was 0."))
}

/// Inflates a staking requirement by the configured multiplier.
pub fn with_safety_margin(required: U256, multiplier: U256) -> ResolverResult<U256> {
    required
        .checked_mul(multiplier)
        .ok_or_else(|| arithmetic_err("Staking requirement with safety margin overflowed."))
}

async fn exchange_amount(
    ctx: &ResolutionContext,
    amount: U256,
    source: &AssetSymbol,
    destination: &AssetSymbol,
) -> ResolverResult<U256> {
    let call = getAmountsForExchangeCall {
        sourceAmount: amount,
        sourceCurrencyKey: source.currency_key()?,
        destinationCurrencyKey: destination.currency_key()?,
    };
    Ok(call_view(ctx.ledger(), ctx.contracts.exchange_rates, &call)
        .await?
        .amountReceived)
}

/// Staking asset needed as collateral to issue `amount` of the stable asset, before any margin.
pub async fn staking_required_for_stable(
    ctx: &ResolutionContext,
    amount: U256,
) -> ResolverResult<U256> {
    let ratio = issuance_ratio(ctx).await?;
    let collateral_value = collateral_value_for(amount, ratio)?;
    exchange_amount(
        ctx,
        collateral_value,
        &AssetSymbol::StableSynth,
        &AssetSymbol::Staking,
    )
    .await
}

/// Stable asset that `staking` of collateral can back at the current ratio and price.
pub async fn stable_issuable_from_staking(
    ctx: &ResolutionContext,
    staking: U256,
) -> ResolverResult<U256> {
    let ratio = issuance_ratio(ctx).await?;
    let collateral_value = exchange_amount(
        ctx,
        staking,
        &AssetSymbol::Staking,
        &AssetSymbol::StableSynth,
    )
    .await?;
    collateral_value
        .checked_mul(ratio)
        .map(|scaled| scaled / scale())
        .ok_or_else(|| arithmetic_err("Issuable stable amount overflowed."))
}
