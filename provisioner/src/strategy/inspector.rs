//! Balance reads

use alloy_primitives::{Address, U256};

use crate::{
    context::ResolutionContext,
    types::{balanceOfCall, transferableSynthetixCall, AssetSymbol},
    utils::{
        common::call_view,
        error::{ResolverError, ResolverResult},
    },
};

/// Where a symbol's balances are recorded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backing {
    /// Ledger-level native balance
    Ledger,
    /// Token contract balance
    Contract(Address),
}

/// Resolves the contract backing `symbol` without touching the ledger.
pub fn backing_contract(ctx: &ResolutionContext, symbol: &AssetSymbol) -> ResolverResult<Backing> {
    let contracts = &ctx.contracts;
    match symbol {
        AssetSymbol::Native => Ok(Backing::Ledger),
        AssetSymbol::WrappedNative => Ok(Backing::Contract(contracts.wrapped_native)),
        AssetSymbol::Staking => Ok(Backing::Contract(contracts.staking_token)),
        AssetSymbol::StableSynth | AssetSymbol::Synth(_) => contracts
            .synth(symbol.ticker())
            .map(Backing::Contract)
            .ok_or_else(|| ResolverError::UnsupportedAsset(symbol.to_string())),
    }
}

/// Returns the amount of `symbol` currently held by `account`.
pub async fn current_amount(
    ctx: &ResolutionContext,
    symbol: &AssetSymbol,
    account: Address,
) -> ResolverResult<U256> {
    match backing_contract(ctx, symbol)? {
        Backing::Ledger => ctx.ledger().get_balance(account).await,
        Backing::Contract(token) => {
            let call = balanceOfCall { account };
            Ok(call_view(ctx.ledger(), token, &call).await?._0)
        }
    }
}

/// Staking asset `account` can transfer right now. Can be lower than its balance because of locking.
pub async fn transferable_staking(ctx: &ResolutionContext, account: Address) -> ResolverResult<U256> {
    let call = transferableSynthetixCall { account };
    Ok(call_view(ctx.ledger(), ctx.contracts.staking_token, &call)
        .await?
        .transferable)
}
