//! Balance resolution entry points.
//!
//! [`ensure_balance`] reads the current balance, and when it is below the
//! target hands the shortfall to the strategy of the symbol. Strategies that
//! need another asset first come back through [`resolve`] with the path of
//! symbols being resolved, so undeclared or cyclic requests are refused.

use std::{future::Future, pin::Pin};

use alloy_primitives::{Address, U256};
use log::info;

use crate::{
    context::ResolutionContext,
    journal::{JournalCollection, LogType},
    types::{Account, AssetSymbol},
    utils::{
        common::format_amount,
        error::{arithmetic_err, ResolverError, ResolverResult},
    },
};

use super::{
    conversion::acquire_stable_asset,
    graph::verify_acyclic,
    inspector::{backing_contract, current_amount},
    mint::acquire_staking_asset,
    peer::acquire_native,
    wrap::acquire_wrapped,
};

/// One balance to guarantee
#[derive(Clone, Debug, PartialEq)]
pub struct BalanceRequest {
    pub symbol: AssetSymbol,
    pub account: Account,
    pub target: U256,
}

impl BalanceRequest {
    pub fn new(symbol: AssetSymbol, account: Account, target: U256) -> Self {
        Self {
            symbol,
            account,
            target,
        }
    }
}

/// Guarantees `account` holds at least `target` of `symbol`.
///
/// # Returns
/// The journal of every read and confirmed operation. A balance already at
/// or above the target yields a journal without submissions.
pub async fn ensure_balance(
    ctx: &ResolutionContext,
    symbol: &AssetSymbol,
    account: &Account,
    target: U256,
) -> ResolverResult<JournalCollection> {
    verify_acyclic()?;
    backing_contract(ctx, symbol)?;

    let opened_at = ctx.ledger().block_timestamp().await?;
    let mut journal = JournalCollection::open(opened_at);
    ensure_balance_with_journal(ctx, symbol, account, target, &mut journal).await?;
    Ok(journal)
}

/// Same as [`ensure_balance`], recording into a journal owned by the caller.
pub async fn ensure_balance_with_journal(
    ctx: &ResolutionContext,
    symbol: &AssetSymbol,
    account: &Account,
    target: U256,
    journal: &mut JournalCollection,
) -> ResolverResult<()> {
    info!(
        "Ensuring {} holds {} {}",
        account.name,
        format_amount(target),
        symbol
    );
    resolve(ctx, symbol, account.address, target, &[], journal).await
}

/// Resolves `requests` in order, stopping at the first failure.
pub async fn ensure_balances(
    ctx: &ResolutionContext,
    requests: &[BalanceRequest],
) -> ResolverResult<JournalCollection> {
    verify_acyclic()?;
    for request in requests {
        backing_contract(ctx, &request.symbol)?;
    }

    let opened_at = ctx.ledger().block_timestamp().await?;
    let mut journal = JournalCollection::open(opened_at);
    for request in requests {
        ensure_balance_with_journal(
            ctx,
            &request.symbol,
            &request.account,
            request.target,
            &mut journal,
        )
        .await?;
    }
    journal.append_note(
        LogType::Info,
        format!(
            "{} balance(s) ensured with {} operation(s)",
            requests.len(),
            journal.submissions()
        ),
    );
    Ok(journal)
}

/// Brings the `symbol` balance of `account` to at least `target`.
///
/// `path` holds the symbols whose strategies are currently running, outermost
/// first. The request must be a declared prerequisite of the innermost one.
pub(crate) fn resolve<'a>(
    ctx: &'a ResolutionContext,
    symbol: &'a AssetSymbol,
    account: Address,
    target: U256,
    path: &'a [AssetSymbol],
    journal: &'a mut JournalCollection,
) -> Pin<Box<dyn Future<Output = ResolverResult<()>> + Send + 'a>> {
    Box::pin(async move {
        if path.contains(symbol) {
            let mut cycle = path.to_vec();
            cycle.push(symbol.clone());
            return Err(ResolverError::cyclic(symbol, &cycle));
        }
        if let Some(requester) = path.last() {
            if !requester.prerequisites().contains(symbol) {
                return Err(ResolverError::UndeclaredDependency {
                    requester: requester.to_string(),
                    requested: symbol.to_string(),
                });
            }
        }

        backing_contract(ctx, symbol)?;
        let current = current_amount(ctx, symbol, account).await?;
        journal.append_balance(symbol, account, "old", current);
        if current >= target {
            return Ok(());
        }

        let shortfall = target
            .checked_sub(current)
            .ok_or_else(|| arithmetic_err("Shortfall underflowed."))?;
        journal.append_strategy(symbol, account, shortfall);

        let mut active = path.to_vec();
        active.push(symbol.clone());

        match symbol {
            AssetSymbol::Native => acquire_native(ctx, account, shortfall, journal).await?,
            AssetSymbol::WrappedNative => {
                acquire_wrapped(ctx, account, shortfall, &active, journal).await?
            }
            AssetSymbol::Staking => acquire_staking_asset(ctx, account, shortfall, journal).await?,
            AssetSymbol::StableSynth => {
                acquire_stable_asset(ctx, account, shortfall, &active, journal).await?
            }
            AssetSymbol::Synth(_) => {
                return Err(ResolverError::UnsupportedAsset(symbol.to_string()))
            }
        }

        let updated = current_amount(ctx, symbol, account).await?;
        journal.append_balance(symbol, account, "new", updated);
        if updated < target {
            return Err(ResolverError::ShortfallNotClosed {
                symbol: symbol.to_string(),
                account,
                target,
                actual: updated,
            });
        }
        Ok(())
    })
}
