//! Native currency from already funded peers

use alloy_primitives::{Address, U256};
use log::info;

use crate::{
    context::ResolutionContext,
    journal::JournalCollection,
    types::Account,
    utils::{
        common::format_amount,
        error::{ResolverError, ResolverResult},
        transaction_builder::OperationBuilder,
    },
};

/// Returns the first peer of `account`, in pool order, holding at least the funding threshold.
pub async fn select_funded_peer<'a>(
    ctx: &'a ResolutionContext,
    account: Address,
) -> ResolverResult<Option<&'a Account>> {
    let threshold = ctx.settings.funding_threshold;
    for peer in ctx.accounts.peers_of(account) {
        let balance = ctx.ledger().get_balance(peer.address).await?;
        if balance >= threshold {
            return Ok(Some(peer));
        }
    }
    Ok(None)
}

/// Sends exactly `amount` of native currency to `account` from the first funded peer.
pub async fn acquire_native(
    ctx: &ResolutionContext,
    account: Address,
    amount: U256,
    journal: &mut JournalCollection,
) -> ResolverResult<()> {
    let peer = select_funded_peer(ctx, account)
        .await?
        .ok_or(ResolverError::NoFundedPeer {
            amount,
            threshold: ctx.settings.funding_threshold,
        })?;
    info!("Funding {} from peer {} ({})", account, peer.name, peer.address);

    let receipt = OperationBuilder::default()
        .from(peer.address)
        .to(account)
        .value(amount)
        .send_and_confirm(ctx.ledger())
        .await?;

    journal.append_submission(
        peer.address,
        receipt.transaction_hash,
        format!(
            "{} sent {} ETH to {}",
            peer.name,
            format_amount(amount),
            account
        ),
    );
    Ok(())
}
