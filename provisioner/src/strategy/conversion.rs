//! Stable asset, issued by the authority against staked collateral

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use log::debug;

use crate::{
    context::ResolutionContext,
    journal::{JournalCollection, LogType},
    types::{issueSynthsCall, transferCall, AssetSymbol, STABLE_TICKER},
    utils::{
        common::format_amount,
        error::{ResolverError, ResolverResult},
        transaction_builder::OperationBuilder,
    },
};

use super::{
    dispatcher::resolve,
    inspector::current_amount,
    ratio::{stable_issuable_from_staking, staking_required_for_stable, with_safety_margin},
};

/// Issues `amount` of the stable asset as the authority and hands it to `account`.
///
/// The authority is first topped up to the staking requirement inflated by
/// the configured safety multiplier. Fails with `InsufficientCollateral`,
/// before anything is issued, if its staking balance still cannot back `amount`.
pub async fn acquire_stable_asset(
    ctx: &ResolutionContext,
    account: Address,
    amount: U256,
    path: &[AssetSymbol],
    journal: &mut JournalCollection,
) -> ResolverResult<()> {
    let owner = ctx.owner().address;
    let stable_token = ctx
        .contracts
        .synth(STABLE_TICKER)
        .ok_or_else(|| ResolverError::UnsupportedAsset(STABLE_TICKER.to_string()))?;

    let required = staking_required_for_stable(ctx, amount).await?;
    let collateral = with_safety_margin(required, ctx.settings.safety_multiplier)?;
    journal.append_note(
        LogType::Info,
        format!(
            "Issuing {} hUSD requires {} HAKA, staking {}",
            format_amount(amount),
            format_amount(required),
            format_amount(collateral)
        ),
    );

    resolve(ctx, &AssetSymbol::Staking, owner, collateral, path, journal).await?;

    let held = current_amount(ctx, &AssetSymbol::Staking, owner).await?;
    let issuable = stable_issuable_from_staking(ctx, held).await?;
    debug!(
        "Authority collateral of {} HAKA can back up to {} hUSD",
        format_amount(held),
        format_amount(issuable)
    );
    if issuable < amount {
        return Err(ResolverError::InsufficientCollateral {
            issuable,
            required: amount,
        });
    }

    let receipt = OperationBuilder::default()
        .from(owner)
        .to(ctx.contracts.staking_token)
        .data(issueSynthsCall { amount }.abi_encode())
        .send_and_confirm(ctx.ledger())
        .await?;
    journal.append_submission(
        owner,
        receipt.transaction_hash,
        format!("Issued {} hUSD", format_amount(amount)),
    );

    if account != owner {
        let receipt = OperationBuilder::default()
            .from(owner)
            .to(stable_token)
            .data(transferCall { to: account, amount }.abi_encode())
            .send_and_confirm(ctx.ledger())
            .await?;
        journal.append_submission(
            owner,
            receipt.transaction_hash,
            format!("Transferred {} hUSD to {}", format_amount(amount), account),
        );
    }
    Ok(())
}
