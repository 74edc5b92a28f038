//! Staking asset from the administrative authority.
//!
//! The authority hands out its transferable supply. When that runs out, and
//! the context allows it, fresh supply is minted through the secondary
//! network entry point, which only the registered bridge may call. The
//! authority temporarily takes over the bridge role for that single call.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;

use crate::{
    context::ResolutionContext,
    journal::{JournalCollection, LogType},
    types::{mintSecondaryCall, transferCall},
    utils::{
        common::format_amount,
        error::{ResolverError, ResolverResult},
        transaction_builder::OperationBuilder,
    },
};

use super::{inspector::transferable_staking, role::with_temporary_role};

/// Gives `account` `amount` more staking asset.
pub async fn acquire_staking_asset(
    ctx: &ResolutionContext,
    account: Address,
    amount: U256,
    journal: &mut JournalCollection,
) -> ResolverResult<()> {
    let owner = ctx.owner().address;
    let transferable = transferable_staking(ctx, owner).await?;
    journal.append_note(
        LogType::Info,
        format!(
            "Authority {} can transfer {} HAKA",
            owner,
            format_amount(transferable)
        ),
    );

    // Transfers to itself do not grow the authority's balance, only minting does.
    let missing = if account == owner {
        amount
    } else {
        amount.saturating_sub(transferable)
    };

    if missing > U256::ZERO {
        if !ctx.cross_network_mint {
            // Nothing the authority holds can be transferred to itself.
            let available = if account == owner {
                U256::ZERO
            } else {
                transferable
            };
            return Err(ResolverError::InsufficientAdministrativeSupply {
                available,
                required: amount,
            });
        }
        mint_on_secondary_network(ctx, missing, journal).await?;
    }

    if account != owner {
        let receipt = OperationBuilder::default()
            .from(owner)
            .to(ctx.contracts.staking_token)
            .data(transferCall { to: account, amount }.abi_encode())
            .send_and_confirm(ctx.ledger())
            .await?;
        journal.append_submission(
            owner,
            receipt.transaction_hash,
            format!("Transferred {} HAKA to {}", format_amount(amount), account),
        );
    }
    Ok(())
}

/// Mints `amount` staking asset to the authority through the secondary network entry point.
pub async fn mint_on_secondary_network(
    ctx: &ResolutionContext,
    amount: U256,
    journal: &mut JournalCollection,
) -> ResolverResult<()> {
    let owner = ctx.owner().address;
    let staking_token = ctx.contracts.staking_token;
    let ledger = ctx.ledger();

    let receipt = with_temporary_role(
        ctx,
        &ctx.contracts.bridge_name,
        owner,
        &[staking_token],
        journal,
        move || async move {
            OperationBuilder::default()
                .from(owner)
                .to(staking_token)
                .data(mintSecondaryCall { account: owner, amount }.abi_encode())
                .send_and_confirm(ledger)
                .await
        },
    )
    .await?;

    journal.append_submission(
        owner,
        receipt.transaction_hash,
        format!("Minted {} HAKA on the secondary network", format_amount(amount)),
    );
    Ok(())
}
