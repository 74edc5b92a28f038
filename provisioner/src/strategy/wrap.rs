//! Wrapped native asset, deposited 1:1 from native currency

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;

use crate::{
    context::ResolutionContext,
    journal::JournalCollection,
    types::{depositCall, AssetSymbol},
    utils::{common::format_amount, error::ResolverResult, transaction_builder::OperationBuilder},
};

use super::dispatcher::resolve;

/// Wraps `amount` of native currency for `account`, topping up native currency first if needed.
pub async fn acquire_wrapped(
    ctx: &ResolutionContext,
    account: Address,
    amount: U256,
    path: &[AssetSymbol],
    journal: &mut JournalCollection,
) -> ResolverResult<()> {
    resolve(ctx, &AssetSymbol::Native, account, amount, path, journal).await?;

    let receipt = OperationBuilder::default()
        .from(account)
        .to(ctx.contracts.wrapped_native)
        .value(amount)
        .data(depositCall {}.abi_encode())
        .send_and_confirm(ctx.ledger())
        .await?;

    journal.append_submission(
        account,
        receipt.transaction_hash,
        format!("Wrapped {} ETH", format_amount(amount)),
    );
    Ok(())
}
