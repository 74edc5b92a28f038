//! Scoped role substitution in the name registry.
//!
//! Some entry points only accept calls from whatever address the registry
//! maps a role name to. [`with_temporary_role`] points that name at another
//! actor for the duration of a piece of work and always points it back, on
//! success and on failure alike.

use std::future::Future;

use alloy_primitives::{Address, B256};
use alloy_sol_types::SolCall;
use log::{info, warn};

use crate::{
    context::ResolutionContext,
    journal::JournalCollection,
    types::{getAddressCall, importAddressesCall, rebuildCachesCall},
    utils::{
        common::{call_view, to_bytes32},
        error::{ResolverError, ResolverResult},
        transaction_builder::OperationBuilder,
    },
};

/// Points `role` at `destination` and makes `dependents` reload their cached registry entries.
/// Both operations are signed by the administrative authority.
async fn point_role(
    ctx: &ResolutionContext,
    role: B256,
    destination: Address,
    dependents: &[Address],
    journal: &mut JournalCollection,
) -> ResolverResult<()> {
    let authority = ctx.owner().address;
    let registry = ctx.contracts.registry;

    let import = importAddressesCall {
        names: vec![role],
        destinations: vec![destination],
    };
    let receipt = OperationBuilder::default()
        .from(authority)
        .to(registry)
        .data(import.abi_encode())
        .send_and_confirm(ctx.ledger())
        .await?;
    journal.append_submission(
        authority,
        receipt.transaction_hash,
        format!("Registry entry {} now points to {}", role, destination),
    );

    let rebuild = rebuildCachesCall {
        destinations: dependents.to_vec(),
    };
    let receipt = OperationBuilder::default()
        .from(authority)
        .to(registry)
        .data(rebuild.abi_encode())
        .send_and_confirm(ctx.ledger())
        .await?;
    journal.append_submission(
        authority,
        receipt.transaction_hash,
        format!("Rebuilt registry caches of {} contract(s)", dependents.len()),
    );
    Ok(())
}

/// Runs `work` while the registry maps `role_name` to `actor`.
///
/// The original mapping is read first and restored after `work` finishes,
/// whatever its outcome. If repointing fails halfway, restoration still runs.
///
/// # Returns
/// * The result of `work` when the restoration succeeds
/// * The restoration error when only the restoration fails
/// * `ResolverError::RoleRestoreFailed` when both fail
pub async fn with_temporary_role<T, F, Fut>(
    ctx: &ResolutionContext,
    role_name: &str,
    actor: Address,
    dependents: &[Address],
    journal: &mut JournalCollection,
    work: F,
) -> ResolverResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ResolverResult<T>>,
{
    let role = to_bytes32(role_name)?;
    let original = call_view(ctx.ledger(), ctx.contracts.registry, &getAddressCall { name: role })
        .await?
        ._0;
    info!(
        "Temporarily assigning role {} (held by {}) to {}",
        role_name, original, actor
    );

    let outcome = match point_role(ctx, role, actor, dependents, journal).await {
        Ok(()) => work().await,
        Err(err) => Err(err),
    };

    let restored = point_role(ctx, role, original, dependents, journal).await;

    match (outcome, restored) {
        (outcome, Ok(())) => outcome,
        (Ok(_), Err(restore)) => {
            warn!(
                "Role {} is still assigned to {}: {}",
                role_name, actor, restore
            );
            Err(restore)
        }
        (Err(work), Err(restore)) => {
            warn!(
                "Role {} is still assigned to {}: {}",
                role_name, actor, restore
            );
            Err(ResolverError::RoleRestoreFailed {
                role: role_name.to_string(),
                work: Box::new(work),
                restore: Box::new(restore),
            })
        }
    }
}
