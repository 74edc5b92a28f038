use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::types::AssetSymbol;

/// Balance provisioner result
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Balance provisioner errors
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ResolverError {
    /// The symbol has no backing contract or no acquisition strategy
    #[error("Symbol {0} not yet supported")]
    UnsupportedAsset(String),
    /// Every peer in the pool is below the funding threshold
    #[error("Unable to get native currency: no peer holds at least {threshold} to send {amount}")]
    NoFundedPeer { amount: U256, threshold: U256 },
    /// The authority's transferable staking supply is exhausted and minting is disabled
    #[error("There is no more staking asset: authority can transfer {available}, {required} required")]
    InsufficientAdministrativeSupply { available: U256, required: U256 },
    /// The authority's collateral cannot back the requested stable asset issuance
    #[error("Authority collateral backs {issuable} of stable asset, {required} required")]
    InsufficientCollateral { issuable: U256, required: U256 },
    /// No account in the pool has the requested name
    #[error("No account named `{0}` in the pool")]
    UnknownAccount(String),
    /// Submission rejected, confirmation failed, or the operation reverted
    #[error("Network operation failed: {0}")]
    NetworkOperation(String),
    /// Decoding issue
    #[error("Decoding error: {0}")]
    DecodingError(String),
    /// Arithmetic error
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),
    /// A strategy re-entered the dispatcher for an asset already being resolved
    #[error("Cyclic dependency while resolving {symbol}: path {path}")]
    CyclicDependency { symbol: String, path: String },
    /// A strategy requested an asset that is not one of its declared prerequisites
    #[error("{requested} is not a declared prerequisite of {requester}")]
    UndeclaredDependency { requester: String, requested: String },
    /// The strategy finished but the balance is still below the target
    #[error("{symbol} balance of {account} is {actual} after resolution, target was {target}")]
    ShortfallNotClosed {
        symbol: String,
        account: Address,
        target: U256,
        actual: U256,
    },
    /// The scoped work and the role restoration both failed
    #[error("Scoped work failed ({work}) and restoring role {role} also failed ({restore})")]
    RoleRestoreFailed {
        role: String,
        work: Box<ResolverError>,
        restore: Box<ResolverError>,
    },
}

impl ResolverError {
    /// Shorthand for a cycle error built from the active resolution path
    pub fn cyclic(symbol: &AssetSymbol, path: &[AssetSymbol]) -> Self {
        let path = path
            .iter()
            .map(|symbol| symbol.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        ResolverError::CyclicDependency {
            symbol: symbol.to_string(),
            path,
        }
    }
}

pub fn arithmetic_err<S: AsRef<str>>(s: S) -> ResolverError {
    ResolverError::Arithmetic(s.as_ref().to_string())
}
