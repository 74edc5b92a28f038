//! Balance Provisioner's Constants

use alloy_primitives::U256;

/// Scale used for fixed point arithmetic
pub const SCALE: u128 = 1_000_000_000_000_000_000; // e18
pub fn scale() -> U256 {
    U256::from(SCALE)
}

/// Minimum native balance a peer needs before it is drained for funding
const FUNDING_THRESHOLD_RAW: u128 = 1_000 * SCALE; // 1000 units
pub fn funding_threshold() -> U256 {
    U256::from(FUNDING_THRESHOLD_RAW)
}

/// Multiplier applied to the staking requirement of a stable asset issuance.
/// Works around "Amount too large" rejections caused by price and ratio drift
/// between the requirement computation and the issuance.
pub const STAKING_SAFETY_MULTIPLIER: u64 = 12;
pub fn staking_safety_multiplier() -> U256 {
    U256::from(STAKING_SAFETY_MULTIPLIER)
}

/// Registry name of the bridge allowed to mint on the secondary network
pub const BRIDGE_REGISTRY_NAME: &str = "SynthetixBridgeToBase";

/// Prefix of the stable and synthetic asset contract names
pub const SYNTH_CONTRACT_PREFIX: &str = "Synth";
