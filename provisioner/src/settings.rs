//! Resolver settings

use alloy_primitives::U256;
use serde::Deserialize;

use crate::{
    constants::{funding_threshold, staking_safety_multiplier},
    utils::{
        common::string_to_u256,
        error::{ResolverError, ResolverResult},
    },
};

/// Tunables of the acquisition strategies.
/// Defaults match the values the strategies were calibrated with.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolverSettings {
    /// Minimum native balance a peer must hold to be selected as a funder
    pub funding_threshold: U256,
    /// Multiplier applied to the staking requirement before issuing stable asset
    pub safety_multiplier: U256,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            funding_threshold: funding_threshold(),
            safety_multiplier: staking_safety_multiplier(),
        }
    }
}

impl ResolverSettings {
    /// Sets the peer funding threshold.
    pub fn funding_threshold(&mut self, funding_threshold: U256) -> &mut Self {
        self.funding_threshold = funding_threshold;
        self
    }

    /// Sets the staking requirement multiplier.
    pub fn safety_multiplier(&mut self, safety_multiplier: U256) -> &mut Self {
        self.safety_multiplier = safety_multiplier;
        self
    }

    /// Parses settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> ResolverResult<Self> {
        let input: ResolverSettingsInput = serde_json::from_str(json)
            .map_err(|err| ResolverError::DecodingError(err.to_string()))?;
        input.try_into()
    }
}

/// String form of the settings, as found in fixture files
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResolverSettingsInput {
    /// Decimal or `0x` hex amount, 18 decimals
    pub funding_threshold: Option<String>,
    pub safety_multiplier: Option<u64>,
}

impl TryFrom<ResolverSettingsInput> for ResolverSettings {
    type Error = ResolverError;

    fn try_from(value: ResolverSettingsInput) -> Result<Self, Self::Error> {
        let mut settings = ResolverSettings::default();
        if let Some(threshold) = value.funding_threshold {
            settings.funding_threshold(string_to_u256(&threshold)?);
        }
        if let Some(multiplier) = value.safety_multiplier {
            if multiplier == 0 {
                return Err(ResolverError::DecodingError(
                    "The safety multiplier must be at least 1.".to_string(),
                ));
            }
            settings.safety_multiplier(U256::from(multiplier));
        }
        Ok(settings)
    }
}
