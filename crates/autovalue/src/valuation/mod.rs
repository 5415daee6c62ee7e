//! Deterministic vehicle valuation: trim, reliability, mileage and feature adjustments applied to an
//! externally sourced base market price, plus the selling strategies derived from the result.
//!
//! Every component is a pure function over compiled-in lookup tables, so identical requests always
//! produce identical reports and the engine can be shared across request handlers without locking.

mod composer;
pub mod domain;
pub mod features;
pub mod mileage;
mod normalizer;
pub mod reliability;
pub mod router;
pub mod strategy;
pub mod trim;

#[cfg(test)]
mod tests;

pub use composer::{compose, ValuationError};
pub use domain::{
    AdjustmentFactor, PricingStrategyTier, ReliabilityTier, StrategyKind, TrimTier,
    ValuationBreakdown, VehicleFacts,
};
pub use features::{FeatureBonus, FEATURE_BONUS_CAP};
pub use mileage::MileagePenalty;
pub use router::valuation_router;
pub use strategy::{strategies, DEFAULT_TARGET_PROFIT};
pub use trim::{TrimClassification, TrimSource};

use serde::{Deserialize, Serialize};

/// Engine-level settings that callers may tune; the lookup tables themselves are fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    pub default_target_profit: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            default_target_profit: DEFAULT_TARGET_PROFIT,
        }
    }
}

/// Inbound record from the listing pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub trim: Option<String>,
    /// Negative readings are treated as missing; readings past `u32::MAX` saturate.
    #[serde(default)]
    pub mileage: Option<i64>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub target_profit: Option<f64>,
}

impl ValuationRequest {
    pub fn facts(&self) -> VehicleFacts {
        VehicleFacts {
            make: self.make.clone(),
            model: self.model.clone(),
            trim: self.trim.clone(),
            mileage: self
                .mileage
                .filter(|value| *value >= 0)
                .map(|value| u32::try_from(value).unwrap_or(u32::MAX)),
            features: self.features.clone(),
        }
    }
}

/// Breakdown plus strategy tiers, serialized as the engine's response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub breakdown: ValuationBreakdown,
    pub target_profit: f64,
    pub strategies: Vec<PricingStrategyTier>,
}

impl ValuationReport {
    pub fn strategy(&self, kind: StrategyKind) -> Option<&PricingStrategyTier> {
        self.strategies.iter().find(|tier| tier.name == kind)
    }
}

/// Stateless evaluator applying the valuation rules to inbound requests.
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    config: ValuationConfig,
}

impl ValuationEngine {
    pub fn new(config: ValuationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    pub fn valuate(&self, request: &ValuationRequest) -> Result<ValuationReport, ValuationError> {
        let base_price = request.base_price.ok_or(ValuationError::MissingBasePrice)?;
        let breakdown = compose(base_price, &request.facts())?;

        let target_profit = request
            .target_profit
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(self.config.default_target_profit);
        let strategies = strategies(breakdown.adjusted_price, target_profit);

        Ok(ValuationReport {
            breakdown,
            target_profit,
            strategies,
        })
    }
}
