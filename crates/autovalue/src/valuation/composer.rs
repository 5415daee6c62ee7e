use super::domain::{AdjustmentFactor, ValuationBreakdown, VehicleFacts};
use super::trim::TrimSource;
use super::{features, mileage, reliability, trim};
use tracing::{debug, warn};

/// Validation errors raised while composing a valuation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValuationError {
    #[error("base price is required")]
    MissingBasePrice,
    #[error("base price must be a positive, finite amount (found {value})")]
    InvalidBasePrice { value: f64 },
}

/// Apply trim, mileage and feature adjustments to a base market price.
pub fn compose(base_price: f64, facts: &VehicleFacts) -> Result<ValuationBreakdown, ValuationError> {
    if !base_price.is_finite() || base_price <= 0.0 {
        warn!(base_price, "rejecting valuation with invalid base price");
        return Err(ValuationError::InvalidBasePrice { value: base_price });
    }

    let trim = trim::classify(facts.trim.as_deref(), Some(facts.model.as_str()));
    let listed_tier = reliability::lookup(&facts.make);
    let reliability_tier = listed_tier.unwrap_or_default();
    let mileage = mileage::penalty(facts.mileage, reliability_tier);
    let features = features::aggregate(&facts.features);

    if listed_tier.is_none() {
        debug!(make = %facts.make, "unrecognized make, using default reliability tier");
    }
    if trim.source == TrimSource::Unmatched && facts.trim.is_some() {
        debug!(trim = ?facts.trim, "trim matched no keyword, treating as base");
    }

    let trim_percent = trim.total_percent();
    let trim_keyword = if trim.matched_keywords.is_empty() {
        None
    } else {
        Some(trim.matched_keywords.join(", "))
    };
    let trim_factor = AdjustmentFactor::new("trim", trim_percent, trim_keyword);
    let mileage_factor = AdjustmentFactor::new("mileage", mileage.percent, None);
    let adjusted_price = base_price
        * trim_factor.multiplier()
        * mileage_factor.multiplier()
        * (1.0 + features.total_percent);

    debug!(
        base_price,
        adjusted_price,
        trim_tier = trim.tier.label(),
        trim_percent,
        reliability_tier = reliability_tier.label(),
        mileage_percent = mileage.percent,
        feature_bonus = features.total_percent,
        feature_bonus_capped = features.capped,
        "composed vehicle valuation"
    );

    Ok(ValuationBreakdown {
        base_price,
        trim_tier: trim.tier,
        trim_factor,
        reliability_tier,
        mileage_factor,
        mileage_label: mileage.label,
        feature_factors: features.breakdown,
        feature_bonus: features.total_percent,
        feature_bonus_capped: features.capped,
        adjusted_price,
    })
}
