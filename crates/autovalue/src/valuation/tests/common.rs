use axum::response::Response;
use serde_json::Value;

use crate::valuation::{
    ValuationBreakdown, ValuationConfig, ValuationEngine, ValuationRequest, VehicleFacts,
};

pub(super) const TOLERANCE: f64 = 1e-6;

pub(super) fn assert_relative_eq(actual: f64, expected: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        ((actual - expected) / scale).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

/// Product of the factors recorded in a breakdown, recomputed independently of the composer.
pub(super) fn recomposed_price(breakdown: &ValuationBreakdown) -> f64 {
    breakdown.base_price
        * (1.0 + breakdown.trim_factor.percent)
        * (1.0 + breakdown.mileage_factor.percent)
        * (1.0 + breakdown.feature_bonus)
}

pub(super) fn toyota_le() -> VehicleFacts {
    VehicleFacts::new("Toyota", "Corolla")
        .with_trim("LE")
        .with_mileage(40_000)
}

pub(super) fn malibu_ltz() -> VehicleFacts {
    VehicleFacts::new("Chevrolet", "Malibu")
        .with_trim("LTZ")
        .with_mileage(160_000)
        .with_features(["leather seats", "sunroof"])
}

pub(super) fn unknown_make() -> VehicleFacts {
    VehicleFacts::new("Zyntho", "Aurora").with_features(["backup camera"])
}

pub(super) fn fully_loaded() -> VehicleFacts {
    VehicleFacts::new("BMW", "X5")
        .with_trim("xDrive40i Premium Limited")
        .with_mileage(120_000)
        .with_features([
            "Blind Spot Monitoring",
            "Heated Seats",
            "Panoramic Moonroof",
            "Navigation",
            "Turbo",
            "Third Row",
        ])
}

pub(super) fn request(base_price: f64, facts: &VehicleFacts) -> ValuationRequest {
    ValuationRequest {
        base_price: Some(base_price),
        make: facts.make.clone(),
        model: facts.model.clone(),
        trim: facts.trim.clone(),
        mileage: facts.mileage.map(i64::from),
        features: facts.features.clone(),
        target_profit: None,
    }
}

pub(super) fn valuation_engine() -> ValuationEngine {
    ValuationEngine::new(ValuationConfig::default())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
