use super::domain::ReliabilityTier;
use serde::{Deserialize, Serialize};

/// Shared penalty steps indexed by bracket.
///
/// Step 1 is steeper than step 2. The inversion is carried over from the pricing rules this curve
/// reproduces; see DESIGN.md before changing it.
pub const PENALTY_STEPS: [f64; 5] = [0.0, -0.115, -0.05, -0.10, -0.15];

pub const BASE_RANGE_LABEL: &str = "within base range";

const TIER_A_THRESHOLDS: [u32; 4] = [200_000, 240_000, 280_000, 320_000];
const TIER_B_THRESHOLDS: [u32; 4] = [150_000, 180_000, 210_000, 250_000];
const TIER_C_THRESHOLDS: [u32; 4] = [100_000, 130_000, 160_000, 200_000];

pub fn thresholds(tier: ReliabilityTier) -> &'static [u32; 4] {
    match tier {
        ReliabilityTier::TierA => &TIER_A_THRESHOLDS,
        ReliabilityTier::TierB => &TIER_B_THRESHOLDS,
        ReliabilityTier::TierC => &TIER_C_THRESHOLDS,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileagePenalty {
    pub percent: f64,
    pub label: String,
    /// Index into [`PENALTY_STEPS`]; `None` when no mileage was supplied.
    pub bracket: Option<usize>,
}

/// Look up the depreciation step for a mileage reading on a tier's curve.
pub fn penalty(mileage: Option<u32>, tier: ReliabilityTier) -> MileagePenalty {
    let mileage = match mileage {
        Some(value) if value > 0 => value,
        _ => {
            return MileagePenalty {
                percent: 0.0,
                label: BASE_RANGE_LABEL.to_string(),
                bracket: None,
            }
        }
    };

    let limits = thresholds(tier);
    let bracket = limits
        .iter()
        .position(|&limit| mileage < limit)
        .unwrap_or(limits.len());
    let percent = PENALTY_STEPS[bracket];

    MileagePenalty {
        percent,
        label: bracket_label(tier, bracket, percent),
        bracket: Some(bracket),
    }
}

fn bracket_label(tier: ReliabilityTier, bracket: usize, percent: f64) -> String {
    let limits = thresholds(tier);
    let range = if bracket == 0 {
        format!("under {} mi", group_thousands(limits[0]))
    } else if bracket >= limits.len() {
        format!("{}+ mi", group_thousands(limits[limits.len() - 1]))
    } else {
        format!(
            "{}-{} mi",
            group_thousands(limits[bracket - 1]),
            group_thousands(limits[bracket] - 1)
        )
    };
    format!("{}: {} ({:+.1}%)", tier.label(), range, percent * 100.0)
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_zero_mileage_has_no_penalty() {
        for tier in [
            ReliabilityTier::TierA,
            ReliabilityTier::TierB,
            ReliabilityTier::TierC,
        ] {
            for mileage in [None, Some(0)] {
                let result = penalty(mileage, tier);
                assert_eq!(result.percent, 0.0);
                assert_eq!(result.label, BASE_RANGE_LABEL);
                assert_eq!(result.bracket, None);
            }
        }
    }

    #[test]
    fn mileage_below_first_threshold_uses_step_zero() {
        let result = penalty(Some(40_000), ReliabilityTier::TierA);
        assert_eq!(result.bracket, Some(0));
        assert_eq!(result.percent, 0.0);
        assert_eq!(result.label, "Tier A: under 200,000 mi (+0.0%)");
    }

    #[test]
    fn brackets_are_selected_by_first_threshold_exceeding_mileage() {
        let tier = ReliabilityTier::TierB;
        assert_eq!(penalty(Some(149_999), tier).bracket, Some(0));
        assert_eq!(penalty(Some(150_000), tier).bracket, Some(1));
        assert_eq!(penalty(Some(160_000), tier).percent, -0.115);
        assert_eq!(penalty(Some(180_000), tier).percent, -0.05);
        assert_eq!(penalty(Some(209_999), tier).percent, -0.05);
        assert_eq!(penalty(Some(210_000), tier).percent, -0.10);
        assert_eq!(penalty(Some(250_000), tier).percent, -0.15);
        assert_eq!(penalty(Some(900_000), tier).bracket, Some(4));
    }

    #[test]
    fn step_one_remains_steeper_than_step_two() {
        let tier = ReliabilityTier::TierC;
        let step_one = penalty(Some(110_000), tier);
        let step_two = penalty(Some(140_000), tier);
        assert!(step_one.percent < step_two.percent);
    }

    #[test]
    fn labels_describe_the_bracket_range() {
        assert_eq!(
            penalty(Some(160_000), ReliabilityTier::TierB).label,
            "Tier B: 150,000-179,999 mi (-11.5%)"
        );
        assert_eq!(
            penalty(Some(1_000_000), ReliabilityTier::TierC).label,
            "Tier C: 200,000+ mi (-15.0%)"
        );
    }
}
