use super::domain::AdjustmentFactor;
use serde::{Deserialize, Serialize};

/// Upper bound on the combined feature bonus.
pub const FEATURE_BONUS_CAP: f64 = 0.12;

struct FeatureCategory {
    name: &'static str,
    percent: f64,
    keywords: &'static [&'static str],
}

// Order is significant: it fixes the order of the breakdown.
const FEATURE_CATEGORIES: [FeatureCategory; 6] = [
    FeatureCategory {
        name: "driver_assist",
        percent: 0.02,
        keywords: &[
            "backup camera",
            "rear camera",
            "rearview camera",
            "blind spot",
            "adaptive cruise",
            "lane keep",
            "lane departure",
            "parking sensor",
            "360 camera",
            "collision",
        ],
    },
    FeatureCategory {
        name: "luxury_interior",
        percent: 0.03,
        keywords: &[
            "leather",
            "heated seat",
            "ventilated seat",
            "cooled seat",
            "heated steering",
            "memory seat",
            "massage",
        ],
    },
    FeatureCategory {
        name: "roof",
        percent: 0.03,
        keywords: &["sunroof", "moonroof", "panoramic"],
    },
    FeatureCategory {
        name: "infotainment",
        percent: 0.02,
        keywords: &[
            "navigation",
            "carplay",
            "android auto",
            "premium audio",
            "bose",
            "harman",
            "touchscreen",
            "head-up display",
        ],
    },
    FeatureCategory {
        name: "performance",
        percent: 0.04,
        keywords: &[
            "turbo",
            "supercharged",
            "v8",
            "sport exhaust",
            "sport suspension",
            "performance package",
        ],
    },
    FeatureCategory {
        name: "utility",
        percent: 0.02,
        keywords: &[
            "tow",
            "third row",
            "3rd row",
            "4x4",
            "4wd",
            "awd",
            "all-wheel",
            "roof rack",
            "bed liner",
        ],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureBonus {
    pub total_percent: f64,
    pub breakdown: Vec<AdjustmentFactor>,
    pub capped: bool,
}

impl FeatureBonus {
    fn empty() -> Self {
        Self {
            total_percent: 0.0,
            breakdown: Vec::new(),
            capped: false,
        }
    }

    /// Sum of awarded category percents before the cap.
    pub fn uncapped_percent(&self) -> f64 {
        self.breakdown.iter().map(|factor| factor.percent).sum()
    }
}

/// Award each feature category at most once and clamp the total to [`FEATURE_BONUS_CAP`].
pub fn aggregate<S: AsRef<str>>(features: &[S]) -> FeatureBonus {
    let tags = features
        .iter()
        .map(|tag| tag.as_ref().trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>();
    if tags.is_empty() {
        return FeatureBonus::empty();
    }

    let breakdown = FEATURE_CATEGORIES
        .iter()
        .filter_map(|category| {
            category
                .keywords
                .iter()
                .find(|keyword| tags.iter().any(|tag| tag.contains(*keyword)))
                .map(|keyword| {
                    AdjustmentFactor::new(
                        category.name,
                        category.percent,
                        Some((*keyword).to_string()),
                    )
                })
        })
        .collect::<Vec<_>>();

    let sum: f64 = breakdown.iter().map(|factor| factor.percent).sum();
    let capped = sum > FEATURE_BONUS_CAP;
    let total_percent = if capped { FEATURE_BONUS_CAP } else { sum };

    FeatureBonus {
        total_percent,
        breakdown,
        capped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_features_award_nothing() {
        let none: [&str; 0] = [];
        assert_eq!(aggregate(&none), FeatureBonus::empty());
        assert_eq!(aggregate(&["", "   "]), FeatureBonus::empty());
    }

    #[test]
    fn category_is_awarded_once_with_first_keyword_recorded() {
        let result = aggregate(&["Rear Camera", "Blind Spot Monitor", "Backup Camera"]);
        assert_eq!(result.breakdown.len(), 1);
        let factor = &result.breakdown[0];
        assert_eq!(factor.category, "driver_assist");
        assert_eq!(factor.matched_keyword.as_deref(), Some("backup camera"));
        assert!((result.total_percent - 0.02).abs() < 1e-12);
        assert!(!result.capped);
    }

    #[test]
    fn breakdown_follows_category_order() {
        let result = aggregate(&["Tow Package", "Sunroof", "Leather Seats"]);
        let categories = result
            .breakdown
            .iter()
            .map(|factor| factor.category.as_str())
            .collect::<Vec<_>>();
        assert_eq!(categories, vec!["luxury_interior", "roof", "utility"]);
        assert!((result.total_percent - 0.08).abs() < 1e-12);
    }

    #[test]
    fn total_is_clamped_when_every_category_matches() {
        let result = aggregate(&[
            "backup camera",
            "leather seats",
            "panoramic sunroof",
            "navigation",
            "turbo",
            "third row seating",
        ]);
        assert_eq!(result.breakdown.len(), 6);
        assert_eq!(result.total_percent, FEATURE_BONUS_CAP);
        assert!(result.capped);
        assert!(result.uncapped_percent() > FEATURE_BONUS_CAP);
    }
}
