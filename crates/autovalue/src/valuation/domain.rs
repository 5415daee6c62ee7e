use serde::{Deserialize, Serialize};

/// Vehicle attributes supplied alongside a base market price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleFacts {
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub trim: Option<String>,
    #[serde(default)]
    pub mileage: Option<u32>,
    /// Free-text feature tags, matched case-insensitively.
    #[serde(default)]
    pub features: Vec<String>,
}

impl VehicleFacts {
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_trim(mut self, trim: impl Into<String>) -> Self {
        self.trim = Some(trim.into());
        self
    }

    pub fn with_mileage(mut self, mileage: u32) -> Self {
        self.mileage = Some(mileage);
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }
}

/// Trim level classification. Ordering follows price position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimTier {
    Base,
    Mid,
    High,
}

impl TrimTier {
    pub const fn label(self) -> &'static str {
        match self {
            TrimTier::Base => "base",
            TrimTier::Mid => "mid",
            TrimTier::High => "high",
        }
    }
}

/// Make-level durability class used to pick a mileage curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityTier {
    TierA,
    #[default]
    TierB,
    TierC,
}

impl ReliabilityTier {
    pub const fn label(self) -> &'static str {
        match self {
            ReliabilityTier::TierA => "Tier A",
            ReliabilityTier::TierB => "Tier B",
            ReliabilityTier::TierC => "Tier C",
        }
    }
}

/// Named percentage contribution kept for audit trails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentFactor {
    pub category: String,
    pub percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_keyword: Option<String>,
}

impl AdjustmentFactor {
    pub fn new(category: impl Into<String>, percent: f64, matched_keyword: Option<String>) -> Self {
        Self {
            category: category.into(),
            percent,
            matched_keyword,
        }
    }

    pub fn multiplier(&self) -> f64 {
        1.0 + self.percent
    }
}

/// Full trail from base price to adjusted price for a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationBreakdown {
    pub base_price: f64,
    pub trim_tier: TrimTier,
    /// Tier percent plus any flat sport modifier.
    pub trim_factor: AdjustmentFactor,
    pub reliability_tier: ReliabilityTier,
    pub mileage_factor: AdjustmentFactor,
    pub mileage_label: String,
    pub feature_factors: Vec<AdjustmentFactor>,
    pub feature_bonus: f64,
    pub feature_bonus_capped: bool,
    pub adjusted_price: f64,
}

impl ValuationBreakdown {
    pub fn total_adjustment(&self) -> f64 {
        self.adjusted_price - self.base_price
    }

    pub fn summary(&self) -> String {
        let direction = if self.adjusted_price >= self.base_price {
            "up"
        } else {
            "down"
        };
        format!(
            "${:.2} adjusted {} to ${:.2} ({} trim {:+.1}%, {} mileage {:+.1}%, features {:+.1}%{})",
            self.base_price,
            direction,
            self.adjusted_price,
            self.trim_tier.label(),
            self.trim_factor.percent * 100.0,
            self.reliability_tier.label(),
            self.mileage_factor.percent * 100.0,
            self.feature_bonus * 100.0,
            if self.feature_bonus_capped {
                ", capped"
            } else {
                ""
            }
        )
    }
}

/// Four fixed selling strategies derived from the adjusted price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    QuickSale,
    MarketPrice,
    Premium,
    Optimal,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::QuickSale,
        StrategyKind::MarketPrice,
        StrategyKind::Premium,
        StrategyKind::Optimal,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            StrategyKind::QuickSale => "quick_sale",
            StrategyKind::MarketPrice => "market_price",
            StrategyKind::Premium => "premium",
            StrategyKind::Optimal => "optimal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingStrategyTier {
    pub name: StrategyKind,
    pub price: f64,
    pub estimated_days_to_sell: u16,
    pub profit_potential: f64,
}
