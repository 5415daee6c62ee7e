use super::domain::{PricingStrategyTier, StrategyKind};

pub const DEFAULT_TARGET_PROFIT: f64 = 2000.0;

struct StrategyTerms {
    price_multiplier: f64,
    estimated_days_to_sell: u16,
    profit_multiplier: f64,
}

const fn terms(kind: StrategyKind) -> StrategyTerms {
    match kind {
        StrategyKind::QuickSale => StrategyTerms {
            price_multiplier: 0.90,
            estimated_days_to_sell: 7,
            profit_multiplier: 0.7,
        },
        StrategyKind::MarketPrice => StrategyTerms {
            price_multiplier: 1.00,
            estimated_days_to_sell: 14,
            profit_multiplier: 1.0,
        },
        StrategyKind::Premium => StrategyTerms {
            price_multiplier: 1.10,
            estimated_days_to_sell: 30,
            profit_multiplier: 1.3,
        },
        StrategyKind::Optimal => StrategyTerms {
            price_multiplier: 0.95,
            estimated_days_to_sell: 10,
            profit_multiplier: 0.9,
        },
    }
}

/// Price points for every strategy, in quick-sale, market, premium, optimal order.
pub fn strategies(adjusted_price: f64, target_profit: f64) -> Vec<PricingStrategyTier> {
    StrategyKind::ALL
        .iter()
        .map(|&kind| {
            let terms = terms(kind);
            PricingStrategyTier {
                name: kind,
                price: adjusted_price * terms.price_multiplier,
                estimated_days_to_sell: terms.estimated_days_to_sell,
                profit_potential: target_profit * terms.profit_multiplier,
            }
        })
        .collect()
}
