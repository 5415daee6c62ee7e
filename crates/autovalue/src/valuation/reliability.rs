use super::domain::ReliabilityTier;
use super::normalizer::normalize_key;
use std::collections::HashMap;
use std::sync::OnceLock;

static MAKE_TIER_MAP: OnceLock<HashMap<&'static str, ReliabilityTier>> = OnceLock::new();

/// Resolve a make to its depreciation class. Unknown or empty makes fall back to Tier B.
pub fn resolve(make: Option<&str>) -> ReliabilityTier {
    make.and_then(lookup).unwrap_or_default()
}

/// Listed tier for a make, or `None` when the make is not in the table.
pub fn lookup(make: &str) -> Option<ReliabilityTier> {
    make_tier_map().get(normalize_key(make).as_str()).copied()
}

fn make_tier_map() -> &'static HashMap<&'static str, ReliabilityTier> {
    MAKE_TIER_MAP.get_or_init(|| {
        const MAKE_TO_TIER: &[(&[&str], ReliabilityTier)] = &[
            // Mass-market brands with historically low depreciation
            (
                &["toyota", "honda", "lexus", "acura", "mazda", "subaru"],
                ReliabilityTier::TierA,
            ),
            // Mainstream domestic and import brands
            (
                &[
                    "chevrolet",
                    "chevy",
                    "ford",
                    "gmc",
                    "ram",
                    "dodge",
                    "jeep",
                    "chrysler",
                    "buick",
                    "nissan",
                    "hyundai",
                    "kia",
                    "volkswagen",
                    "vw",
                    "mitsubishi",
                ],
                ReliabilityTier::TierB,
            ),
            // Luxury and European brands
            (
                &[
                    "bmw",
                    "mercedes-benz",
                    "mercedes",
                    "audi",
                    "porsche",
                    "jaguar",
                    "land rover",
                    "volvo",
                    "cadillac",
                    "lincoln",
                    "infiniti",
                    "genesis",
                    "alfa romeo",
                    "maserati",
                    "mini",
                ],
                ReliabilityTier::TierC,
            ),
        ];

        let mut map = HashMap::new();
        for (makes, tier) in MAKE_TO_TIER {
            for make in *makes {
                map.insert(*make, *tier);
            }
        }
        map
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_makes_case_insensitively() {
        assert_eq!(resolve(Some("Toyota")), ReliabilityTier::TierA);
        assert_eq!(resolve(Some("  CHEVROLET ")), ReliabilityTier::TierB);
        assert_eq!(resolve(Some("Land  Rover")), ReliabilityTier::TierC);
        assert_eq!(resolve(Some("Mercedes-Benz")), ReliabilityTier::TierC);
    }

    #[test]
    fn unknown_or_missing_make_defaults_to_tier_b() {
        assert_eq!(resolve(None), ReliabilityTier::TierB);
        assert_eq!(resolve(Some("")), ReliabilityTier::TierB);
        assert_eq!(resolve(Some("Zyntho")), ReliabilityTier::TierB);
        assert_eq!(lookup("Zyntho"), None);
        assert_eq!(lookup(""), None);
        assert_eq!(lookup("subaru"), Some(ReliabilityTier::TierA));
    }
}
