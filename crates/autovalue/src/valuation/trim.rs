use super::domain::TrimTier;
use super::normalizer::{contains_phrase, token_phrase};
use serde::{Deserialize, Serialize};

/// Flat bonus applied when the generic path sees the `sport` token.
pub const SPORT_FLAT_BONUS: f64 = 0.03;

/// Matches beyond this count do not move the percent further toward the range ceiling.
const MAX_WEIGHTED_MATCHES: usize = 3;

struct TierKeywords {
    tier: TrimTier,
    low: f64,
    high: f64,
    keywords: &'static [&'static str],
}

// Scanned highest tier first so the first table with a hit wins.
const TIER_TABLES: [TierKeywords; 3] = [
    TierKeywords {
        tier: TrimTier::High,
        low: 0.12,
        high: 0.20,
        keywords: &[
            "limited",
            "touring",
            "platinum",
            "premier",
            "signature",
            "reserve",
            "denali",
            "ltz",
            "high country",
            "king ranch",
            "lariat",
            "laramie",
            "sl",
            "prestige",
            "calligraphy",
            "grand touring",
            "titanium",
        ],
    },
    TierKeywords {
        tier: TrimTier::Mid,
        low: 0.05,
        high: 0.10,
        keywords: &[
            "sport",
            "ex",
            "ex-l",
            "xle",
            "premium",
            "lt",
            "sel",
            "slt",
            "preferred",
            "select",
            "sxt",
            "gt",
            "plus",
            "luxury",
            "xlt",
            "big horn",
            "lone star",
        ],
    },
    TierKeywords {
        tier: TrimTier::Base,
        low: 0.0,
        high: 0.02,
        keywords: &[
            "base", "l", "lx", "le", "s", "se", "ls", "dx", "ce", "sv", "gl", "gls", "standard",
            "value", "xl", "wt",
        ],
    },
];

type Rung = (&'static str, TrimTier, f64);

/// Documented trim ladder for a nameplate; exact rung percents replace the generic ranges.
struct TrimLadder {
    nameplates: &'static [&'static str],
    rungs: &'static [Rung],
}

const MODEL_LADDERS: &[TrimLadder] = &[
    TrimLadder {
        nameplates: &["malibu"],
        rungs: &[
            ("ls", TrimTier::Base, 0.0),
            ("lt", TrimTier::Mid, 0.05),
            ("rs", TrimTier::Mid, 0.06),
            ("ltz", TrimTier::High, 0.125),
            ("premier", TrimTier::High, 0.15),
        ],
    },
    TrimLadder {
        nameplates: &["camry"],
        rungs: &[
            ("l", TrimTier::Base, 0.0),
            ("le", TrimTier::Base, 0.0),
            ("se", TrimTier::Mid, 0.04),
            ("xle", TrimTier::Mid, 0.09),
            ("xse", TrimTier::Mid, 0.11),
            ("trd", TrimTier::High, 0.12),
        ],
    },
    TrimLadder {
        nameplates: &["accord"],
        rungs: &[
            ("lx", TrimTier::Base, 0.0),
            ("sport", TrimTier::Mid, 0.05),
            ("ex", TrimTier::Mid, 0.06),
            ("ex-l", TrimTier::Mid, 0.08),
            ("touring", TrimTier::High, 0.14),
        ],
    },
    TrimLadder {
        nameplates: &["f-150", "f150"],
        rungs: &[
            ("xl", TrimTier::Base, 0.0),
            ("xlt", TrimTier::Mid, 0.06),
            ("lariat", TrimTier::High, 0.12),
            ("king ranch", TrimTier::High, 0.18),
            ("platinum", TrimTier::High, 0.20),
            ("limited", TrimTier::High, 0.24),
            ("raptor", TrimTier::High, 0.25),
        ],
    },
    TrimLadder {
        nameplates: &["silverado"],
        rungs: &[
            ("wt", TrimTier::Base, 0.0),
            ("custom", TrimTier::Base, 0.03),
            ("lt", TrimTier::Mid, 0.06),
            ("rst", TrimTier::Mid, 0.08),
            ("ltz", TrimTier::High, 0.14),
            ("high country", TrimTier::High, 0.20),
        ],
    },
];

/// Which path produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimSource {
    Unmatched,
    Generic,
    ModelOverride,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimClassification {
    pub tier: TrimTier,
    pub percent: f64,
    pub sport_bonus: f64,
    pub matched_keywords: Vec<String>,
    pub source: TrimSource,
}

impl TrimClassification {
    fn unmatched() -> Self {
        Self {
            tier: TrimTier::Base,
            percent: 0.0,
            sport_bonus: 0.0,
            matched_keywords: Vec::new(),
            source: TrimSource::Unmatched,
        }
    }

    /// Tier percent and flat modifier, summed before they are applied as one factor.
    pub fn total_percent(&self) -> f64 {
        self.percent + self.sport_bonus
    }
}

/// Classify a free-text trim, preferring a model's documented ladder when one applies.
pub fn classify(trim: Option<&str>, model: Option<&str>) -> TrimClassification {
    let padded = match trim {
        Some(raw) => token_phrase(raw),
        None => return TrimClassification::unmatched(),
    };
    if padded.is_empty() {
        return TrimClassification::unmatched();
    }

    if let Some(classification) = model.and_then(|model| ladder_rung(model, &padded)) {
        return classification;
    }

    for table in &TIER_TABLES {
        let matched = matched_keywords(table.keywords, &padded);
        if matched.is_empty() {
            continue;
        }

        let weighted = matched.len().min(MAX_WEIGHTED_MATCHES) - 1;
        let span = (MAX_WEIGHTED_MATCHES - 1) as f64;
        let percent = table.low + (table.high - table.low) * (weighted as f64 / span);
        let sport_bonus = if contains_phrase(&padded, "sport") {
            SPORT_FLAT_BONUS
        } else {
            0.0
        };

        return TrimClassification {
            tier: table.tier,
            percent,
            sport_bonus,
            matched_keywords: matched.into_iter().map(str::to_string).collect(),
            source: TrimSource::Generic,
        };
    }

    TrimClassification::unmatched()
}

fn ladder_rung(model: &str, padded_trim: &str) -> Option<TrimClassification> {
    let padded_model = token_phrase(model);
    let ladder = MODEL_LADDERS.iter().find(|ladder| {
        ladder
            .nameplates
            .iter()
            .any(|nameplate| contains_phrase(&padded_model, nameplate))
    })?;

    let mut best: Option<&Rung> = None;
    for rung in ladder.rungs {
        if !contains_phrase(padded_trim, rung.0) {
            continue;
        }
        if best.map_or(true, |current| rung.0.len() > current.0.len()) {
            best = Some(rung);
        }
    }

    best.map(|&(name, tier, percent)| TrimClassification {
        tier,
        percent,
        sport_bonus: 0.0,
        matched_keywords: vec![name.to_string()],
        source: TrimSource::ModelOverride,
    })
}

/// Keywords present in the trim, minus any that only appear as part of a longer matched phrase.
fn matched_keywords(keywords: &'static [&'static str], padded: &str) -> Vec<&'static str> {
    let hits = keywords
        .iter()
        .copied()
        .filter(|keyword| contains_phrase(padded, keyword))
        .collect::<Vec<_>>();

    hits.iter()
        .copied()
        .filter(|keyword| {
            !hits.iter().any(|other| {
                other.len() > keyword.len() && contains_phrase(&token_phrase(other), keyword)
            })
        })
        .collect()
}
