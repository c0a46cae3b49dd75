//! Achievement tier classification.
//!
//! A tier is picked from `(contributions, bugs)` by walking an ordered rule
//! table; the first rule whose predicate holds wins.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Achievement tier, lowest to highest. `Ord` follows rank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Learning,
    Contributor,
    C3po,
    Maintainer,
    PrManager,
    FleetMaster,
    DeveloperPro,
    RealDeal,
}

impl Tier {
    pub const ALL: [Tier; 8] = [
        Tier::Learning,
        Tier::Contributor,
        Tier::C3po,
        Tier::Maintainer,
        Tier::PrManager,
        Tier::FleetMaster,
        Tier::DeveloperPro,
        Tier::RealDeal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tier::Learning => "learning",
            Tier::Contributor => "contributor",
            Tier::C3po => "c3po",
            Tier::Maintainer => "maintainer",
            Tier::PrManager => "pr-manager",
            Tier::FleetMaster => "fleet-master",
            Tier::DeveloperPro => "developer-pro",
            Tier::RealDeal => "real-deal",
        }
    }

    /// 0 for `Learning` up to 7 for `RealDeal`.
    #[cfg(test)]
    fn rank(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Rules ──

type Predicate = fn(u64, u64) -> bool;

/// `(predicate(contributions, bugs), tier)`, highest priority first.
const RULES: &[(Predicate, Tier)] = &[
    (|c, _| c >= 1000, Tier::RealDeal),
    (|c, b| c >= 750 || b >= 200, Tier::DeveloperPro),
    (|c, b| c >= 500 || b >= 130, Tier::FleetMaster),
    (|c, b| c >= 400 || b >= 100, Tier::PrManager),
    (|c, b| c >= 250 || b >= 50, Tier::Maintainer),
    (|c, b| c >= 200 || b >= 20, Tier::C3po),
    (|c, b| b != 0 || c >= 100, Tier::Contributor),
];

/// Classify a user from their contribution and bug-fix counts.
pub fn classify(contributions: u64, bugs: u64) -> Tier {
    RULES
        .iter()
        .find(|(pred, _)| pred(contributions, bugs))
        .map_or(Tier::Learning, |(_, tier)| *tier)
}

/// Signed entry point; negative counts are treated as zero.
pub fn classify_signed(contributions: i64, bugs: i64) -> Tier {
    classify(contributions.max(0) as u64, bugs.max(0) as u64)
}
