use serde::{Deserialize, Serialize};

/// One day cell of the contribution graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Calendar day as `YYYYMMDD`.
    pub date: String,
    pub count: u32,
    #[serde(alias = "hexColor", alias = "color")]
    pub color_hex: String,
}

/// Snapshot of a user's contribution graph. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContributionInfo {
    #[serde(alias = "count")]
    pub total_count: u64,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
}

impl ContributionInfo {
    pub fn new(total_count: u64, contributions: Vec<Contribution>) -> Self {
        Self {
            total_count,
            contributions,
        }
    }

    /// Sum of the per-day counts, which can differ from the headline total
    /// when the graph only covers part of the period.
    pub fn day_total(&self) -> u64 {
        self.contributions.iter().map(|c| u64::from(c.count)).sum()
    }
}
