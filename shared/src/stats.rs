use crate::tier::{PerTier, Tier, TierRegistry};

/// Values shown in the stats slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SiteStats {
    pub total: u64,
    pub high: u64,
    pub visible: u64,
}

impl SiteStats {
    /// Totals over the static count table. `visible` sums enabled tiers only;
    /// the rendered map is not consulted.
    pub fn compute(counts: &PerTier<u64>, registry: &TierRegistry) -> Self {
        // Counts can come from user-edited storage; clamp instead of overflowing.
        let total = counts
            .iter()
            .map(|(_, count)| *count)
            .fold(0, u64::saturating_add);
        let visible = counts
            .iter()
            .filter(|(tier, _)| registry.is_enabled(*tier))
            .map(|(_, count)| *count)
            .fold(0, u64::saturating_add);
        Self {
            total,
            high: *counts.get(Tier::High),
            visible,
        }
    }
}

/// Integer with comma thousands separators (en-US grouping).
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
