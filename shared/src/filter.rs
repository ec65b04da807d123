use serde_json::{Value, json};

use crate::feature::PRIORITY_TIER;
use crate::stats::SiteStats;
use crate::tier::{PerTier, Tier, TierRegistry};

/// Tier-membership predicate in the hosted service's style-expression form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierFilter {
    pub tiers: Vec<Tier>,
}

impl TierFilter {
    pub fn to_expression(&self) -> Value {
        let labels: Vec<&str> = self.tiers.iter().map(|tier| tier.label()).collect();
        json!(["in", ["get", PRIORITY_TIER], ["literal", labels]])
    }
}

/// What a checkbox change resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Every tier unchecked. The map and the stats are left as they were.
    NoTiers,
    /// Every tier checked; equivalent to no filter.
    AllTiers,
    /// A strict subset. The expression is built but the embed API can't apply
    /// client-side filters, so it is only reported.
    Subset(TierFilter),
}

impl FilterOutcome {
    pub fn refreshes_stats(&self) -> bool {
        !matches!(self, FilterOutcome::NoTiers)
    }

    pub fn describe(&self) -> String {
        match self {
            FilterOutcome::NoTiers => "No tiers selected".to_string(),
            FilterOutcome::AllTiers => "All tiers enabled, showing every site".to_string(),
            FilterOutcome::Subset(filter) => {
                format!("Tier filter (not applied by embed API): {}", filter.to_expression())
            }
        }
    }
}

/// Owns the tier registry and the static count table; mutated one checkbox at
/// a time.
#[derive(Debug, Clone)]
pub struct FilterController {
    registry: TierRegistry,
    counts: PerTier<u64>,
}

impl FilterController {
    pub fn new(registry: TierRegistry, counts: PerTier<u64>) -> Self {
        Self { registry, counts }
    }

    pub fn registry(&self) -> &TierRegistry {
        &self.registry
    }

    pub fn set_tier(&mut self, tier: Tier, enabled: bool) -> FilterOutcome {
        self.registry.set_enabled(tier, enabled);
        self.outcome()
    }

    pub fn outcome(&self) -> FilterOutcome {
        let enabled = self.registry.enabled_tiers();
        if enabled.is_empty() {
            FilterOutcome::NoTiers
        } else if enabled.len() == Tier::ALL.len() {
            FilterOutcome::AllTiers
        } else {
            FilterOutcome::Subset(TierFilter { tiers: enabled })
        }
    }

    pub fn stats(&self) -> SiteStats {
        SiteStats::compute(&self.counts, &self.registry)
    }
}
