use serde::{Deserialize, Serialize};

/// Priority bucket assigned upstream to each candidate site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "High Priority")]
    High,
    #[serde(rename = "Medium Priority")]
    Medium,
    #[serde(rename = "Low Priority")]
    Low,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::High, Tier::Medium, Tier::Low];

    /// Tier name as it appears in the `priority_tier` feature property.
    pub fn label(self) -> &'static str {
        match self {
            Tier::High => "High Priority",
            Tier::Medium => "Medium Priority",
            Tier::Low => "Low Priority",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Tier::High => "high",
            Tier::Medium => "medium",
            Tier::Low => "low",
        }
    }

    /// Stable DOM id suffix for the filter checkbox of this tier.
    pub fn key(self) -> &'static str {
        self.css_class()
    }

    pub fn from_label(label: &str) -> Option<Tier> {
        Tier::ALL.into_iter().find(|tier| tier.label() == label)
    }
}

/// CSS class for an arbitrary tier name; unknown names map to "".
pub fn tier_class(name: &str) -> &'static str {
    Tier::from_label(name).map(Tier::css_class).unwrap_or("")
}

/// One value per tier. Used for colors, counts and enabled flags so the three
/// tiers can't drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerTier<T> {
    pub high: T,
    pub medium: T,
    pub low: T,
}

impl<T> PerTier<T> {
    pub fn get(&self, tier: Tier) -> &T {
        match tier {
            Tier::High => &self.high,
            Tier::Medium => &self.medium,
            Tier::Low => &self.low,
        }
    }

    pub fn get_mut(&mut self, tier: Tier) -> &mut T {
        match tier {
            Tier::High => &mut self.high,
            Tier::Medium => &mut self.medium,
            Tier::Low => &mut self.low,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &T)> {
        Tier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierStyle {
    pub color: String,
    pub enabled: bool,
}

/// Display color and enabled flag for each tier. Owned by the filter
/// controller; every tier starts enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierRegistry {
    styles: PerTier<TierStyle>,
}

impl TierRegistry {
    pub fn new(colors: &PerTier<String>) -> Self {
        let style = |tier| TierStyle {
            color: colors.get(tier).clone(),
            enabled: true,
        };
        Self {
            styles: PerTier {
                high: style(Tier::High),
                medium: style(Tier::Medium),
                low: style(Tier::Low),
            },
        }
    }

    pub fn color(&self, tier: Tier) -> &str {
        &self.styles.get(tier).color
    }

    pub fn is_enabled(&self, tier: Tier) -> bool {
        self.styles.get(tier).enabled
    }

    pub fn set_enabled(&mut self, tier: Tier, enabled: bool) {
        self.styles.get_mut(tier).enabled = enabled;
    }

    /// Enabled tiers in registry order (High, Medium, Low).
    pub fn enabled_tiers(&self) -> Vec<Tier> {
        self.styles
            .iter()
            .filter(|(_, style)| style.enabled)
            .map(|(tier, _)| tier)
            .collect()
    }

    pub fn styles(&self) -> impl Iterator<Item = (Tier, &TierStyle)> {
        self.styles.iter()
    }
}

impl Default for TierRegistry {
    fn default() -> Self {
        Self::new(&crate::config::default_tier_colors())
    }
}
