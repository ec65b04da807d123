use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tier::PerTier;
use crate::viewport::{LatLng, ViewportPreset};

pub const DEFAULT_MAP_ID: &str = "evsite-candidates";
pub const HOVER_HIDE_DELAY_MS: u32 = 100;
pub const TOOLTIP_OFFSET_PX: f64 = 10.0;
pub const FEATURE_ZOOM: f64 = 15.0;

/// Hosted UI chrome toggles, forwarded verbatim to the embed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiOptions {
    pub show_zoom_controls: bool,
    pub show_legend: bool,
    pub show_search: bool,
    pub show_share: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            show_zoom_controls: true,
            show_legend: true,
            show_search: false,
            show_share: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub map_id: String,
    pub ui: UiOptions,
    pub city_center: ViewportPreset,
    /// Fixed stand-in for the bounds of the high-priority features.
    pub high_priority_area: ViewportPreset,
    pub feature_zoom: f64,
    pub tier_colors: PerTier<String>,
    /// Precomputed per-tier site counts for the stats panel. Not derived from
    /// the features the hosted service renders.
    pub tier_counts: PerTier<u64>,
    pub hover_hide_delay_ms: u32,
    pub tooltip_offset_px: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            map_id: option_env!("EVSITE_MAP_ID")
                .unwrap_or(DEFAULT_MAP_ID)
                .to_string(),
            ui: UiOptions::default(),
            city_center: ViewportPreset {
                center: LatLng {
                    latitude: 47.6062,
                    longitude: -122.3321,
                },
                zoom: 11.0,
            },
            high_priority_area: ViewportPreset {
                center: LatLng {
                    latitude: 47.6205,
                    longitude: -122.3212,
                },
                zoom: 13.0,
            },
            feature_zoom: FEATURE_ZOOM,
            tier_colors: default_tier_colors(),
            tier_counts: default_tier_counts(),
            hover_hide_delay_ms: HOVER_HIDE_DELAY_MS,
            tooltip_offset_px: TOOLTIP_OFFSET_PX,
        }
    }
}

impl ViewerConfig {
    /// Defaults with `overrides` merged in one top-level key at a time. Nested
    /// objects merge into the defaults, so `{"tier_counts":{"high":10}}` keeps
    /// the other two counts. A key whose merged value doesn't decode is left
    /// at its default and returned in the second slot.
    pub fn with_overrides(overrides: &Value) -> (Self, Vec<String>) {
        let defaults = Self::default();
        let Value::Object(entries) = overrides else {
            return (defaults, Vec::new());
        };
        let Ok(mut merged) = serde_json::to_value(&defaults) else {
            return (defaults, Vec::new());
        };

        let mut rejected = Vec::new();
        for (key, value) in entries {
            let mut candidate = merged.clone();
            let Some(slot) = candidate.get_mut(key) else {
                rejected.push(key.clone());
                continue;
            };
            merge_value(slot, value);
            if serde_json::from_value::<Self>(candidate.clone()).is_ok() {
                merged = candidate;
            } else {
                rejected.push(key.clone());
            }
        }

        (serde_json::from_value(merged).unwrap_or(defaults), rejected)
    }
}

fn merge_value(base: &mut Value, patch: &Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(key) {
                    Some(slot) => merge_value(slot, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, patch) => *base = patch.clone(),
    }
}

pub fn default_tier_colors() -> PerTier<String> {
    PerTier {
        high: "#e74c3c".to_string(),
        medium: "#f39c12".to_string(),
        low: "#3498db".to_string(),
    }
}

pub fn default_tier_counts() -> PerTier<u64> {
    PerTier {
        high: 45,
        medium: 90,
        low: 120,
    }
}
