use serde::{Deserialize, Serialize};

use crate::config::ViewerConfig;
use crate::feature::Feature;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportPreset {
    pub center: LatLng,
    pub zoom: f64,
}

/// Argument of the hosted service's viewport-set call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRequest {
    pub center: LatLng,
    pub zoom: f64,
    pub animate: bool,
}

impl ViewportRequest {
    pub fn animated(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            animate: true,
        }
    }
}

impl From<ViewportPreset> for ViewportRequest {
    fn from(preset: ViewportPreset) -> Self {
        Self::animated(preset.center, preset.zoom)
    }
}

/// Named viewport shortcuts exposed as buttons and keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportCommand {
    ResetView,
    ZoomToHighPriority,
    ZoomToFeature,
}

impl ViewportCommand {
    pub fn label(self) -> &'static str {
        match self {
            ViewportCommand::ResetView => "Reset View",
            ViewportCommand::ZoomToHighPriority => "High Priority Area",
            ViewportCommand::ZoomToFeature => "Zoom to Site",
        }
    }

    /// `data-command` attribute value used by rendered markup.
    pub fn name(self) -> &'static str {
        match self {
            ViewportCommand::ResetView => "reset-view",
            ViewportCommand::ZoomToHighPriority => "zoom-to-high-priority",
            ViewportCommand::ZoomToFeature => "zoom-to-feature",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            ViewportCommand::ResetView,
            ViewportCommand::ZoomToHighPriority,
            ViewportCommand::ZoomToFeature,
        ]
        .into_iter()
        .find(|command| command.name() == name)
    }

    pub fn from_shortcut(key: &str) -> Option<Self> {
        match key {
            "r" => Some(ViewportCommand::ResetView),
            "h" => Some(ViewportCommand::ZoomToHighPriority),
            "z" => Some(ViewportCommand::ZoomToFeature),
            _ => None,
        }
    }

    /// Viewport change this command asks for, or `None` when it is a no-op
    /// (zoom to feature with no selection or no point geometry).
    pub fn resolve(
        self,
        config: &ViewerConfig,
        selected: Option<&Feature>,
    ) -> Option<ViewportRequest> {
        match self {
            ViewportCommand::ResetView => Some(config.city_center.into()),
            ViewportCommand::ZoomToHighPriority => Some(config.high_priority_area.into()),
            ViewportCommand::ZoomToFeature => {
                let center = selected?.center()?;
                Some(ViewportRequest::animated(center, config.feature_zoom))
            }
        }
    }
}
