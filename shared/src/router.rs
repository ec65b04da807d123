use crate::config::ViewerConfig;
use crate::feature::Feature;
use crate::panel::render_selection_panel;
use crate::session::PointerEvent;
use crate::tooltip::{HideDebounce, TooltipContent, render_tooltip};

#[derive(Debug, Clone, PartialEq)]
pub enum HoverAction {
    Show(TooltipContent),
    /// Check back after `after_ms` by passing `deadline_ms` to
    /// [`InteractionRouter::hide_due`].
    ScheduleHide { after_ms: u32, deadline_ms: f64 },
}

/// Turns pointer events from the hosted map into panel/tooltip updates and
/// keeps the single current selection.
#[derive(Debug, Clone)]
pub struct InteractionRouter {
    selected: Option<Feature>,
    hide: HideDebounce,
    hide_delay_ms: u32,
    tooltip_offset_px: f64,
}

impl InteractionRouter {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            selected: None,
            hide: HideDebounce::default(),
            hide_delay_ms: config.hover_hide_delay_ms,
            tooltip_offset_px: config.tooltip_offset_px,
        }
    }

    pub fn selected(&self) -> Option<&Feature> {
        self.selected.as_ref()
    }

    /// Select the topmost feature and return the info panel markup. Clicking
    /// empty space keeps the previous selection and returns `None`.
    pub fn click(&mut self, event: PointerEvent) -> Option<String> {
        let feature = event.features.into_iter().next()?;
        let html = render_selection_panel(&feature.properties);
        self.selected = Some(feature);
        Some(html)
    }

    pub fn hover(&mut self, event: &PointerEvent, now_ms: f64) -> HoverAction {
        match event.features.first() {
            Some(feature) => {
                self.hide.cancel();
                let point = event.screen_point.unwrap_or_default();
                HoverAction::Show(render_tooltip(
                    &feature.properties,
                    point.x,
                    point.y,
                    self.tooltip_offset_px,
                ))
            }
            None => {
                let deadline_ms = self.hide.request(now_ms, f64::from(self.hide_delay_ms));
                HoverAction::ScheduleHide {
                    after_ms: self.hide_delay_ms,
                    deadline_ms,
                }
            }
        }
    }

    /// Called when a scheduled hide timer elapses. True only for the most
    /// recent request, so a burst of empty hovers hides once.
    pub fn hide_due(&mut self, now_ms: f64) -> bool {
        self.hide.fire(now_ms)
    }

    pub fn cancel_hide(&mut self) {
        self.hide.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Properties;
    use crate::session::ScreenPoint;
    use serde_json::json;

    fn site(tier: &str) -> Feature {
        Feature {
            geometry: None,
            properties: Properties::from([("priority_tier", json!(tier))]),
        }
    }

    fn event(features: Vec<Feature>) -> PointerEvent {
        PointerEvent {
            features,
            screen_point: Some(ScreenPoint { x: 40.0, y: 60.0 }),
        }
    }

    #[test]
    fn click_takes_topmost_feature() {
        let mut router = InteractionRouter::new(&ViewerConfig::default());
        let html = router
            .click(event(vec![site("Low Priority"), site("High Priority")]))
            .unwrap();
        assert!(html.contains("Low Priority"));
        assert_eq!(
            router.selected().and_then(|f| f.properties.tier_name()).as_deref(),
            Some("Low Priority")
        );
    }

    #[test]
    fn click_on_empty_space_keeps_selection() {
        let mut router = InteractionRouter::new(&ViewerConfig::default());
        router.click(event(vec![site("High Priority")]));
        assert_eq!(router.click(event(Vec::new())), None);
        assert!(router.selected().is_some());
    }

    #[test]
    fn new_click_replaces_selection() {
        let mut router = InteractionRouter::new(&ViewerConfig::default());
        router.click(event(vec![site("High Priority")]));
        router.click(event(vec![site("Medium Priority")]));
        assert_eq!(
            router.selected().and_then(|f| f.properties.tier_name()).as_deref(),
            Some("Medium Priority")
        );
    }

    #[test]
    fn hover_with_feature_shows_offset_tooltip() {
        let mut router = InteractionRouter::new(&ViewerConfig::default());
        let HoverAction::Show(tooltip) = router.hover(&event(vec![site("High Priority")]), 0.0)
        else {
            panic!("expected tooltip");
        };
        assert_eq!((tooltip.left, tooltip.top), (50.0, 70.0));
    }

    #[test]
    fn empty_hovers_within_delay_hide_once() {
        let mut router = InteractionRouter::new(&ViewerConfig::default());
        assert_eq!(
            router.hover(&event(Vec::new()), 0.0),
            HoverAction::ScheduleHide {
                after_ms: 100,
                deadline_ms: 100.0
            }
        );
        router.hover(&event(Vec::new()), 40.0);

        let hides = [100.0, 140.0]
            .into_iter()
            .filter(|now| router.hide_due(*now))
            .count();
        assert_eq!(hides, 1);
    }

    #[test]
    fn hovering_a_feature_cancels_pending_hide() {
        let mut router = InteractionRouter::new(&ViewerConfig::default());
        router.hover(&event(Vec::new()), 0.0);
        router.hover(&event(vec![site("Low Priority")]), 50.0);
        assert!(!router.hide_due(100.0));
    }
}
