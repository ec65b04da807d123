use crate::feature::{PRIORITY_SCORE, Properties, display_value};
use crate::panel::{NOT_AVAILABLE, escape_html};

/// Overlay placement and content for a hovered feature.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub left: f64,
    pub top: f64,
    pub html: String,
}

/// Tooltip for `props` with the pointer at screen `(x, y)`, shifted by
/// `offset` pixels on both axes so it clears the cursor.
pub fn render_tooltip(props: &Properties, x: f64, y: f64, offset: f64) -> TooltipContent {
    let tier = props
        .tier_name()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let score = props
        .present(PRIORITY_SCORE)
        .map(display_value)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    TooltipContent {
        left: x + offset,
        top: y + offset,
        html: format!(
            r#"<strong>{}</strong><br>Score: {}"#,
            escape_html(&tier),
            escape_html(&score),
        ),
    }
}

/// Deadline-based debounce for hiding the tooltip. Each request pushes the
/// deadline out; only a check at or after the latest deadline hides, and it
/// hides once.
#[derive(Debug, Clone, Default)]
pub struct HideDebounce {
    deadline_ms: Option<f64>,
}

impl HideDebounce {
    pub fn request(&mut self, now_ms: f64, delay_ms: f64) -> f64 {
        let deadline = now_ms + delay_ms;
        self.deadline_ms = Some(deadline);
        deadline
    }

    /// Drop any pending hide (the pointer found a feature again).
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// True exactly once, at the first check on or after the current deadline.
    pub fn fire(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
