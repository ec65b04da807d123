use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use evsite_shared::tooltip::TooltipContent;
use evsite_shared::{HoverAction, InteractionRouter, PointerEvent};

/// Tooltip overlay state. The element stays mounted; `visible` toggles a class.
#[derive(Clone, Copy)]
pub(crate) struct TooltipState {
    pub content: RwSignal<TooltipContent>,
    pub visible: RwSignal<bool>,
}

impl TooltipState {
    pub fn new() -> Self {
        Self {
            content: RwSignal::new(TooltipContent {
                left: 0.0,
                top: 0.0,
                html: String::new(),
            }),
            visible: RwSignal::new(false),
        }
    }
}

/// Markup of the info panel for the current selection.
#[derive(Clone, Copy)]
pub(crate) struct SelectionHtml(pub RwSignal<Option<String>>);

thread_local! {
    // Replacing the pending timer drops it, which clears the browser timeout.
    static HIDE_TIMER: RefCell<Option<Timeout>> = const { RefCell::new(None) };
}

fn cancel_hide_timer() {
    HIDE_TIMER.with(|slot| drop(slot.borrow_mut().take()));
}

pub(crate) fn handle_click(
    router: StoredValue<InteractionRouter>,
    selection: SelectionHtml,
    event: PointerEvent,
) {
    if let Some(html) = router.try_update_value(|r| r.click(event)).flatten() {
        selection.0.set(Some(html));
    }
}

pub(crate) fn handle_hover(
    router: StoredValue<InteractionRouter>,
    tooltip: TooltipState,
    event: PointerEvent,
) {
    let Some(action) = router.try_update_value(|r| r.hover(&event, js_sys::Date::now())) else {
        return;
    };
    match action {
        HoverAction::Show(content) => {
            cancel_hide_timer();
            tooltip.content.set(content);
            tooltip.visible.set(true);
        }
        HoverAction::ScheduleHide {
            after_ms,
            deadline_ms,
        } => {
            let timer = Timeout::new(after_ms, move || {
                let due = router
                    .try_update_value(|r| r.hide_due(deadline_ms))
                    .unwrap_or(false);
                if due {
                    tooltip.visible.set(false);
                }
            });
            HIDE_TIMER.with(|slot| {
                *slot.borrow_mut() = Some(timer);
            });
        }
    }
}

/// Hide the tooltip immediately, dropping any pending debounce.
pub(crate) fn hide_tooltip(router: StoredValue<InteractionRouter>, tooltip: TooltipState) {
    cancel_hide_timer();
    router.update_value(|r| r.cancel_hide());
    tooltip.visible.set(false);
}
