use leptos::prelude::*;
use wasm_bindgen::JsCast;

use evsite_shared::{FilterController, SiteStats, Tier, ViewportCommand, format_count};

use crate::commands::{self, CommandContext};
use crate::interaction::{SelectionHtml, TooltipState};

#[derive(Clone, Copy)]
pub(crate) struct Filters(pub StoredValue<FilterController>);
#[derive(Clone, Copy)]
pub(crate) struct Stats(pub RwSignal<SiteStats>);

/// One checkbox per tier, with the tier's color as a legend swatch.
#[component]
pub(crate) fn FilterPanel() -> impl IntoView {
    let Filters(filters) = expect_context();
    let rows: Vec<(Tier, String, bool)> = filters.with_value(|f| {
        f.registry()
            .styles()
            .map(|(tier, style)| (tier, style.color.clone(), style.enabled))
            .collect()
    });

    view! {
        <section class="panel filters">
            <h2>"Priority Tiers"</h2>
            {rows
                .into_iter()
                .map(|(tier, color, checked)| view! { <TierToggle tier=tier color=color checked=checked /> })
                .collect_view()}
        </section>
    }
}

#[component]
fn TierToggle(tier: Tier, color: String, checked: bool) -> impl IntoView {
    let Filters(filters) = expect_context();
    let Stats(stats) = expect_context();

    let on_change = move |e: leptos::ev::Event| {
        let Some(input) = e
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let enabled = input.checked();
        let Some(outcome) = filters.try_update_value(|f| f.set_tier(tier, enabled)) else {
            return;
        };
        web_sys::console::info_1(&outcome.describe().into());
        // With no tier checked the counts are left as they were.
        if outcome.refreshes_stats() {
            stats.set(filters.with_value(FilterController::stats));
        }
    };

    view! {
        <label class="tier-toggle">
            <input
                type="checkbox"
                id=format!("filter-{}", tier.key())
                checked=checked
                on:change=on_change
            />
            <span class="tier-swatch" style=format!("background: {color};") />
            <span class="tier-label">{tier.label()}</span>
        </label>
    }
}

#[component]
pub(crate) fn StatsPanel() -> impl IntoView {
    let Stats(stats) = expect_context();

    view! {
        <section class="panel stats">
            <h2>"Statistics"</h2>
            <div class="stat">
                <span class="stat-label">"Total Sites"</span>
                <span id="stat-total" class="stat-value">{move || format_count(stats.get().total)}</span>
            </div>
            <div class="stat">
                <span class="stat-label">"High Priority"</span>
                <span id="stat-high" class="stat-value">{move || format_count(stats.get().high)}</span>
            </div>
            <div class="stat">
                <span class="stat-label">"Visible"</span>
                <span id="stat-visible" class="stat-value">{move || format_count(stats.get().visible)}</span>
            </div>
        </section>
    }
}

/// Details of the last clicked site. Buttons inside the rendered markup carry
/// a `data-command` attribute and are dispatched from here.
#[component]
pub(crate) fn InfoPanel() -> impl IntoView {
    let SelectionHtml(selection) = expect_context();
    let ctx: CommandContext = expect_context();

    let on_click = move |e: leptos::ev::MouseEvent| {
        let Some(target) = e
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        let Some(name) = target
            .closest("[data-command]")
            .ok()
            .flatten()
            .and_then(|el| el.get_attribute("data-command"))
        else {
            return;
        };
        if let Some(command) = ViewportCommand::from_name(&name) {
            commands::run(ctx, command);
        }
    };

    view! {
        <section id="info-panel" class="panel info-panel" on:click=on_click>
            {move || match selection.get() {
                Some(html) => view! { <div class="info-body" inner_html=html /> }.into_any(),
                None => view! {
                    <p class="info-empty">"Click a site on the map to see its details."</p>
                }
                .into_any(),
            }}
        </section>
    }
}

/// Hover overlay. Always mounted; shown and hidden through the `visible` class.
#[component]
pub(crate) fn Tooltip() -> impl IntoView {
    let tooltip: TooltipState = expect_context();

    view! {
        <div
            id="tooltip"
            class="tooltip"
            class:visible=move || tooltip.visible.get()
            style:left=move || format!("{}px", tooltip.content.with(|c| c.left))
            style:top=move || format!("{}px", tooltip.content.with(|c| c.top))
            inner_html=move || tooltip.content.with(|c| c.html.clone())
        />
    }
}
