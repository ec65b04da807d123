use std::cell::RefCell;

use gloo_storage::Storage;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use evsite_shared::session::{self, PointerHandler};
use evsite_shared::{
    FilterController, InteractionRouter, TierRegistry, ViewerConfig, ViewportCommand,
};

use crate::commands::{CommandContext, ViewControls};
use crate::hosted::{self, HostedEmbedder};
use crate::interaction::{self, SelectionHtml, TooltipState};
use crate::panels::{FilterPanel, Filters, InfoPanel, Stats, StatsPanel, Tooltip};

pub(crate) const MAP_CONTAINER_ID: &str = "map";
const CONFIG_STORAGE_KEY: &str = "evsite_config";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BootState {
    Loading,
    Ready,
    Failed,
}

struct KeydownBinding {
    window: web_sys::Window,
    _handler: wasm_bindgen::closure::Closure<dyn Fn(web_sys::KeyboardEvent)>,
}

thread_local! {
    static KEYDOWN_BINDING: RefCell<Option<KeydownBinding>> = const { RefCell::new(None) };
}

/// Config overrides from local storage, applied field by field over the
/// built-in defaults.
fn load_config() -> ViewerConfig {
    let overrides: serde_json::Value =
        gloo_storage::LocalStorage::get(CONFIG_STORAGE_KEY).unwrap_or_default();
    let (config, rejected) = ViewerConfig::with_overrides(&overrides);
    for key in rejected {
        web_sys::console::warn_1(&format!("Ignoring invalid config override `{key}`").into());
    }
    config
}

/// Replace the map container's content with `markup`.
fn show_map_error(markup: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if let Some(container) = document.get_element_by_id(MAP_CONTAINER_ID) {
        container.set_inner_html(markup);
    }
}

/// Root application component. Provides shared state via context.
#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    let filters = FilterController::new(
        TierRegistry::new(&config.tier_colors),
        config.tier_counts,
    );
    let stats = RwSignal::new(filters.stats());
    let router: StoredValue<InteractionRouter> = StoredValue::new(InteractionRouter::new(&config));
    let filters: StoredValue<FilterController> = StoredValue::new(filters);
    let config: StoredValue<ViewerConfig> = StoredValue::new(config);
    let selection = SelectionHtml(RwSignal::new(None));
    let tooltip = TooltipState::new();
    let boot: RwSignal<BootState> = RwSignal::new(BootState::Loading);
    let commands = CommandContext { config, router };

    provide_context(Filters(filters));
    provide_context(Stats(stats));
    provide_context(selection);
    provide_context(tooltip);
    provide_context(commands);

    // Embed the hosted map once the container is in the DOM.
    Effect::new(move || {
        let on_click: PointerHandler =
            Box::new(move |event| interaction::handle_click(router, selection, event));
        let on_hover: PointerHandler =
            Box::new(move |event| interaction::handle_hover(router, tooltip, event));

        spawn_local(async move {
            let config = config.get_value();
            match session::start(&HostedEmbedder, MAP_CONTAINER_ID, &config, on_click, on_hover)
                .await
            {
                Ok(startup) => {
                    if let Some(err) = &startup.layer_error {
                        web_sys::console::warn_1(&format!("{err}").into());
                    } else {
                        web_sys::console::info_1(
                            &format!("Loaded {} map layers", startup.layers.len()).into(),
                        );
                        for layer in &startup.layers {
                            web_sys::console::info_1(
                                &format!("layer {}: {}", layer.id, layer.name).into(),
                            );
                        }
                    }
                    hosted::install_session(startup.session);
                    boot.set(BootState::Ready);
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("{err}").into());
                    if let Some(markup) = err.container_markup() {
                        show_map_error(markup);
                    }
                    boot.set(BootState::Failed);
                }
            }
        });
    });

    // Keyboard shortcuts for the viewport commands.
    Effect::new(move || {
        use wasm_bindgen::prelude::*;

        let Some(window) = web_sys::window() else {
            return;
        };

        KEYDOWN_BINDING.with(|slot| {
            if let Some(old) = slot.borrow_mut().take() {
                let _ = old.window.remove_event_listener_with_callback(
                    "keydown",
                    old._handler.as_ref().unchecked_ref(),
                );
            }
        });

        let handler =
            Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |e: web_sys::KeyboardEvent| {
                let target_tag = e
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                    .map(|el| el.tag_name())
                    .unwrap_or_default();

                // Don't intercept when typing in an input
                if target_tag == "INPUT" || target_tag == "TEXTAREA" {
                    return;
                }

                let key = e.key();
                if key == "Escape" {
                    interaction::hide_tooltip(router, tooltip);
                    return;
                }
                if let Some(command) = ViewportCommand::from_shortcut(&key) {
                    crate::commands::run(commands, command);
                }
            });

        if window
            .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
            .is_err()
        {
            return;
        }
        KEYDOWN_BINDING.with(|slot| {
            *slot.borrow_mut() = Some(KeydownBinding {
                window: window.clone(),
                _handler: handler,
            });
        });
    });

    view! {
        <div class="app">
            <aside class="sidebar">
                <header class="sidebar-header">
                    <h1>"EV Charging Site Candidates"</h1>
                    <p class="subtitle">"Prioritized locations for new public chargers"</p>
                </header>
                <FilterPanel />
                <StatsPanel />
                <ViewControls />
                <InfoPanel />
            </aside>
            <main class="map-wrapper">
                <div id=MAP_CONTAINER_ID class="map-container" />
                {move || {
                    if boot.get() == BootState::Loading {
                        view! { <div class="map-loading">"Loading map\u{2026}"</div> }.into_any()
                    } else {
                        ().into_any()
                    }
                }}
            </main>
            <Tooltip />
        </div>
    }
}
