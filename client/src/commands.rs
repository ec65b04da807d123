use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use evsite_shared::session::run_viewport_command;
use evsite_shared::{InteractionRouter, ViewerConfig, ViewportCommand};

use crate::hosted;

/// What a viewport command needs to resolve its target.
#[derive(Clone, Copy)]
pub(crate) struct CommandContext {
    pub config: StoredValue<ViewerConfig>,
    pub router: StoredValue<InteractionRouter>,
}

/// Fire-and-forget: failures are logged and otherwise ignored.
pub(crate) fn run(ctx: CommandContext, command: ViewportCommand) {
    let config = ctx.config.get_value();
    let selected = ctx.router.with_value(|r| r.selected().cloned());
    let session = hosted::current_session();

    spawn_local(async move {
        match run_viewport_command(session.as_deref(), command, &config, selected.as_ref()).await {
            Ok(true) => {}
            Ok(false) => {
                web_sys::console::info_1(
                    &format!("{}: no selected site with a location", command.label()).into(),
                );
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("{} failed: {e}", command.label()).into());
            }
        }
    });
}

/// Buttons for the fixed viewport shortcuts.
#[component]
pub(crate) fn ViewControls() -> impl IntoView {
    let ctx: CommandContext = expect_context();

    let button = move |command: ViewportCommand, shortcut: &'static str| {
        view! {
            <button
                class="view-button"
                title=format!("{} ({shortcut})", command.label())
                on:click=move |_| run(ctx, command)
            >
                {command.label()}
            </button>
        }
    };

    view! {
        <section class="panel view-controls">
            <h2>"View"</h2>
            <div class="view-buttons">
                {button(ViewportCommand::ResetView, "r")}
                {button(ViewportCommand::ZoomToHighPriority, "h")}
            </div>
        </section>
    }
}
