use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use evsite_shared::session::PointerHandler;
use evsite_shared::{
    Layer, MapEmbedder, MapSession, PointerEvent, SessionError, UiOptions, ViewportRequest,
};

#[wasm_bindgen(inline_js = r#"
export async function embedMap(containerId, mapId, uiControls) {
  const container = document.getElementById(containerId);
  if (!container) {
    throw new Error(`map container #${containerId} not found`);
  }
  if (!window.Felt) {
    throw new Error('hosted map SDK is not loaded');
  }
  return window.Felt.embed(container, mapId, { uiControls });
}

export async function getLayers(map) {
  return map.getLayers();
}

export async function setViewport(map, viewport) {
  return map.setViewport(viewport);
}

export function onPointerClick(map, handler) {
  return map.onPointerClick({ handler });
}

export function onPointerMove(map, handler) {
  return map.onPointerMove({ handler });
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = embedMap)]
    fn embed_map(container_id: &str, map_id: &str, ui_controls: JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_name = getLayers)]
    fn get_layers(map: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_name = setViewport)]
    fn set_viewport(map: &JsValue, viewport: JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_name = onPointerClick, catch)]
    fn on_pointer_click(map: &JsValue, handler: &js_sys::Function) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = onPointerMove, catch)]
    fn on_pointer_move(map: &JsValue, handler: &js_sys::Function) -> Result<JsValue, JsValue>;
}

fn js_error_message(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{err:?}")
}

/// Entry point into the hosted map SDK loaded by `index.html`.
pub struct HostedEmbedder;

impl MapEmbedder for HostedEmbedder {
    type Session = HostedSession;

    async fn embed(
        &self,
        container_id: &str,
        map_id: &str,
        ui: UiOptions,
    ) -> Result<HostedSession, SessionError> {
        let ui_controls = serde_wasm_bindgen::to_value(&ui)
            .map_err(|e| SessionError::Initialization(format!("ui options: {e}")))?;
        let map = JsFuture::from(embed_map(container_id, map_id, ui_controls))
            .await
            .map_err(|e| SessionError::Initialization(js_error_message(&e)))?;
        if map.is_null() || map.is_undefined() {
            return Err(SessionError::Initialization(
                "embed returned no map".to_string(),
            ));
        }
        Ok(HostedSession {
            map,
            handlers: RefCell::new(Vec::new()),
        })
    }
}

/// Live embedded map. Owns the JS closures it handed to the SDK so they stay
/// valid for as long as the session does.
pub struct HostedSession {
    map: JsValue,
    handlers: RefCell<Vec<Closure<dyn Fn(JsValue)>>>,
}

impl HostedSession {
    fn subscribe(
        &self,
        handler: PointerHandler,
        register: fn(&JsValue, &js_sys::Function) -> Result<JsValue, JsValue>,
        kind: &str,
    ) {
        let closure = Closure::<dyn Fn(JsValue)>::new(move |raw: JsValue| {
            // Payloads that don't decode are treated as "no features".
            let event = serde_wasm_bindgen::from_value::<PointerEvent>(raw).unwrap_or_default();
            handler(event);
        });
        if let Err(err) = register(&self.map, closure.as_ref().unchecked_ref()) {
            web_sys::console::warn_1(
                &format!("Failed to subscribe to {kind} events: {}", js_error_message(&err)).into(),
            );
            return;
        }
        self.handlers.borrow_mut().push(closure);
    }
}

impl MapSession for HostedSession {
    async fn list_layers(&self) -> Result<Vec<Layer>, SessionError> {
        let raw = JsFuture::from(get_layers(&self.map))
            .await
            .map_err(|e| SessionError::Layers(js_error_message(&e)))?;
        serde_wasm_bindgen::from_value::<Vec<Option<Layer>>>(raw)
            .map(|layers| layers.into_iter().flatten().collect())
            .map_err(|e| SessionError::Layers(format!("parse error: {e}")))
    }

    fn on_click(&self, handler: PointerHandler) {
        self.subscribe(handler, on_pointer_click, "click");
    }

    fn on_hover(&self, handler: PointerHandler) {
        self.subscribe(handler, on_pointer_move, "pointer move");
    }

    async fn set_viewport(&self, request: ViewportRequest) -> Result<(), SessionError> {
        let viewport = serde_wasm_bindgen::to_value(&request)
            .map_err(|e| SessionError::Viewport(e.to_string()))?;
        JsFuture::from(set_viewport(&self.map, viewport))
            .await
            .map(|_| ())
            .map_err(|e| SessionError::Viewport(js_error_message(&e)))
    }
}

thread_local! {
    static SESSION: RefCell<Option<Rc<HostedSession>>> = const { RefCell::new(None) };
}

/// Make `session` the one viewport commands talk to.
pub fn install_session(session: HostedSession) {
    SESSION.with(|slot| {
        *slot.borrow_mut() = Some(Rc::new(session));
    });
}

/// `None` until the embed handshake has completed.
pub fn current_session() -> Option<Rc<HostedSession>> {
    SESSION.with(|slot| slot.borrow().clone())
}
