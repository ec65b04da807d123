//! Contract with the hosted mapping service, and the startup sequence that
//! runs against it.
//!
//! The client implements [`MapEmbedder`]/[`MapSession`] over the service's
//! JavaScript SDK; tests implement them with in-memory fakes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{UiOptions, ViewerConfig};
use crate::feature::{Feature, lenient_features};
use crate::panel::MAP_ERROR_HTML;
use crate::viewport::{ViewportCommand, ViewportRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Pointer event resolved against rendered features, topmost first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    #[serde(default, deserialize_with = "lenient_features")]
    pub features: Vec<Feature>,
    #[serde(default, rename = "point")]
    pub screen_point: Option<ScreenPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Embed handshake rejected. Fatal.
    Initialization(String),
    Viewport(String),
    Layers(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Initialization(msg) => write!(f, "map initialization failed: {msg}"),
            SessionError::Viewport(msg) => write!(f, "viewport change failed: {msg}"),
            SessionError::Layers(msg) => write!(f, "layer listing failed: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl SessionError {
    /// Markup that replaces the map container, for errors that leave no map.
    pub fn container_markup(&self) -> Option<&'static str> {
        match self {
            SessionError::Initialization(_) => Some(MAP_ERROR_HTML),
            SessionError::Viewport(_) | SessionError::Layers(_) => None,
        }
    }
}

pub type PointerHandler = Box<dyn Fn(PointerEvent)>;

/// An embedded, initialized map.
#[allow(async_fn_in_trait)]
pub trait MapSession {
    async fn list_layers(&self) -> Result<Vec<Layer>, SessionError>;

    /// Register the single persistent click callback.
    fn on_click(&self, handler: PointerHandler);

    /// Register the single persistent pointer-move callback.
    fn on_hover(&self, handler: PointerHandler);

    async fn set_viewport(&self, request: ViewportRequest) -> Result<(), SessionError>;
}

#[allow(async_fn_in_trait)]
pub trait MapEmbedder {
    type Session: MapSession;

    async fn embed(
        &self,
        container_id: &str,
        map_id: &str,
        ui: UiOptions,
    ) -> Result<Self::Session, SessionError>;
}

pub struct Startup<S> {
    pub session: S,
    /// Empty when listing failed; see `layer_error`.
    pub layers: Vec<Layer>,
    pub layer_error: Option<SessionError>,
}

/// Embed the map, list its layers (best-effort), then attach the pointer
/// handlers. An embed failure returns before anything else runs.
pub async fn start<E: MapEmbedder>(
    embedder: &E,
    container_id: &str,
    config: &ViewerConfig,
    on_click: PointerHandler,
    on_hover: PointerHandler,
) -> Result<Startup<E::Session>, SessionError> {
    let session = embedder
        .embed(container_id, &config.map_id, config.ui)
        .await?;

    let (layers, layer_error) = match session.list_layers().await {
        Ok(layers) => (layers, None),
        Err(err) => (Vec::new(), Some(err)),
    };

    session.on_click(on_click);
    session.on_hover(on_hover);

    Ok(Startup {
        session,
        layers,
        layer_error,
    })
}

/// Run a viewport command. `Ok(false)` means the command had nothing to do
/// and the service was not called.
pub async fn run_viewport_command<S: MapSession>(
    session: Option<&S>,
    command: ViewportCommand,
    config: &ViewerConfig,
    selected: Option<&Feature>,
) -> Result<bool, SessionError> {
    let Some(request) = command.resolve(config, selected) else {
        return Ok(false);
    };
    let Some(session) = session else {
        return Err(SessionError::Viewport("map is not initialized".to_string()));
    };
    session.set_viewport(request).await?;
    Ok(true)
}
