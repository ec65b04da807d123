pub mod config;
pub mod feature;
pub mod filter;
pub mod panel;
pub mod router;
pub mod session;
pub mod stats;
pub mod tier;
pub mod tooltip;
pub mod viewport;

pub use config::{UiOptions, ViewerConfig};
pub use feature::{Feature, Geometry, Properties};
pub use filter::{FilterController, FilterOutcome, TierFilter};
pub use router::{HoverAction, InteractionRouter};
pub use session::{Layer, MapEmbedder, MapSession, PointerEvent, SessionError};
pub use stats::{SiteStats, format_count};
pub use tier::{PerTier, Tier, TierRegistry, tier_class};
pub use viewport::{LatLng, ViewportCommand, ViewportRequest};
