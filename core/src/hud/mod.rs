//! HUD element registration and render dispatch
//!
//! Every element owns a `Toggle` and a `Position` setting ahead of any
//! element-specific ones. All settings of an element are persisted together
//! as one object:
//!
//! ```text
//! [hud.fps]
//! Toggle = true
//! Position = { x = 10.0, y = 10.0 }
//! Mode = "Compact"
//! ```
//!
//! On each HUD render event the registry draws the toggled elements in
//! registration order.

mod element;
mod registry;

pub use element::{DEFAULT_POSITION, HudElement, HudRenderer, POSITION_KEY, TOGGLE_KEY};
pub use registry::{HUD_NAMESPACE, HudRegistry};
