//! Keybind registration
//!
//! Keybinds are persisted as bare key codes grouped by category:
//!
//! ```text
//! [keybinds.Movement]
//! sprint = 29
//! ```

mod keybind;
mod registry;

pub use keybind::{KEY_NONE, KeyAction, KeyBind};
pub use registry::{KEYBINDS_NAMESPACE, KeyBindRegistry};
