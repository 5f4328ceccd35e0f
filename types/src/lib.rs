//! Shared value types for Requisite.
//!
//! These are the plain data types that cross crate boundaries: the tagged
//! union stored in the configuration tree and the screen position used by
//! HUD elements.

pub mod position;
pub mod value;

pub use position::ScreenPosition;
pub use value::{ConfigObject, ConfigValue};
