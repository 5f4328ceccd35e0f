//! Nested configuration store
//!
//! The store is a tree of string keys. Leaves are [`ConfigValue`] scalars,
//! branches are "subconfigurations" (objects). Registries never own the
//! authoritative value of a setting: the store does, and registries
//! reconcile against it on register, load and save.
//!
//! # Layout
//!
//! ```text
//! [keybinds.<category>]
//! <keybind name> = <key code>
//!
//! [hud.<element name>]
//! Toggle = true
//! Position = { x = 10.0, y = 10.0 }
//! <setting key> = <value>
//! ```
//!
//! [`ConfigValue`]: requisite_types::ConfigValue

mod error;
mod file;
mod store;

pub use error::ConfigError;
pub use file::{ConfigFormat, default_config_path};
pub use store::{ConfigStore, Configuration, DynStore, SharedStore};
pub(crate) use store::{read_store, write_store};
