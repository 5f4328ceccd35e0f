//! Typed settings owned by registry entities.
//!
//! A [`Setting`] is a key plus a typed value. Registries persist settings
//! through [`Setting::to_config_value`] and restore them through
//! [`Setting::apply`], which is the single place where stored values are
//! coerced back into the setting's own type.

mod setting;

pub use setting::{Setting, SettingValue};
