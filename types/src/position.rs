//! Screen-space position for HUD elements.

use serde::{Deserialize, Serialize};

use crate::value::{ConfigObject, ConfigValue};

/// Top-left anchor of a HUD element, in scaled screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: f32,
    pub y: f32,
}

impl ScreenPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Encode as `{ x, y }` for the configuration tree.
    pub fn to_config_value(&self) -> ConfigValue {
        let mut map = ConfigObject::new();
        map.insert("x".to_string(), ConfigValue::from(self.x));
        map.insert("y".to_string(), ConfigValue::from(self.y));
        ConfigValue::Object(map)
    }

    /// Decode from an object holding numeric `x` and `y`.
    ///
    /// Returns `None` when either coordinate is missing or non-numeric.
    ///
    /// # Examples
    /// ```
    /// use requisite_types::{ConfigValue, ScreenPosition};
    /// let pos = ScreenPosition::new(12.5, 40.0);
    /// assert_eq!(ScreenPosition::from_config_value(&pos.to_config_value()), Some(pos));
    /// assert_eq!(ScreenPosition::from_config_value(&ConfigValue::Int(3)), None);
    /// ```
    pub fn from_config_value(value: &ConfigValue) -> Option<Self> {
        let map = value.as_object()?;
        let x = map.get("x")?.as_f32()?;
        let y = map.get("y")?.as_f32()?;
        Some(Self { x, y })
    }
}
