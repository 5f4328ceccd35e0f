//! Configuration scalar and object values.
//!
//! Every leaf stored in the configuration tree is a [`ConfigValue`]. Readers
//! never match on the variant directly when they want a number; they go
//! through the coercion helpers below so that integer, float and double
//! encodings written by different tools all load the same way.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A nested configuration object. Keys stay sorted so saved output is stable.
pub type ConfigObject = BTreeMap<String, ConfigValue>;

/// Tagged union of everything the configuration store can hold.
///
/// Serialized untagged, so a TOML or JSON document maps onto it directly.
/// Variant order matters for deserialization: integers are tried before
/// floats so `20` stays an `Int` while `20.0` becomes a `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Object(ConfigObject),
}

impl ConfigValue {
    /// Create an empty object value.
    pub fn object() -> Self {
        ConfigValue::Object(ConfigObject::new())
    }

    /// Short variant name for log output.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Int(_) => "int",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Object(_) => "object",
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ConfigValue::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ConfigObject> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ConfigObject> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Coerce a numeric value to `i64`.
    ///
    /// Floats truncate toward zero and saturate at the `i64` range.
    /// NaN and non-numeric variants yield `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            ConfigValue::Float(f) if !f.is_nan() => Some(*f as i64),
            _ => None,
        }
    }

    /// Coerce a numeric value to `i32`.
    ///
    /// Integers saturate at the `i32` range, floats truncate toward zero and
    /// saturate. NaN and non-numeric variants yield `None`.
    ///
    /// # Examples
    /// ```
    /// use requisite_types::ConfigValue;
    /// assert_eq!(ConfigValue::Int(42).as_i32(), Some(42));
    /// assert_eq!(ConfigValue::Float(42.9).as_i32(), Some(42));
    /// assert_eq!(ConfigValue::Float(-3.7).as_i32(), Some(-3));
    /// assert_eq!(ConfigValue::Int(i64::MAX).as_i32(), Some(i32::MAX));
    /// assert_eq!(ConfigValue::Bool(true).as_i32(), None);
    /// ```
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ConfigValue::Int(i) => Some((*i).clamp(i32::MIN as i64, i32::MAX as i64) as i32),
            ConfigValue::Float(f) if !f.is_nan() => Some(*f as i32),
            _ => None,
        }
    }

    /// Coerce a numeric value to `f64`. Integers convert losslessly up to 2^53.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Int(i) => Some(*i as f64),
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        self.as_f64().map(|f| f as f32)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Int(i) => write!(f, "{}", i),
            ConfigValue::Float(v) => write!(f, "{}", v),
            ConfigValue::String(s) => write!(f, "{:?}", s),
            ConfigValue::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Int(value as i64)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<u32> for ConfigValue {
    fn from(value: u32) -> Self {
        ConfigValue::Int(value as i64)
    }
}

impl From<f32> for ConfigValue {
    fn from(value: f32) -> Self {
        ConfigValue::Float(value as f64)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<ConfigObject> for ConfigValue {
    fn from(value: ConfigObject) -> Self {
        ConfigValue::Object(value)
    }
}
