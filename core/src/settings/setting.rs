use requisite_types::{ConfigValue, ScreenPosition};

/// Typed value held by a [`Setting`].
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Boolean(bool),
    /// Integer clamped to an inclusive range
    Integer { value: i32, min: i32, max: i32 },
    /// One of a fixed list of named options, persisted by name
    Enum {
        selected: usize,
        options: Vec<String>,
    },
    Position(ScreenPosition),
}

impl SettingValue {
    pub fn kind(&self) -> &'static str {
        match self {
            SettingValue::Boolean(_) => "boolean",
            SettingValue::Integer { .. } => "integer",
            SettingValue::Enum { .. } => "enum",
            SettingValue::Position(_) => "position",
        }
    }
}

/// A keyed, typed setting.
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    key: String,
    value: SettingValue,
}

impl Setting {
    pub fn new(key: impl Into<String>, value: SettingValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn boolean(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, SettingValue::Boolean(value))
    }

    /// Unbounded integer setting
    pub fn integer(key: impl Into<String>, value: i32) -> Self {
        Self::integer_range(key, value, i32::MIN, i32::MAX)
    }

    /// Integer setting clamped to `min..=max`. Reversed bounds are swapped.
    pub fn integer_range(key: impl Into<String>, value: i32, min: i32, max: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self::new(
            key,
            SettingValue::Integer {
                value: value.clamp(min, max),
                min,
                max,
            },
        )
    }

    /// Enum setting over `options`. An out-of-range `selected` falls back to
    /// the last option.
    pub fn enumeration<I, S>(key: impl Into<String>, options: I, selected: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let selected = selected.min(options.len().saturating_sub(1));
        Self::new(key, SettingValue::Enum { selected, options })
    }

    pub fn position(key: impl Into<String>, value: ScreenPosition) -> Self {
        Self::new(key, SettingValue::Position(value))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &SettingValue {
        &self.value
    }

    // --- Typed accessors ---

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            SettingValue::Boolean(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self.value {
            SettingValue::Integer { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Name of the selected option
    pub fn as_enum(&self) -> Option<&str> {
        match &self.value {
            SettingValue::Enum { selected, options } => options.get(*selected).map(String::as_str),
            _ => None,
        }
    }

    pub fn as_enum_index(&self) -> Option<usize> {
        match self.value {
            SettingValue::Enum { selected, .. } => Some(selected),
            _ => None,
        }
    }

    pub fn as_position(&self) -> Option<ScreenPosition> {
        match self.value {
            SettingValue::Position(pos) => Some(pos),
            _ => None,
        }
    }

    // --- Typed mutators; each returns false when the setting has another type ---

    pub fn set_bool(&mut self, new_value: bool) -> bool {
        match &mut self.value {
            SettingValue::Boolean(b) => {
                *b = new_value;
                true
            }
            _ => false,
        }
    }

    /// Flip a boolean setting, returning the new state.
    pub fn toggle(&mut self) -> Option<bool> {
        match &mut self.value {
            SettingValue::Boolean(b) => {
                *b = !*b;
                Some(*b)
            }
            _ => None,
        }
    }

    pub fn set_integer(&mut self, new_value: i32) -> bool {
        match &mut self.value {
            SettingValue::Integer { value, min, max } => {
                *value = new_value.clamp(*min, *max);
                true
            }
            _ => false,
        }
    }

    /// Select an option by name, case-insensitively.
    pub fn select(&mut self, name: &str) -> bool {
        match &mut self.value {
            SettingValue::Enum { selected, options } => {
                match options.iter().position(|o| o.eq_ignore_ascii_case(name)) {
                    Some(idx) => {
                        *selected = idx;
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        match &mut self.value {
            SettingValue::Enum { selected, options } if index < options.len() => {
                *selected = index;
                true
            }
            _ => false,
        }
    }

    pub fn set_position(&mut self, new_value: ScreenPosition) -> bool {
        match &mut self.value {
            SettingValue::Position(pos) => {
                *pos = new_value;
                true
            }
            _ => false,
        }
    }

    // --- Persistence ---

    /// Encode the current value for the configuration store.
    pub fn to_config_value(&self) -> ConfigValue {
        match &self.value {
            SettingValue::Boolean(b) => ConfigValue::Bool(*b),
            SettingValue::Integer { value, .. } => ConfigValue::from(*value),
            SettingValue::Enum { selected, options } => match options.get(*selected) {
                Some(name) => ConfigValue::String(name.clone()),
                None => ConfigValue::Int(*selected as i64),
            },
            SettingValue::Position(pos) => pos.to_config_value(),
        }
    }

    /// Overwrite the value from a stored one.
    ///
    /// Coercion rules:
    /// - boolean: only `Bool`
    /// - integer: `Int` or `Float`, truncated toward zero, then clamped
    /// - enum: option name (case-insensitive) or an in-range numeric index
    /// - position: object with numeric `x` and `y`
    ///
    /// Returns `false` and leaves the value untouched when the stored value
    /// cannot be coerced.
    pub fn apply(&mut self, stored: &ConfigValue) -> bool {
        let accepted = match self.value {
            SettingValue::Boolean(_) => stored.as_bool().is_some_and(|b| self.set_bool(b)),
            SettingValue::Integer { .. } => stored.as_i32().is_some_and(|v| self.set_integer(v)),
            SettingValue::Enum { .. } => match stored {
                ConfigValue::String(name) => self.select(name),
                other => other
                    .as_i64()
                    .and_then(|i| usize::try_from(i).ok())
                    .is_some_and(|i| self.select_index(i)),
            },
            SettingValue::Position(_) => ScreenPosition::from_config_value(stored)
                .is_some_and(|pos| self.set_position(pos)),
        };

        if !accepted {
            tracing::debug!(
                key = %self.key,
                expected = self.value.kind(),
                found = stored.type_name(),
                "Ignoring stored value that does not fit setting"
            );
        }
        accepted
    }
}
