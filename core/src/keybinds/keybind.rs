use std::fmt;

use requisite_types::ConfigValue;

use crate::registry::Registrable;

/// Key code meaning "unbound". Never matches an input event.
pub const KEY_NONE: i32 = 0;

/// Callback fired when a keybind is pressed.
pub type KeyAction = Box<dyn FnMut() + Send>;

/// A named, rebindable key.
pub struct KeyBind {
    name: String,
    category: Option<String>,
    key: i32,
    default_key: i32,
    pressed: bool,
    action: Option<KeyAction>,
}

impl KeyBind {
    pub fn new(name: impl Into<String>, default_key: i32) -> Self {
        Self {
            name: name.into(),
            category: None,
            key: default_key,
            default_key,
            pressed: false,
            action: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach the callback fired on each non-repeated press.
    pub fn on_press(mut self, action: impl FnMut() + Send + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn key(&self) -> i32 {
        self.key
    }

    pub fn default_key(&self) -> i32 {
        self.default_key
    }

    pub fn is_bound(&self) -> bool {
        self.key != KEY_NONE
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn update_key(&mut self, key: i32) {
        self.key = key;
        if key == KEY_NONE {
            self.pressed = false;
        }
    }

    pub fn reset_key(&mut self) {
        self.update_key(self.default_key);
    }

    /// Record a key transition. Returns `true` if the press action fired.
    pub(crate) fn handle_input(&mut self, down: bool, repeated: bool) -> bool {
        self.pressed = down;
        if !down || repeated {
            return false;
        }
        match self.action.as_mut() {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for KeyBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBind")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("key", &self.key)
            .field("default_key", &self.default_key)
            .field("pressed", &self.pressed)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

impl Registrable for KeyBind {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn to_config_value(&self) -> ConfigValue {
        ConfigValue::from(self.key)
    }

    // Key codes written as floats or doubles by other tools truncate to int.
    fn apply_config_value(&mut self, stored: &ConfigValue) {
        match stored.as_i32() {
            Some(key) => self.update_key(key),
            None => tracing::debug!(
                keybind = %self.name,
                found = stored.type_name(),
                "Stored key code is not numeric, keeping current key"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn press_fires_once_per_non_repeated_down() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let mut bind = KeyBind::new("zoom", 46).on_press(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(bind.handle_input(true, false));
        assert!(bind.is_pressed());
        assert!(!bind.handle_input(true, true));
        assert!(!bind.handle_input(false, false));
        assert!(!bind.is_pressed());

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stored_float_truncates_to_key_code() {
        let mut bind = KeyBind::new("zoom", 46);
        bind.apply_config_value(&ConfigValue::Float(33.9));
        assert_eq!(bind.key(), 33);

        bind.apply_config_value(&ConfigValue::from("Z"));
        assert_eq!(bind.key(), 33);

        bind.reset_key();
        assert_eq!(bind.key(), 46);
    }

    #[test]
    fn unbinding_clears_pressed_state() {
        let mut bind = KeyBind::new("zoom", 46);
        bind.handle_input(true, false);
        bind.update_key(KEY_NONE);
        assert!(!bind.is_bound());
        assert!(!bind.is_pressed());
    }
}
