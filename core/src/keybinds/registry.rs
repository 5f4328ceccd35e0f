use crate::config::SharedStore;
use crate::events::{ClientEvent, EventHandler, KeyInput};
use crate::registry::{Configurable, Registry};

use super::{KEY_NONE, KeyBind};

/// Configuration namespace holding keybinds
pub const KEYBINDS_NAMESPACE: &str = "keybinds";

/// Registered keybinds plus the derived set of their categories.
pub struct KeyBindRegistry {
    inner: Registry<KeyBind>,
}

impl KeyBindRegistry {
    pub fn new(store: SharedStore) -> Self {
        Self {
            inner: Registry::new(KEYBINDS_NAMESPACE, store),
        }
    }

    /// Register a keybind, restoring its key code from configuration.
    ///
    /// A keybind whose name is already registered is ignored and `false` is
    /// returned.
    pub fn register(&mut self, keybind: KeyBind) -> bool {
        let registered = self.inner.register(keybind);
        if registered {
            tracing::debug!(count = self.inner.len(), "Registered keybind");
        }
        registered
    }

    pub fn unregister(&mut self, name: &str) -> Option<KeyBind> {
        self.inner.unregister(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&KeyBind> {
        self.inner.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut KeyBind> {
        self.inner.get_mut(name)
    }

    pub fn keybinds(&self) -> &[KeyBind] {
        self.inner.entries()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.inner.categories()
    }

    /// Keybinds in `category`, in registration order
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a KeyBind> {
        self.inner
            .iter()
            .filter(move |k| k.category() == Some(category))
    }

    /// Change a keybind's key and persist it immediately.
    pub fn rebind(&mut self, name: &str, key: i32) -> bool {
        let Some(keybind) = self.inner.get_mut(name) else {
            return false;
        };
        keybind.update_key(key);
        self.inner.save(name)
    }

    pub fn save(&self, name: &str) -> bool {
        self.inner.save(name)
    }

    pub fn load(&mut self, name: &str) -> bool {
        self.inner.load(name)
    }

    /// Route a key transition to every keybind bound to that key.
    ///
    /// Returns how many press actions fired.
    pub fn on_key_input(&mut self, input: &KeyInput) -> usize {
        if input.key_code == KEY_NONE {
            return 0;
        }

        let mut fired = 0;
        for keybind in self.inner.iter_mut() {
            if keybind.key() == input.key_code && keybind.handle_input(input.down, input.repeated)
            {
                tracing::trace!(keybind = keybind.name(), "Keybind pressed");
                fired += 1;
            }
        }
        fired
    }
}

impl Configurable for KeyBindRegistry {
    fn save_all(&self) {
        self.inner.save_all();
    }

    fn load_all(&mut self) {
        self.inner.load_all();
    }
}

impl EventHandler for KeyBindRegistry {
    fn handle_event(&mut self, event: &ClientEvent) {
        if let ClientEvent::KeyInput(input) = event {
            self.on_key_input(input);
        }
    }
}
