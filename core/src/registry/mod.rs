//! Config-backed registries
//!
//! A [`Registry`] keeps registered entities in registration order and keeps
//! them in sync with the shared configuration store:
//!
//! ```text
//! register(entity) ──► append ──► load (store → entity) ──► save (entity → store)
//! unregister(name) ──► remove first match ──► prune unused category
//! ```
//!
//! Each entity is stored at `[namespace, category?, name]`. What gets written
//! there is up to the entity: keybinds write a scalar key code, HUD elements
//! write an object holding all of their settings.

use std::collections::BTreeSet;

use requisite_types::ConfigValue;

use crate::config::{SharedStore, read_store, write_store};


/// An entity that can live in a [`Registry`].
pub trait Registrable {
    /// Unique identifier within the registry
    fn name(&self) -> &str;

    /// Optional grouping key, nested between the namespace and the name
    fn category(&self) -> Option<&str> {
        None
    }

    /// Encode the entity's persisted state
    fn to_config_value(&self) -> ConfigValue;

    /// Restore persisted state. Values that do not fit are ignored.
    fn apply_config_value(&mut self, stored: &ConfigValue);
}

/// Something whose whole state can be pushed to or pulled from the store.
pub trait Configurable {
    fn save_all(&self);
    fn load_all(&mut self);
}

/// Ordered collection of entities synchronised with a configuration namespace.
pub struct Registry<E> {
    namespace: String,
    entries: Vec<E>,
    categories: BTreeSet<String>,
    store: SharedStore,
}

impl<E: Registrable> Registry<E> {
    pub fn new(namespace: impl Into<String>, store: SharedStore) -> Self {
        Self {
            namespace: namespace.into(),
            entries: Vec::new(),
            categories: BTreeSet::new(),
            store,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Register an entity, then load and save it against the store.
    ///
    /// Returns `false` without touching anything if an entity with the same
    /// name is already registered.
    pub fn register(&mut self, entry: E) -> bool {
        if self.contains(entry.name()) {
            tracing::debug!(
                namespace = %self.namespace,
                name = entry.name(),
                "Ignoring duplicate registration"
            );
            return false;
        }

        if let Some(category) = entry.category() {
            self.categories.insert(category.to_string());
        }

        self.entries.push(entry);
        if let Some(entry) = self.entries.last_mut() {
            load_entry(&self.store, &self.namespace, entry);
            save_entry(&self.store, &self.namespace, entry);
        }
        true
    }

    /// Remove the first entity with `name`, pruning its category if no other
    /// entity still uses it.
    pub fn unregister(&mut self, name: &str) -> Option<E> {
        let idx = self.entries.iter().position(|e| e.name() == name)?;
        let removed = self.entries.remove(idx);

        if let Some(category) = removed.category() {
            let still_used = self
                .entries
                .iter()
                .any(|e| e.category() == Some(category));
            if !still_used {
                self.categories.remove(category);
            }
        }

        tracing::debug!(namespace = %self.namespace, name, "Unregistered");
        Some(removed)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name() == name)
    }

    pub fn get(&self, name: &str) -> Option<&E> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut E> {
        self.entries.iter_mut().find(|e| e.name() == name)
    }

    /// Entities in registration order
    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut E> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct categories of the registered entities
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// Write one entity to the store. Returns `false` if it is not registered.
    pub fn save(&self, name: &str) -> bool {
        match self.get(name) {
            Some(entry) => {
                save_entry(&self.store, &self.namespace, entry);
                true
            }
            None => false,
        }
    }

    /// Reload one entity from the store. Returns `false` if it is not registered.
    pub fn load(&mut self, name: &str) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.name() == name) else {
            return false;
        };
        load_entry(&self.store, &self.namespace, entry);
        true
    }
}

impl<E: Registrable> Configurable for Registry<E> {
    fn save_all(&self) {
        for entry in &self.entries {
            save_entry(&self.store, &self.namespace, entry);
        }
    }

    fn load_all(&mut self) {
        for entry in &mut self.entries {
            load_entry(&self.store, &self.namespace, entry);
        }
    }
}

fn entry_path<'a, E: Registrable>(namespace: &'a str, entry: &'a E) -> Vec<&'a str> {
    let mut path = Vec::with_capacity(3);
    path.push(namespace);
    if let Some(category) = entry.category() {
        path.push(category);
    }
    path.push(entry.name());
    path
}

fn save_entry<E: Registrable>(store: &SharedStore, namespace: &str, entry: &E) {
    let path = entry_path(namespace, entry);
    let value = entry.to_config_value();
    if let Err(e) = write_store(store).add(&path, value) {
        tracing::warn!(error = %e, path = %path.join("."), "Failed to save entry");
    }
}

fn load_entry<E: Registrable>(store: &SharedStore, namespace: &str, entry: &mut E) {
    let stored = {
        let store = read_store(store);
        store.get(&entry_path(namespace, entry)).cloned()
    };

    match stored {
        Some(value) => entry.apply_config_value(&value),
        None => tracing::trace!(namespace, name = entry.name(), "No stored value, keeping defaults"),
    }
}
