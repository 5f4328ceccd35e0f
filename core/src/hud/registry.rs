use crate::config::SharedStore;
use crate::events::{ClientEvent, EventHandler};
use crate::registry::{Configurable, Registry};

use super::HudElement;

/// Configuration namespace holding HUD elements
pub const HUD_NAMESPACE: &str = "hud";

/// Registered HUD elements, drawn in registration order.
pub struct HudRegistry {
    inner: Registry<HudElement>,
}

impl HudRegistry {
    pub fn new(store: SharedStore) -> Self {
        Self {
            inner: Registry::new(HUD_NAMESPACE, store),
        }
    }

    /// Register an element, restoring its settings from configuration.
    /// Returns `false` if an element with the same name is registered.
    pub fn register(&mut self, element: HudElement) -> bool {
        self.inner.register(element)
    }

    pub fn unregister(&mut self, name: &str) -> Option<HudElement> {
        self.inner.unregister(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&HudElement> {
        self.inner.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut HudElement> {
        self.inner.get_mut(name)
    }

    pub fn elements(&self) -> &[HudElement] {
        self.inner.entries()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn save(&self, name: &str) -> bool {
        self.inner.save(name)
    }

    pub fn load(&mut self, name: &str) -> bool {
        self.inner.load(name)
    }

    /// Draw every toggled element. Returns how many were drawn.
    pub fn on_render(&mut self, partial_ticks: f32) -> usize {
        let mut drawn = 0;
        for element in self.inner.iter_mut() {
            if element.is_toggled() {
                element.render(partial_ticks);
                drawn += 1;
            }
        }
        drawn
    }
}

impl Configurable for HudRegistry {
    fn save_all(&self) {
        self.inner.save_all();
    }

    fn load_all(&mut self) {
        self.inner.load_all();
    }
}

impl EventHandler for HudRegistry {
    fn handle_event(&mut self, event: &ClientEvent) {
        if let ClientEvent::RenderHud { partial_ticks } = event {
            self.on_render(*partial_ticks);
        }
    }
}
