use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::{Configuration, SharedStore};
use crate::events::{ClientEvent, EventHandler};
use crate::hud::HudRegistry;
use crate::keybinds::KeyBindRegistry;
use crate::messages::{ChatSender, MessageQueue, MessageQueueHandle};
use crate::registry::Configurable;

use super::{ContextError, RequisiteConfig};

/// One client session: the configuration tree and everything bound to it.
///
/// Host events go through [`handle_event`](Self::handle_event), which routes
/// ticks to the message queue, key input to the keybinds and render passes to
/// the HUD before handing the event to any extra handlers.
pub struct Requisite {
    configuration: Arc<RwLock<Configuration>>,
    messages: MessageQueue,
    keybinds: KeyBindRegistry,
    hud: HudRegistry,
    handlers: Vec<Box<dyn EventHandler + Send>>,
    message_delay_ticks: u32,
}

impl Requisite {
    pub fn new(configuration: Configuration, sender: impl ChatSender + Send + 'static) -> Self {
        Self::with_settings(configuration, sender, &RequisiteConfig::default())
    }

    pub fn with_settings(
        configuration: Configuration,
        sender: impl ChatSender + Send + 'static,
        settings: &RequisiteConfig,
    ) -> Self {
        let configuration = Arc::new(RwLock::new(configuration));
        let store: SharedStore = configuration.clone();
        Self {
            messages: MessageQueue::with_mode(sender, settings.delivery_mode),
            keybinds: KeyBindRegistry::new(Arc::clone(&store)),
            hud: HudRegistry::new(store),
            configuration,
            handlers: Vec::new(),
            message_delay_ticks: settings.message_delay_ticks,
        }
    }

    /// Open the configuration file named by `settings`. Without an override
    /// or a platform config directory the session runs in memory only.
    pub fn open(
        settings: &RequisiteConfig,
        sender: impl ChatSender + Send + 'static,
    ) -> Result<Self, ContextError> {
        let configuration = match settings.config_path() {
            Some(path) => Configuration::open(path)?,
            None => {
                tracing::warn!("No configuration directory available, settings will not persist");
                Configuration::new()
            }
        };
        Ok(Self::with_settings(configuration, sender, settings))
    }

    pub fn configuration(&self) -> RwLockReadGuard<'_, Configuration> {
        self.configuration.read().unwrap_or_else(|poisoned| {
            tracing::warn!("Configuration lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn configuration_mut(&self) -> RwLockWriteGuard<'_, Configuration> {
        self.configuration.write().unwrap_or_else(|poisoned| {
            tracing::warn!("Configuration lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Whether the configuration has a backing file [`save`](Self::save) can write.
    pub fn is_persistent(&self) -> bool {
        self.configuration().path().is_some()
    }

    /// Store handle for additional registries sharing this configuration
    pub fn store(&self) -> SharedStore {
        self.configuration.clone()
    }

    pub fn messages(&self) -> &MessageQueue {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageQueue {
        &mut self.messages
    }

    pub fn message_handle(&self) -> MessageQueueHandle {
        self.messages.handle()
    }

    /// Queue a chat message with the configured delay.
    pub fn queue_message(&self, message: impl Into<String>) {
        self.messages.enqueue(message, self.message_delay_ticks);
    }

    pub fn keybinds(&self) -> &KeyBindRegistry {
        &self.keybinds
    }

    pub fn keybinds_mut(&mut self) -> &mut KeyBindRegistry {
        &mut self.keybinds
    }

    pub fn hud(&self) -> &HudRegistry {
        &self.hud
    }

    pub fn hud_mut(&mut self) -> &mut HudRegistry {
        &mut self.hud
    }

    /// Register a handler to receive every host event after the built-in
    /// components.
    pub fn add_event_handler(&mut self, handler: impl EventHandler + Send + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Push every registered entity to the store and write the file.
    pub fn save(&self) -> Result<(), ContextError> {
        self.keybinds.save_all();
        self.hud.save_all();
        self.configuration().save()?;
        tracing::info!(
            keybinds = self.keybinds.len(),
            hud_elements = self.hud.len(),
            "Saved configuration"
        );
        Ok(())
    }

    /// Re-read the file and apply it to every registered entity.
    pub fn load(&mut self) -> Result<(), ContextError> {
        self.configuration_mut().reload()?;
        self.keybinds.load_all();
        self.hud.load_all();
        tracing::debug!("Reloaded configuration");
        Ok(())
    }
}

impl EventHandler for Requisite {
    fn handle_event(&mut self, event: &ClientEvent) {
        match event {
            ClientEvent::Tick => self.messages.handle_event(event),
            ClientEvent::KeyInput(_) => self.keybinds.handle_event(event),
            ClientEvent::RenderHud { .. } => self.hud.handle_event(event),
        }
        for handler in &mut self.handlers {
            handler.handle_event(event);
        }
    }
}
