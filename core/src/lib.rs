pub mod config;
pub mod context;
pub mod events;
pub mod hud;
pub mod keybinds;
pub mod messages;
pub mod registry;
pub mod settings;

// Re-exports for convenience
pub use config::{ConfigError, ConfigStore, Configuration, SharedStore};
pub use context::{ContextError, Requisite, RequisiteConfig};
pub use events::{ClientEvent, EventHandler, KeyInput};
pub use hud::{HudElement, HudRegistry, HudRenderer};
pub use keybinds::{KeyBind, KeyBindRegistry};
pub use messages::{ChatSender, DeliveryMode, DeliveryOutcome, MessageQueue, MessageQueueHandle};
pub use registry::{Configurable, Registrable, Registry};
pub use settings::{Setting, SettingValue};
pub use requisite_types::{ConfigObject, ConfigValue, ScreenPosition};
