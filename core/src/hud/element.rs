use std::fmt;

use requisite_types::{ConfigObject, ConfigValue, ScreenPosition};

use crate::registry::Registrable;
use crate::settings::Setting;

pub const TOGGLE_KEY: &str = "Toggle";
pub const POSITION_KEY: &str = "Position";
pub const DEFAULT_POSITION: ScreenPosition = ScreenPosition::new(10.0, 10.0);

const TOGGLE_IDX: usize = 0;
const POSITION_IDX: usize = 1;

/// Draws a HUD element. Implemented by the host-side rendering code.
pub trait HudRenderer: Send {
    fn render(&mut self, position: ScreenPosition, partial_ticks: f32);
}

impl<F> HudRenderer for F
where
    F: FnMut(ScreenPosition, f32) + Send,
{
    fn render(&mut self, position: ScreenPosition, partial_ticks: f32) {
        self(position, partial_ticks)
    }
}

/// A toggleable, positionable HUD element with its own settings.
pub struct HudElement {
    name: String,
    id: String,
    description: String,
    // [Toggle, Position, element-specific...]
    settings: Vec<Setting>,
    renderer: Box<dyn HudRenderer>,
}

impl HudElement {
    /// Create an enabled element at [`DEFAULT_POSITION`].
    ///
    /// The id is derived from the name: lowercased, spaces replaced by `_`.
    pub fn new(name: impl Into<String>, renderer: impl HudRenderer + 'static) -> Self {
        let name = name.into();
        let id = name.to_lowercase().replace(' ', "_");
        Self {
            name,
            id,
            description: String::new(),
            settings: vec![
                Setting::boolean(TOGGLE_KEY, true),
                Setting::position(POSITION_KEY, DEFAULT_POSITION),
            ],
            renderer: Box::new(renderer),
        }
    }

    /// Override the derived id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_setting(mut self, setting: Setting) -> Self {
        self.add_setting(setting);
        self
    }

    pub fn with_position(mut self, position: ScreenPosition) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_toggled(mut self, toggled: bool) -> Self {
        self.set_toggled(toggled);
        self
    }

    /// Append an element-specific setting. Keys must be unique per element;
    /// a duplicate key is rejected.
    pub fn add_setting(&mut self, setting: Setting) -> bool {
        if self.setting(setting.key()).is_some() {
            tracing::warn!(
                element = %self.name,
                key = setting.key(),
                "Ignoring duplicate HUD setting key"
            );
            return false;
        }
        self.settings.push(setting);
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stable identifier for host UIs such as an editor or settings screen.
    /// Registries key on [`name`](Self::name); the id is never persisted.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    pub fn setting(&self, key: &str) -> Option<&Setting> {
        self.settings.iter().find(|s| s.key() == key)
    }

    /// Settings can be changed through their typed mutators but never
    /// replaced, so `Toggle` and `Position` keep their types.
    pub fn setting_mut(&mut self, key: &str) -> Option<&mut Setting> {
        self.settings.iter_mut().find(|s| s.key() == key)
    }

    pub fn is_toggled(&self) -> bool {
        self.settings[TOGGLE_IDX].as_bool().unwrap_or(false)
    }

    pub fn set_toggled(&mut self, toggled: bool) {
        self.settings[TOGGLE_IDX].set_bool(toggled);
    }

    /// Flip the toggle, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.settings[TOGGLE_IDX].toggle().unwrap_or(false)
    }

    pub fn position(&self) -> ScreenPosition {
        self.settings[POSITION_IDX]
            .as_position()
            .unwrap_or(DEFAULT_POSITION)
    }

    pub fn set_position(&mut self, position: ScreenPosition) {
        self.settings[POSITION_IDX].set_position(position);
    }

    /// Draw at the configured position.
    pub fn render(&mut self, partial_ticks: f32) {
        let position = self.position();
        self.renderer.render(position, partial_ticks);
    }
}

impl fmt::Debug for HudElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HudElement")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("description", &self.description)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Registrable for HudElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn to_config_value(&self) -> ConfigValue {
        let map: ConfigObject = self
            .settings
            .iter()
            .map(|s| (s.key().to_string(), s.to_config_value()))
            .collect();
        ConfigValue::Object(map)
    }

    fn apply_config_value(&mut self, stored: &ConfigValue) {
        let Some(map) = stored.as_object() else {
            tracing::debug!(
                element = %self.name,
                found = stored.type_name(),
                "Stored HUD entry is not an object, keeping defaults"
            );
            return;
        };

        for setting in &mut self.settings {
            if let Some(value) = map.get(setting.key()) {
                setting.apply(value);
            }
        }
    }
}
