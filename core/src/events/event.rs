/// Events delivered by the host client.
///
/// The host calls into the library once per occurrence, on its main thread:
/// `Tick` once per simulation step, `RenderHud` once per rendered frame and
/// `KeyInput` for every keyboard transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClientEvent {
    /// One simulation step elapsed
    Tick,

    /// The HUD layer is being drawn
    RenderHud {
        /// Interpolation fraction between the last two ticks (0.0 to 1.0)
        partial_ticks: f32,
    },

    /// A key changed state
    KeyInput(KeyInput),
}

/// Raw keyboard transition as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key_code: i32,
    pub down: bool,
    /// Auto-repeat while the key is held
    pub repeated: bool,
}

impl KeyInput {
    pub fn pressed(key_code: i32) -> Self {
        Self {
            key_code,
            down: true,
            repeated: false,
        }
    }

    pub fn released(key_code: i32) -> Self {
        Self {
            key_code,
            down: false,
            repeated: false,
        }
    }

    pub fn repeat(key_code: i32) -> Self {
        Self {
            key_code,
            down: true,
            repeated: true,
        }
    }
}
