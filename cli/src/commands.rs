use std::path::PathBuf;

use requisite_core::settings::Setting;
use requisite_core::{
    ClientEvent, Configuration, DeliveryMode, EventHandler, HudElement, KeyBind, KeyInput,
    Requisite, RequisiteConfig,
};
use requisite_types::ScreenPosition;

pub struct SimulateOptions {
    pub ticks: u32,
    pub messages: Vec<String>,
    pub presses: Vec<i32>,
    pub offline: bool,
}

/// Fold command-line flags over the stored library settings.
pub fn apply_overrides(
    mut settings: RequisiteConfig,
    config: Option<PathBuf>,
    delay: Option<u32>,
    per_entry: bool,
) -> RequisiteConfig {
    if config.is_some() {
        settings.config_file = config;
    }
    if let Some(delay) = delay {
        settings.message_delay_ticks = delay;
    }
    if per_entry {
        settings.delivery_mode = DeliveryMode::PerEntry;
    }
    settings
}

pub fn simulate(settings: &RequisiteConfig, options: SimulateOptions) -> Result<(), String> {
    let offline = options.offline;
    let sender = move |message: &str| {
        if offline {
            println!("[chat unavailable] {message}");
            return false;
        }
        println!("[chat] {message}");
        true
    };

    let mut requisite = Requisite::open(settings, sender).map_err(|e| e.to_string())?;
    register_demo_keybinds(&mut requisite);
    register_demo_hud(&mut requisite);

    for message in options.messages {
        requisite.queue_message(message);
    }
    tracing::info!(
        ticks = options.ticks,
        queued = requisite.messages().len(),
        mode = ?settings.delivery_mode,
        "Starting simulation"
    );

    for tick in 1..=options.ticks {
        println!("-- tick {tick}");
        if tick == 1 {
            for &key in &options.presses {
                requisite.handle_event(&ClientEvent::KeyInput(KeyInput::pressed(key)));
                requisite.handle_event(&ClientEvent::KeyInput(KeyInput::released(key)));
            }
        }
        requisite.handle_event(&ClientEvent::Tick);
        requisite.handle_event(&ClientEvent::RenderHud { partial_ticks: 0.0 });
    }

    let pending = requisite.messages().len();
    if pending > 0 {
        println!("{pending} message(s) still queued");
    }

    persist(&requisite)
}

/// Save the session, skipping sessions with no backing file.
fn persist(requisite: &Requisite) -> Result<(), String> {
    if !requisite.is_persistent() {
        tracing::warn!("No configuration file available, skipping save");
        println!("configuration not saved; pass --config to keep changes");
        return Ok(());
    }
    requisite
        .save()
        .map_err(|e| format!("failed to save configuration: {e}"))
}

pub fn show(settings: &RequisiteConfig) -> Result<(), String> {
    let path = settings
        .config_path()
        .ok_or("no configuration path; pass --config")?;
    let configuration = Configuration::open(&path).map_err(|e| e.to_string())?;
    if configuration.is_empty() {
        println!("{} is empty", path.display());
        return Ok(());
    }
    let rendered = configuration.render().map_err(|e| e.to_string())?;
    println!("{rendered}");
    Ok(())
}

fn register_demo_keybinds(requisite: &mut Requisite) {
    let keybinds = requisite.keybinds_mut();
    keybinds.register(
        KeyBind::new("Toggle HUD", 35)
            .with_category("Requisite")
            .on_press(|| println!("[key] Toggle HUD")),
    );
    keybinds.register(
        KeyBind::new("Open Chat Macro", 50)
            .with_category("Requisite")
            .on_press(|| println!("[key] Open Chat Macro")),
    );
}

fn register_demo_hud(requisite: &mut Requisite) {
    let hud = requisite.hud_mut();
    hud.register(
        HudElement::new("FPS", |position: ScreenPosition, partial_ticks: f32| {
            println!(
                "[hud] FPS at ({:.1}, {:.1}) partial={partial_ticks:.2}",
                position.x, position.y
            );
        })
        .with_description("Frames per second"),
    );
    hud.register(
        HudElement::new("Coordinates", |position: ScreenPosition, _: f32| {
            println!("[hud] Coordinates at ({:.1}, {:.1})", position.x, position.y);
        })
        .with_description("Player block position")
        .with_position(ScreenPosition::new(10.0, 24.0))
        .with_setting(Setting::enumeration("Format", ["XYZ", "XZ"], 0)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_session_skips_save() {
        let mut requisite = Requisite::new(Configuration::new(), |_: &str| true);
        register_demo_keybinds(&mut requisite);
        assert_eq!(persist(&requisite), Ok(()));
    }

    #[test]
    fn file_backed_session_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requisite.toml");
        let mut requisite = Requisite::new(Configuration::open(&path).unwrap(), |_: &str| true);
        register_demo_hud(&mut requisite);

        assert_eq!(persist(&requisite), Ok(()));
        let reopened = Configuration::open(&path).unwrap();
        assert!(!reopened.is_empty());
    }

    #[test]
    fn overrides_replace_stored_settings() {
        let settings = apply_overrides(
            RequisiteConfig::default(),
            Some(PathBuf::from("sim.json")),
            Some(7),
            true,
        );
        assert_eq!(settings.config_file, Some(PathBuf::from("sim.json")));
        assert_eq!(settings.message_delay_ticks, 7);
        assert_eq!(settings.delivery_mode, DeliveryMode::PerEntry);
    }
}
