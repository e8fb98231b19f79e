use bevy::log::LogPlugin;
use bevy::prelude::*;
use drift_core::{CorePlugin, DriftConfig};
use drift_panel::PanelPlugin;
use drift_physics::PhysicsPlugin;

fn main() {
    // Optional JSON overrides: glyph_drift [config.json]
    let config = match std::env::args().nth(1) {
        Some(path) => match DriftConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => DriftConfig::default(),
    };

    App::new()
        .insert_resource(config)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Glyph Drift".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,drift_core=info,drift_physics=info".into(),
                    ..default()
                }),
        )
        .add_plugins(CorePlugin)
        .add_plugins(PhysicsPlugin)
        .add_plugins(PanelPlugin)
        .run();
}
