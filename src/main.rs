use bevy::prelude::*;
use bevy::window::WindowResolution;
use gorboy_void::config::{load_game_config, GameConfig};
use gorboy_void::plugin::{ArcadePlugin, SessionSeed};
use gorboy_void::rendering;
use gorboy_void::simulation::Simulation;
use std::env;

fn main() {
    // Optional fixed seed for reproducible sessions
    let seed = env::var("GORBOY_SEED").ok().and_then(|s| s.parse::<u64>().ok());

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Gorboy Void".into(),
            resolution: WindowResolution::new(1200, 680),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::BLACK))
    // Compiled defaults; load_game_config overlays assets/game.toml in Startup.
    .insert_resource(GameConfig::default())
    .add_plugins(ArcadePlugin)
    .add_systems(
        Startup,
        (
            rendering::setup_camera,
            rendering::setup_hud_text.after(load_game_config),
        ),
    )
    .add_systems(
        Update,
        (
            rendering::hud_text_system,
            rendering::briefing_text_system,
            rendering::gizmo_rendering_system,
        )
            .run_if(resource_exists::<Simulation>),
    );

    if let Some(seed) = seed {
        app.insert_resource(SessionSeed(seed));
    }

    app.run();
}
