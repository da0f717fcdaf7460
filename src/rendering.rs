//! Debug renderer: gizmo wireframes plus a text HUD.
//!
//! Reads [`RenderSnapshot`] / [`HudState`] / [`BriefingLog`] only; nothing
//! here writes simulation state.
//!
//! ## System Responsibilities
//!
//! | System                     | Schedule | Purpose                              |
//! |----------------------------|----------|--------------------------------------|
//! | `setup_camera`             | Startup  | Spawn the 2D camera                  |
//! | `setup_hud_text`           | Startup  | Spawn HUD and briefing text nodes    |
//! | `hud_text_system`          | Update   | Refresh HUD text from `HudState`     |
//! | `briefing_text_system`     | Update   | Refresh briefing line                |
//! | `gizmo_rendering_system`   | Update   | Draw ship, rocks, drops, dock, fx    |
//!
//! World x is mirrored on screen so a left turn (heading increasing) swings
//! the nose to the left.

use crate::config::GameConfig;
use crate::entities::{ParticleKind, PowerUpKind, ResourceKind};
use crate::hud::{Hud, RenderSnapshot};
use crate::math::ship_to_world;
use crate::pilots::SelectedPilot;
use crate::plugin::{BriefingLog, HudState};
use crate::simulation::Simulation;
use bevy::prelude::*;

/// Marker for the HUD status text.
#[derive(Component)]
pub struct HudText;

/// Marker for the briefing text.
#[derive(Component)]
pub struct BriefingText;

/// Hull outline in ship-local units (nose along +y).
const HULL: [Vec2; 4] = [
    Vec2::new(0.0, 3.0),
    Vec2::new(-2.0, -2.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(2.0, -2.0),
];

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub fn setup_hud_text(mut commands: Commands, config: Res<GameConfig>) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
                HudText,
            ));
        });

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            bottom: Val::Px(10.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.55, 0.9, 1.0)),
                BriefingText,
            ));
        });
}

fn format_hud(hud: &Hud) -> String {
    let mut lines = vec![
        format!("WAVE {}   HULL {}   SHIELD {}", hud.wave, hud.hp, hud.shield),
        format!(
            "CARGO  {} {} / {} {} / {} {}   x{}",
            ResourceKind::Coin.label(),
            hud.carried.coin,
            ResourceKind::Gorboy.label(),
            hud.carried.gorboy,
            ResourceKind::Crystal.label(),
            hud.carried.crystal,
            hud.multiplier
        ),
        format!(
            "BANK   {} {} / {} {} / {} {}",
            ResourceKind::Coin.label(),
            hud.banked.coin,
            ResourceKind::Gorboy.label(),
            hud.banked.gorboy,
            ResourceKind::Crystal.label(),
            hud.banked.crystal
        ),
    ];
    if hud.dock_nearby {
        lines.push(format!("DOCK {:>3.0}%  hold E", hud.dock_hold));
    }
    lines.push(hud.status.to_string());
    lines.join("\n")
}

pub fn hud_text_system(hud: Res<HudState>, mut query: Query<&mut Text, With<HudText>>) {
    if !hud.is_changed() {
        return;
    }
    for mut text in query.iter_mut() {
        *text = Text::new(format_hud(&hud.0));
    }
}

pub fn briefing_text_system(log: Res<BriefingLog>, mut query: Query<&mut Text, With<BriefingText>>) {
    if !log.is_changed() {
        return;
    }
    for mut text in query.iter_mut() {
        *text = Text::new(format!("> {}", log.text));
    }
}

// ── Gizmos ────────────────────────────────────────────────────────────────────

fn drop_color(kind: ResourceKind) -> Color {
    match kind {
        ResourceKind::Coin => Color::srgb(1.0, 0.84, 0.2),
        ResourceKind::Gorboy => Color::srgb(0.4, 1.0, 0.4),
        ResourceKind::Crystal => Color::srgb(0.6, 0.5, 1.0),
    }
}

fn powerup_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::X2 => Color::srgb(1.0, 0.5, 0.1),
        PowerUpKind::X4 => Color::srgb(1.0, 0.2, 0.6),
        PowerUpKind::Shield => Color::srgb(0.3, 0.8, 1.0),
    }
}

fn particle_color(kind: ParticleKind, fade: f32) -> Color {
    let (r, g, b) = match kind {
        ParticleKind::Exhaust => (1.0, 0.6, 0.2),
        ParticleKind::RollTrail => (0.6, 0.9, 1.0),
        ParticleKind::Debris => (0.7, 0.65, 0.6),
        ParticleKind::Collect => (1.0, 1.0, 0.6),
    };
    Color::srgba(r, g, b, fade)
}

pub fn gizmo_rendering_system(
    mut gizmos: Gizmos,
    sim: Res<Simulation>,
    time: Res<Time>,
    config: Res<GameConfig>,
    selected: Res<SelectedPilot>,
) {
    let now = time.elapsed().as_millis() as u64;
    let snap: RenderSnapshot = sim.snapshot(now);
    let scale = config.render_scale;

    let secs = time.elapsed_secs();
    let shake = Vec2::new((secs * 91.0).sin(), (secs * 73.0).cos()) * snap.camera_shake;
    let to_screen = |p: Vec2| (Vec2::new(-p.x, p.y) + shake) * scale;

    // Dock
    let dock = to_screen(snap.dock.pos);
    let dock_color = if snap.dock.ship_nearby {
        Color::srgb(0.3, 1.0, 0.8)
    } else {
        Color::srgb(0.2, 0.5, 0.45)
    };
    gizmos.circle_2d(dock, snap.dock.radius * scale, dock_color);
    if snap.dock.hold > 0.0 {
        gizmos.circle_2d(dock, snap.dock.radius * scale * snap.dock.hold / 100.0, Color::WHITE);
    }

    for a in &snap.asteroids {
        let c = to_screen(a.pos);
        gizmos.circle_2d(c, a.radius * scale, Color::srgb(0.65, 0.55, 0.5));
        let tick = Vec2::new(-a.spin_angle.sin(), a.spin_angle.cos()) * a.radius * scale;
        gizmos.line_2d(c, c + tick, Color::srgb(0.45, 0.4, 0.35));
    }

    for b in &snap.bullets {
        gizmos.circle_2d(to_screen(*b), 0.4 * scale, Color::srgb(1.0, 1.0, 0.5));
    }

    for d in &snap.drops {
        let c = to_screen(d.pos + Vec2::new(0.0, d.bob));
        gizmos.circle_2d(c, 1.0 * scale, drop_color(d.kind));
    }

    for p in &snap.powerups {
        let c = to_screen(p.pos + Vec2::new(0.0, p.bob));
        gizmos.circle_2d(c, 1.5 * p.pulse * scale, powerup_color(p.kind));
    }

    for p in &snap.particles {
        gizmos.circle_2d(to_screen(p.pos), 0.3 * scale, particle_color(p.kind, p.fade));
    }

    // Ship
    let ship = &snap.ship;
    let origin = to_screen(ship.pos);
    if !ship.alive {
        let arm = 2.5 * scale;
        let red = Color::srgb(1.0, 0.2, 0.2);
        gizmos.line_2d(origin + Vec2::new(-arm, -arm), origin + Vec2::new(arm, arm), red);
        gizmos.line_2d(origin + Vec2::new(-arm, arm), origin + Vec2::new(arm, -arm), red);
        return;
    }

    // blink while invulnerable
    if ship.invuln_ms > 0 && (now / 100) % 2 == 0 {
        return;
    }
    // roll squashes the hull across its width
    let squash = ship.roll_progress.map_or(ship.tilt.cos(), |p| (p * std::f32::consts::TAU).cos());
    let color = selected.pilot().color();
    let points: Vec<Vec2> = HULL
        .iter()
        .map(|v| to_screen(ship.pos + ship_to_world(Vec2::new(v.x * squash, v.y), ship.angle)))
        .collect();
    for i in 0..points.len() {
        gizmos.line_2d(points[i], points[(i + 1) % points.len()], color);
    }
    if ship.thrusting {
        let tail = to_screen(ship.pos + ship_to_world(Vec2::new(0.0, -3.0), ship.angle));
        gizmos.line_2d(origin, tail, Color::srgb(1.0, 0.5, 0.1));
    }
}
