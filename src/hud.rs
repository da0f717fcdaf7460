//! Read-only views of the simulation.
//!
//! | View | Consumer |
//! |------|----------|
//! | [`Hud`] | Status overlay (serialisable, flat numbers and strings) |
//! | [`RenderSnapshot`] | Renderer: positions plus cosmetic animation phases |
//!
//! Both are rebuilt from scratch each frame and never write back.

use crate::config::GameConfig;
use crate::economy::{ship_near_dock, Cargo};
use crate::entities::{ParticleKind, PowerUpKind, ResourceKind};
use crate::simulation::SimState;
use bevy::math::{Vec2, Vec3};
use serde::Serialize;

pub const STATUS_READY: &str = "READY PILOT. SECURE THE CARGO.";
pub const STATUS_WRECKED: &str = "CRITICAL FAILURE. REBOOT REQUIRED.";

// ── HUD ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Hud {
    pub wave: u32,
    pub hp: u32,
    pub shield: u32,
    pub carried: Cargo,
    pub banked: Cargo,
    pub multiplier: u32,
    pub dock_nearby: bool,
    /// Dock charge, `0..=100`.
    pub dock_hold: f32,
    pub alive: bool,
    pub invuln_ms: u64,
    /// Resource drops currently floating in the field.
    pub drops_count: usize,
    pub status: &'static str,
}

impl Hud {
    pub fn capture(state: &SimState, config: &GameConfig, now_ms: u64) -> Self {
        let ship = &state.ship;
        Self {
            wave: state.wave,
            hp: ship.hp.max(0.0).floor() as u32,
            shield: ship.shield.max(0.0).floor() as u32,
            carried: state.economy.carried,
            banked: state.economy.banked,
            multiplier: state.economy.multiplier.value(),
            dock_nearby: ship_near_dock(state, config),
            dock_hold: state.economy.dock_hold,
            alive: ship.alive,
            invuln_ms: ship.invuln_remaining_ms(now_ms),
            drops_count: state.pools.pickups.len(),
            status: if ship.alive { STATUS_READY } else { STATUS_WRECKED },
        }
    }
}

// ── Render snapshot ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ShipView {
    pub pos: Vec2,
    pub angle: f32,
    pub tilt: f32,
    pub alive: bool,
    pub thrusting: bool,
    pub invuln_ms: u64,
    /// `Some(0..1)` while a roll is in progress.
    pub roll_progress: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidView {
    pub pos: Vec2,
    pub radius: f32,
    pub spin_axis: Vec3,
    pub spin_angle: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropView {
    pub pos: Vec2,
    pub kind: ResourceKind,
    /// Vertical bob offset.
    pub bob: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub bob: f32,
    /// Scale pulse around 1.0.
    pub pulse: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleView {
    pub pos: Vec2,
    pub kind: ParticleKind,
    pub fade: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DockView {
    pub pos: Vec2,
    pub radius: f32,
    pub hold: f32,
    pub ship_nearby: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub ship: ShipView,
    pub asteroids: Vec<AsteroidView>,
    pub bullets: Vec<Vec2>,
    pub drops: Vec<DropView>,
    pub powerups: Vec<PowerUpView>,
    pub particles: Vec<ParticleView>,
    pub dock: DockView,
    pub camera_shake: f32,
}

/// `sin(now × rate)`, computed in f64 so long sessions keep their precision.
fn phase(now_ms: u64, rate: f64) -> f32 {
    (now_ms as f64 * rate).sin() as f32
}

impl RenderSnapshot {
    pub fn capture(state: &SimState, config: &GameConfig, now_ms: u64) -> Self {
        let ship = &state.ship;
        let pools = &state.pools;
        let drop_bob = phase(now_ms, 0.005) * 0.5;
        let powerup_bob = phase(now_ms, 0.008) * 0.8 + 1.0;
        let pulse = 1.0 + phase(now_ms, 0.01) * 0.1;

        Self {
            ship: ShipView {
                pos: ship.pos,
                angle: ship.angle,
                tilt: ship.tilt,
                alive: ship.alive,
                thrusting: ship.thrusting,
                invuln_ms: ship.invuln_remaining_ms(now_ms),
                roll_progress: ship.roll.progress(now_ms),
            },
            asteroids: pools
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    pos: a.pos,
                    radius: a.radius,
                    spin_axis: a.spin_axis,
                    spin_angle: a.spin_angle,
                })
                .collect(),
            bullets: pools.bullets.iter().map(|b| b.pos).collect(),
            drops: pools
                .pickups
                .iter()
                .map(|p| DropView {
                    pos: p.pos,
                    kind: p.kind,
                    bob: drop_bob,
                })
                .collect(),
            powerups: pools
                .powerups
                .iter()
                .map(|p| PowerUpView {
                    pos: p.pos,
                    kind: p.kind,
                    bob: powerup_bob,
                    pulse,
                })
                .collect(),
            particles: pools
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    kind: p.kind,
                    fade: p.fade(),
                })
                .collect(),
            dock: DockView {
                pos: config.dock_position(),
                radius: config.dock_radius,
                hold: state.economy.dock_hold,
                ship_nearby: ship_near_dock(state, config),
            },
            camera_shake: state.camera_shake,
        }
    }
}
