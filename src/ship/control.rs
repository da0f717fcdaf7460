//! Ship kinematics: intent → motion.
//!
//! ## Pipeline (one call per tick, only while the ship is alive)
//!
//! 1. Roll trigger from a queued double-tap gesture.
//! 2. Angular velocity integrates the turn axis, then decays exponentially.
//! 3. Tilt: eased 360° spin while rolling, otherwise lerp toward a bank
//!    proportional to angular velocity.
//! 4. Thrust along the heading, soft brake, unconditional drag.
//! 5. Integrate position and wrap on the torus.
//! 6. Fire, rate-limited by the shot cooldown.
//!
//! Particle requests (exhaust, roll trail) are pushed straight into the
//! particle pool; the renderer owns how they look.

use super::state::ShipState;
use crate::config::GameConfig;
use crate::constants::{EXHAUST_BEHIND, EXHAUST_LATERAL, EXHAUST_LIFE, EXHAUST_SPEED, ROLL_TRAIL_LIFE};
use crate::entities::{Bullet, Particle, ParticleKind, Pool};
use crate::input::{ControlIntent, TurnSide};
use crate::math::{heading_vector, lateral_vector, lerp, ship_to_world, wrap_position};
use crate::rng::RandomSource;
use bevy::math::Vec2;

/// Apply one tick of control intent to the ship.
///
/// Returns the bullet fired this tick, if any.  A destroyed ship does not
/// move, turn, or fire.
pub fn steer_ship(
    ship: &mut ShipState,
    intent: &ControlIntent,
    dt: f32,
    now_ms: u64,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
    particles: &mut Pool<Particle>,
) -> Option<Bullet> {
    if !ship.alive {
        ship.thrusting = false;
        return None;
    }

    if let Some(side) = intent.roll {
        try_start_roll(ship, side, now_ms, config);
    }

    // ── Turn ──────────────────────────────────────────────────────────────
    ship.angvel += intent.turn_axis() * config.angular_accel * dt;
    ship.angvel -= ship.angvel * config.angular_drag * dt;
    ship.angle += ship.angvel * dt;

    // ── Tilt / roll animation ─────────────────────────────────────────────
    if ship.roll.active {
        advance_roll(ship, now_ms, config, rng, particles);
    } else {
        let target = (ship.angvel * config.tilt_per_angvel).clamp(-config.tilt_max, config.tilt_max);
        ship.tilt = lerp(ship.tilt, target, config.tilt_lerp);
    }

    // ── Linear motion ─────────────────────────────────────────────────────
    ship.thrusting = intent.thrust;
    if intent.thrust {
        ship.vel += heading_vector(ship.angle) * config.thrust_accel * dt;
        if rng.chance(config.exhaust_chance) {
            emit_exhaust(ship, particles);
        }
    }
    if intent.brake {
        ship.vel *= config.brake_factor;
    }
    ship.vel *= config.linear_drag;
    ship.pos = wrap_position(ship.pos + ship.vel * dt, config.ship_bounds);

    // ── Fire ──────────────────────────────────────────────────────────────
    if intent.fire && fire_ready(ship, now_ms, config) {
        ship.last_shot_at = Some(now_ms);
        return Some(Bullet {
            pos: ship.pos,
            vel: ship.vel + heading_vector(ship.angle) * config.bullet_speed,
            life: config.bullet_life,
        });
    }
    None
}

/// Start a roll toward `side` unless one is already running.
///
/// Applies the sideways + forward impulse immediately.  Returns whether the
/// roll started.
pub fn try_start_roll(ship: &mut ShipState, side: TurnSide, now_ms: u64, config: &GameConfig) -> bool {
    if ship.roll.active || !ship.alive {
        return false;
    }
    ship.roll.active = true;
    ship.roll.side = side;
    ship.roll.started_at = now_ms;
    ship.roll.duration_ms = config.roll_duration_ms;

    ship.vel += lateral_vector(ship.angle, side.sign()) * config.roll_side_impulse;
    ship.vel += heading_vector(ship.angle) * config.roll_forward_impulse;
    true
}

fn advance_roll(
    ship: &mut ShipState,
    now_ms: u64,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
    particles: &mut Pool<Particle>,
) {
    let progress = ship.roll.progress(now_ms).unwrap_or(1.0);
    ship.tilt = ship.roll.spin(now_ms);
    if progress >= 1.0 {
        ship.roll.active = false;
        ship.tilt = 0.0;
    }
    ship.grant_invulnerability(now_ms, config.roll_invuln_ms);

    if rng.chance(config.roll_trail_chance) {
        let jitter = Vec2::new(rng.symmetric(1.0), rng.symmetric(1.0));
        particles.spawn(Particle::new(
            ship.pos + jitter,
            Vec2::ZERO,
            ROLL_TRAIL_LIFE,
            ParticleKind::RollTrail,
        ));
    }
}

fn emit_exhaust(ship: &ShipState, particles: &mut Pool<Particle>) {
    let backward = -heading_vector(ship.angle) * EXHAUST_SPEED;
    for lateral in [-EXHAUST_LATERAL, EXHAUST_LATERAL] {
        let nozzle = ship_to_world(Vec2::new(lateral, -EXHAUST_BEHIND), ship.angle);
        particles.spawn(Particle::new(
            ship.pos + nozzle,
            backward,
            EXHAUST_LIFE,
            ParticleKind::Exhaust,
        ));
    }
}

#[inline]
fn fire_ready(ship: &ShipState, now_ms: u64, config: &GameConfig) -> bool {
    ship.last_shot_at
        .map_or(true, |last| now_ms.saturating_sub(last) > config.fire_cooldown_ms)
}
