//! Bullet/asteroid and ship/asteroid resolution.
//!
//! One pass per tick, after everything has moved:
//!
//! - every live bullet inside an asteroid's radius deals `bullet_damage` and
//!   is consumed;
//! - an asteroid whose hp falls to ≤ 0 is wrecked: debris burst, one resource
//!   drop, and (for big rocks) a chance at a power-up;
//! - every asteroid, wrecked this pass or not, is then tested against the
//!   ship hull.
//!
//! Removals are only marked here; the tick compacts the pools afterwards, so
//! a bullet consumed by one asteroid is never seen by the next one.

use crate::config::GameConfig;
use crate::constants::{DEBRIS_COUNT, DEBRIS_LIFE, DEBRIS_SPEED};
use crate::entities::{Particle, ParticleKind, Pickup, Pool, PowerUp, PowerUpKind, ResourceKind};
use crate::rng::RandomSource;
use crate::ship::{resolve_asteroid_contact, ContactOutcome};
use crate::simulation::SimState;
use bevy::math::Vec2;

/// What one resolver pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub bullet_hits: u32,
    pub asteroids_destroyed: u32,
    /// The ship took damage from at least one asteroid.
    pub ship_hit: bool,
    /// The ship was destroyed during this pass.
    pub ship_destroyed: bool,
}

/// Resolve every bullet and ship overlap for this tick.
pub fn resolve_collisions(
    state: &mut SimState,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
    now_ms: u64,
) -> CollisionReport {
    let SimState {
        ship,
        pools,
        camera_shake,
        ..
    } = state;
    let mut report = CollisionReport::default();

    for ai in 0..pools.asteroids.len() {
        if pools.asteroids.is_marked(ai) {
            continue;
        }

        let mut wrecked = false;
        for bi in 0..pools.bullets.len() {
            if pools.bullets.is_marked(bi) {
                continue;
            }
            let Some(bullet_pos) = pools.bullets.get(bi).map(|b| b.pos) else {
                continue;
            };
            let Some(asteroid) = pools.asteroids.get_mut(ai) else {
                break;
            };
            if asteroid.pos.distance(bullet_pos) >= asteroid.radius {
                continue;
            }

            asteroid.hp -= config.bullet_damage;
            pools.bullets.mark(bi);
            *camera_shake = config.shake_bullet_hit;
            report.bullet_hits += 1;

            if asteroid.hp <= 0.0 {
                wrecked = true;
                break;
            }
        }

        let Some((pos, radius)) = pools.asteroids.get(ai).map(|a| (a.pos, a.radius)) else {
            continue;
        };

        if wrecked {
            pools.asteroids.mark(ai);
            report.asteroids_destroyed += 1;
            scatter_wreckage(
                pos,
                radius,
                config,
                rng,
                now_ms,
                &mut pools.pickups,
                &mut pools.powerups,
                &mut pools.particles,
            );
        }

        match resolve_asteroid_contact(ship, pos, radius, now_ms, config) {
            ContactOutcome::Damaged => {
                *camera_shake = config.shake_ship_hit;
                report.ship_hit = true;
            }
            ContactOutcome::Destroyed => {
                *camera_shake = config.shake_ship_hit;
                report.ship_hit = true;
                report.ship_destroyed = true;
            }
            ContactOutcome::Clear | ContactOutcome::Guarded => {}
        }
    }

    report
}

/// Leave behind what a wrecked asteroid drops.
///
/// Draw order: drop-type roll, drop drift, power-up chance (big rocks only),
/// power-up kind / jitter / drift, then the debris burst.
#[allow(clippy::too_many_arguments)]
fn scatter_wreckage(
    pos: Vec2,
    radius: f32,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
    now_ms: u64,
    pickups: &mut Pool<Pickup>,
    powerups: &mut Pool<PowerUp>,
    particles: &mut Pool<Particle>,
) {
    let kind = ResourceKind::from_roll(rng.unit(), config.drop_roll_coin, config.drop_roll_gorboy);
    pickups.spawn(Pickup {
        pos,
        vel: Vec2::new(rng.symmetric(config.pickup_drift), rng.symmetric(config.pickup_drift)),
        kind,
        despawn_at: now_ms + config.pickup_lifetime_ms,
    });

    if radius > config.powerup_min_source_radius && rng.chance(config.powerup_drop_chance) {
        let kind = PowerUpKind::ALL[rng.index(PowerUpKind::ALL.len())];
        let jitter = Vec2::new(rng.symmetric(config.powerup_jitter), rng.symmetric(config.powerup_jitter));
        powerups.spawn(PowerUp {
            pos: pos + jitter,
            vel: Vec2::new(rng.symmetric(config.powerup_drift), rng.symmetric(config.powerup_drift)),
            kind,
            despawn_at: now_ms + config.powerup_lifetime_ms,
        });
    }

    for _ in 0..DEBRIS_COUNT {
        let vel = Vec2::new(rng.symmetric(DEBRIS_SPEED), rng.symmetric(DEBRIS_SPEED));
        particles.spawn(Particle::new(pos, vel, DEBRIS_LIFE, ParticleKind::Debris));
    }
}
