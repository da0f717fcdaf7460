//! Wave director.
//!
//! A wave is cleared when the asteroid pool is empty while the ship is alive;
//! the next one is spawned immediately.  Wave `N` holds
//! `wave_base_count + wave_count_per_wave × N` asteroids placed on a ring
//! around the origin so nothing spawns on top of a freshly reset ship.

use crate::advisory::AdvisoryRequest;
use crate::config::GameConfig;
use crate::entities::Asteroid;
use crate::rng::RandomSource;
use crate::simulation::SimState;
use bevy::log::info;
use bevy::math::{Vec2, Vec3};
use std::f32::consts::TAU;

/// Replace the asteroid field with wave `wave`.
///
/// Returns the advisory request for the new wave; the caller decides where it
/// goes.
pub fn spawn_wave(
    state: &mut SimState,
    wave: u32,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
    pilot: &str,
) -> AdvisoryRequest {
    state.wave = wave;
    state.pools.asteroids.clear();

    let count = config.wave_size(wave);
    for _ in 0..count {
        state.pools.asteroids.spawn(roll_asteroid(config, rng));
    }
    info!("Wave {} spawned: {} asteroids", wave, count);

    AdvisoryRequest {
        wave,
        hull_percent: state.ship.hull_percent(config),
        pilot: pilot.to_string(),
    }
}

/// One randomly placed asteroid on the spawn ring.
pub fn roll_asteroid(config: &GameConfig, rng: &mut dyn RandomSource) -> Asteroid {
    let radius = rng.range(config.asteroid_min_radius, config.asteroid_max_radius);
    let bearing = rng.range(0.0, TAU);
    let distance = rng.range(config.spawn_ring_min, config.spawn_ring_max);
    let vel = Vec2::new(
        rng.symmetric(config.asteroid_speed_range),
        rng.symmetric(config.asteroid_speed_range),
    );
    let spin_axis = Vec3::new(rng.symmetric(1.0), rng.symmetric(1.0), rng.symmetric(1.0))
        .try_normalize()
        .unwrap_or(Vec3::Z);

    Asteroid {
        pos: Vec2::new(bearing.cos(), bearing.sin()) * distance,
        vel,
        radius,
        hp: radius * config.asteroid_hp_per_radius,
        spin_axis,
        spin_rate: rng.symmetric(config.asteroid_spin_range),
        spin_angle: 0.0,
    }
}

/// Field is empty and someone is alive to see it.
pub fn wave_cleared(state: &SimState) -> bool {
    state.pools.asteroids.is_empty() && state.ship.alive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{seeded, SequenceRng};

    #[test]
    fn wave_sizes_grow_by_four() {
        let config = GameConfig::default();
        let mut state = SimState::new(&config);
        let mut rng = seeded(7);
        for (wave, expected) in [(1, 10), (2, 14), (5, 26)] {
            spawn_wave(&mut state, wave, &config, &mut rng, "Null Pilot");
            assert_eq!(state.pools.asteroids.len(), expected);
            assert_eq!(state.wave, wave);
        }
    }

    #[test]
    fn asteroids_respect_radius_hp_and_ring() {
        let config = GameConfig::default();
        let mut rng = seeded(42);
        for _ in 0..200 {
            let a = roll_asteroid(&config, &mut rng);
            assert!((2.5..=7.5).contains(&a.radius));
            assert!((a.hp - a.radius * 25.0).abs() < 1e-4);
            let d = a.pos.length();
            assert!((60.0 - 1e-3..=120.0 + 1e-3).contains(&d), "ring distance {d}");
            assert!(a.vel.x.abs() <= 6.0 && a.vel.y.abs() <= 6.0);
            assert!((a.spin_axis.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn degenerate_spin_axis_falls_back_to_z() {
        // every draw 0.5 → symmetric() yields 0 for the axis components
        let config = GameConfig::default();
        let a = roll_asteroid(&config, &mut SequenceRng::constant(0.5));
        assert_eq!(a.spin_axis, Vec3::Z);
        assert_eq!(a.radius, 5.0);
        assert_eq!(a.hp, 125.0);
    }

    #[test]
    fn request_carries_wave_hull_and_pilot() {
        let config = GameConfig::default();
        let mut state = SimState::new(&config);
        state.ship.hp = 42.7;
        let req = spawn_wave(&mut state, 3, &config, &mut seeded(1), "Dock Whisperer");
        assert_eq!(req.wave, 3);
        assert_eq!(req.hull_percent, 42);
        assert_eq!(req.pilot, "Dock Whisperer");
    }

    #[test]
    fn cleared_only_while_alive() {
        let config = GameConfig::default();
        let mut state = SimState::new(&config);
        assert!(wave_cleared(&state));
        state.ship.alive = false;
        assert!(!wave_cleared(&state));
    }
}
