//! Hull damage from asteroid contact.
//!
//! ## Damage order
//!
//! | Step | Effect |
//! |------|--------|
//! | 1 | Skip when destroyed or `now < invuln_until` |
//! | 2 | Skip when `distance ≥ asteroid radius + ship radius` |
//! | 3 | Shield absorbs `asteroid_contact_damage`; any deficit below 0 carries into hp 1:1 |
//! | 4 | hp ≤ 0 → destroyed (once) |
//! | 5 | Fresh invulnerability window, knockback along ship − asteroid |

use super::state::ShipState;
use crate::config::GameConfig;
use bevy::log::info;
use bevy::math::Vec2;

/// Result of testing the ship against one asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// No overlap, or the ship is already wrecked.
    Clear,
    /// Overlapping but inside an invulnerability window.
    Guarded,
    /// Took damage and survived.
    Damaged,
    /// This contact brought hp to 0.
    Destroyed,
}

/// Resolve a potential ship–asteroid contact.
pub fn resolve_asteroid_contact(
    ship: &mut ShipState,
    asteroid_pos: Vec2,
    asteroid_radius: f32,
    now_ms: u64,
    config: &GameConfig,
) -> ContactOutcome {
    if !ship.alive {
        return ContactOutcome::Clear;
    }
    if ship.pos.distance(asteroid_pos) >= asteroid_radius + config.ship_radius {
        return ContactOutcome::Clear;
    }
    if ship.is_invulnerable(now_ms) {
        return ContactOutcome::Guarded;
    }

    absorb_damage(ship, config.asteroid_contact_damage);
    ship.invuln_until = now_ms + config.hit_invuln_ms;
    let push = (ship.pos - asteroid_pos).normalize_or_zero();
    ship.vel += push * config.hit_knockback;

    if ship.hp <= 0.0 {
        ship.hp = 0.0;
        ship.alive = false;
        ship.thrusting = false;
        ship.roll.active = false;
        info!("Ship destroyed at ({:.1}, {:.1})", ship.pos.x, ship.pos.y);
        ContactOutcome::Destroyed
    } else {
        ContactOutcome::Damaged
    }
}

/// Shield first, then hull.  Both end non-negative.
pub fn absorb_damage(ship: &mut ShipState, amount: f32) {
    ship.shield -= amount;
    if ship.shield < 0.0 {
        ship.hp += ship.shield;
        ship.shield = 0.0;
    }
    ship.hp = ship.hp.max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship_with(hp: f32, shield: f32) -> (ShipState, GameConfig) {
        let config = GameConfig::default();
        let mut ship = ShipState::new(&config);
        ship.hp = hp;
        ship.shield = shield;
        (ship, config)
    }

    #[test]
    fn shield_absorbs_before_hull() {
        let (mut ship, config) = ship_with(100.0, 40.0);
        let out = resolve_asteroid_contact(&mut ship, Vec2::new(3.0, 0.0), 5.0, 1000, &config);
        assert_eq!(out, ContactOutcome::Damaged);
        assert_eq!(ship.shield, 15.0);
        assert_eq!(ship.hp, 100.0);
    }

    #[test]
    fn shield_deficit_carries_into_hull() {
        let (mut ship, config) = ship_with(100.0, 10.0);
        resolve_asteroid_contact(&mut ship, Vec2::new(3.0, 0.0), 5.0, 1000, &config);
        assert_eq!(ship.shield, 0.0);
        assert_eq!(ship.hp, 85.0);
    }

    #[test]
    fn contact_grants_invulnerability_and_knockback() {
        let (mut ship, config) = ship_with(100.0, 40.0);
        resolve_asteroid_contact(&mut ship, Vec2::new(3.0, 0.0), 5.0, 1000, &config);
        assert_eq!(ship.invuln_until, 2500);
        assert_eq!(ship.vel, Vec2::new(-50.0, 0.0), "pushed away from the asteroid");
    }

    #[test]
    fn invulnerable_ship_takes_nothing() {
        let (mut ship, config) = ship_with(100.0, 40.0);
        ship.invuln_until = 5000;
        let out = resolve_asteroid_contact(&mut ship, Vec2::new(1.0, 0.0), 5.0, 1000, &config);
        assert_eq!(out, ContactOutcome::Guarded);
        assert_eq!((ship.hp, ship.shield), (100.0, 40.0));
        assert_eq!(ship.vel, Vec2::ZERO, "no knockback while guarded");
    }

    #[test]
    fn distant_asteroid_is_clear() {
        let (mut ship, config) = ship_with(100.0, 40.0);
        // radius 5 + ship 2.5 = 7.5; exactly touching does not count
        let out = resolve_asteroid_contact(&mut ship, Vec2::new(7.5, 0.0), 5.0, 0, &config);
        assert_eq!(out, ContactOutcome::Clear);
    }

    #[test]
    fn lethal_contact_destroys_once_and_clamps_hp() {
        let (mut ship, config) = ship_with(10.0, 0.0);
        let out = resolve_asteroid_contact(&mut ship, Vec2::new(1.0, 1.0), 5.0, 0, &config);
        assert_eq!(out, ContactOutcome::Destroyed);
        assert!(!ship.alive);
        assert_eq!(ship.hp, 0.0);
        let again = resolve_asteroid_contact(&mut ship, Vec2::new(1.0, 1.0), 5.0, 10_000, &config);
        assert_eq!(again, ContactOutcome::Clear, "wrecks take no further hits");
        assert!(!ship.alive);
    }

    #[test]
    fn exact_zero_hp_is_destroyed() {
        let (mut ship, config) = ship_with(25.0, 0.0);
        let out = resolve_asteroid_contact(&mut ship, Vec2::ZERO, 5.0, 0, &config);
        assert_eq!(out, ContactOutcome::Destroyed);
    }
}
