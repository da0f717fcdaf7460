//! Ship state.
//!
//! Systems that mutate this state live in the sibling modules:
//! - [`super::control`]: turn, roll, thrust, brake, drift, firing
//! - [`super::combat`]: asteroid contact damage

use crate::config::GameConfig;
use crate::input::TurnSide;
use crate::math::ease_out_cubic;
use bevy::math::Vec2;

/// Roll/dash maneuver state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollState {
    pub active: bool,
    pub side: TurnSide,
    /// Absolute start time (ms).
    pub started_at: u64,
    pub duration_ms: u64,
}

impl RollState {
    pub fn idle(duration_ms: u64) -> Self {
        Self {
            active: false,
            side: TurnSide::Left,
            started_at: 0,
            duration_ms,
        }
    }

    /// `+1` for a left roll, `-1` for a right roll.
    #[inline]
    pub fn direction(&self) -> f32 {
        self.side.sign()
    }

    /// Linear progress in `[0, 1]`; `None` while idle.
    pub fn progress(&self, now_ms: u64) -> Option<f32> {
        if !self.active {
            return None;
        }
        if self.duration_ms == 0 {
            return Some(1.0);
        }
        let elapsed = now_ms.saturating_sub(self.started_at) as f32;
        Some((elapsed / self.duration_ms as f32).min(1.0))
    }

    /// Eased spin angle for the current progress (full turn over the roll).
    pub fn spin(&self, now_ms: u64) -> f32 {
        self.progress(now_ms)
            .map(|p| std::f32::consts::TAU * self.direction() * ease_out_cubic(p))
            .unwrap_or(0.0)
    }
}

/// Authoritative ship state.
///
/// `alive` flips to `false` exactly once when `hp` first reaches 0 and only
/// [`ShipState::respawn`] sets it back.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipState {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading (rad); forward is `(sin a, cos a)`.
    pub angle: f32,
    /// Angular velocity (rad/s).
    pub angvel: f32,
    /// Visual bank angle; driven by the roll animation while rolling.
    pub tilt: f32,
    pub hp: f32,
    pub shield: f32,
    pub alive: bool,
    /// Absolute end of the invulnerability window (ms).
    pub invuln_until: u64,
    pub roll: RollState,
    /// Absolute time of the last shot (ms).
    pub last_shot_at: Option<u64>,
    /// Thrust was applied this tick (render hint).
    pub thrusting: bool,
}

impl ShipState {
    /// Fresh ship for a new session: origin, full hull, starting shield.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: 0.0,
            angvel: 0.0,
            tilt: 0.0,
            hp: config.ship_max_hp,
            shield: config.ship_start_shield,
            alive: true,
            invuln_until: 0,
            roll: RollState::idle(config.roll_duration_ms),
            last_shot_at: None,
            thrusting: false,
        }
    }

    /// Rebuild the ship in place for a restart, with a spawn-protection window.
    pub fn respawn(&mut self, config: &GameConfig, now_ms: u64) {
        *self = Self::new(config);
        self.invuln_until = now_ms + config.respawn_invuln_ms;
    }

    #[inline]
    pub fn is_invulnerable(&self, now_ms: u64) -> bool {
        now_ms < self.invuln_until
    }

    #[inline]
    pub fn invuln_remaining_ms(&self, now_ms: u64) -> u64 {
        self.invuln_until.saturating_sub(now_ms)
    }

    /// Extend (never shorten) invulnerability to at least `now + ms`.
    pub fn grant_invulnerability(&mut self, now_ms: u64, ms: u64) {
        self.invuln_until = self.invuln_until.max(now_ms + ms);
    }

    /// Hull as a whole percentage of max hp, floored.
    pub fn hull_percent(&self, config: &GameConfig) -> u32 {
        ((self.hp.max(0.0) / config.ship_max_hp) * 100.0).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ship_starts_at_origin_with_start_shield() {
        let config = GameConfig::default();
        let ship = ShipState::new(&config);
        assert_eq!(ship.pos, Vec2::ZERO);
        assert_eq!(ship.hp, 100.0);
        assert_eq!(ship.shield, 40.0);
        assert!(ship.alive);
        assert!(!ship.is_invulnerable(0));
    }

    #[test]
    fn respawn_grants_spawn_protection() {
        let config = GameConfig::default();
        let mut ship = ShipState::new(&config);
        ship.alive = false;
        ship.hp = 0.0;
        ship.pos = Vec2::new(40.0, -12.0);
        ship.respawn(&config, 5000);
        assert!(ship.alive);
        assert_eq!(ship.pos, Vec2::ZERO);
        assert_eq!(ship.invuln_until, 7000);
        assert!(ship.is_invulnerable(6999));
        assert!(!ship.is_invulnerable(7000));
    }

    #[test]
    fn grant_invulnerability_never_shortens() {
        let mut ship = ShipState::new(&GameConfig::default());
        ship.invuln_until = 10_000;
        ship.grant_invulnerability(1000, 2000);
        assert_eq!(ship.invuln_until, 10_000);
        ship.grant_invulnerability(9500, 2000);
        assert_eq!(ship.invuln_until, 11_500);
    }

    #[test]
    fn roll_progress_saturates_at_one() {
        let roll = RollState {
            active: true,
            side: TurnSide::Right,
            started_at: 1000,
            duration_ms: 400,
        };
        assert_eq!(roll.progress(1000), Some(0.0));
        assert_eq!(roll.progress(1200), Some(0.5));
        assert_eq!(roll.progress(2000), Some(1.0));
        assert!((roll.spin(1400) + std::f32::consts::TAU).abs() < 1e-5);
        assert_eq!(RollState::idle(400).progress(1000), None);
    }
}
