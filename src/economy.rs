//! Cargo economy and power-ups.
//!
//! ## Flow
//!
//! 1. Destroyed asteroids leave resource drops (see [`crate::collision`]).
//! 2. [`collect_pickups`] drifts every drop, sweeps expired ones, and credits
//!    `carried[kind]` by the *current multiplier* when the ship flies through.
//! 3. [`collect_powerups`] applies X2 / X4 / SHIELD on contact.
//! 4. [`update_dock`] charges `dock_hold` while the dock action is held in
//!    range and drains it (faster) otherwise; a full charge banks all carried
//!    cargo in one step.
//! 5. [`expire_multiplier`] drops the multiplier back to ×1 once its timer passes.
//!
//! Carried cargo is at risk; banked cargo survives resets.

use crate::config::GameConfig;
use crate::constants::{COLLECT_BURST_COUNT, COLLECT_BURST_LIFE, COLLECT_BURST_SPEED, DOCK_HOLD_MAX};
use crate::entities::{Particle, ParticleKind, PowerUpKind, ResourceKind};
use crate::rng::RandomSource;
use crate::simulation::SimState;
use bevy::log::{debug, info};
use bevy::math::Vec2;
use serde::Serialize;

// ── Cargo ─────────────────────────────────────────────────────────────────────

/// Per-type resource counts.  All three types are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Cargo {
    pub coin: u32,
    pub gorboy: u32,
    pub crystal: u32,
}

impl Cargo {
    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Coin => self.coin,
            ResourceKind::Gorboy => self.gorboy,
            ResourceKind::Crystal => self.crystal,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        let slot = match kind {
            ResourceKind::Coin => &mut self.coin,
            ResourceKind::Gorboy => &mut self.gorboy,
            ResourceKind::Crystal => &mut self.crystal,
        };
        *slot = slot.saturating_add(amount);
    }

    /// Add every count of `other` into `self`.
    pub fn absorb(&mut self, other: Cargo) {
        for kind in ResourceKind::ALL {
            self.add(kind, other.get(kind));
        }
    }

    /// Empty this cargo and return what it held.
    pub fn take(&mut self) -> Cargo {
        std::mem::take(self)
    }

    pub fn total(&self) -> u32 {
        self.coin + self.gorboy + self.crystal
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

// ── Multiplier ────────────────────────────────────────────────────────────────

/// Pickup multiplier: ×1, ×2 or ×4, with an absolute expiry.
///
/// A new multiplier power-up replaces the current one outright (value and
/// timer); there is no stacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiplier {
    value: u32,
    /// Absolute expiry (ms); `None` while inactive.
    until: Option<u64>,
}

impl Default for Multiplier {
    fn default() -> Self {
        Self { value: 1, until: None }
    }
}

impl Multiplier {
    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    #[inline]
    pub fn expires_at(&self) -> Option<u64> {
        self.until
    }

    /// Replace the current multiplier.  Values other than 2 and 4 clamp to 1.
    pub fn activate(&mut self, value: u32, now_ms: u64, duration_ms: u64) {
        match value {
            2 | 4 => {
                self.value = value;
                self.until = Some(now_ms + duration_ms);
            }
            _ => *self = Self::default(),
        }
    }

    /// Reset to ×1 once `now` has passed the expiry.  Returns whether it expired.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.until {
            Some(until) if now_ms > until => {
                *self = Self::default();
                true
            }
            _ => false,
        }
    }
}

// ── Economy ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Economy {
    pub carried: Cargo,
    pub banked: Cargo,
    pub multiplier: Multiplier,
    /// Dock charge in `[0, 100]`.
    pub dock_hold: f32,
}

impl Economy {
    /// Move every carried resource into the bank and zero the dock charge.
    pub fn bank_all(&mut self) -> Cargo {
        let moved = self.carried.take();
        self.banked.absorb(moved);
        self.dock_hold = 0.0;
        moved
    }
}

// ── Per-tick passes ───────────────────────────────────────────────────────────

/// Drift resource drops, sweep expired ones, collect the ones under the ship.
///
/// Expired drops are removed even when the ship is on top of them.  Returns
/// the number of drops collected this tick.
pub fn collect_pickups(state: &mut SimState, config: &GameConfig, dt: f32, now_ms: u64) -> u32 {
    let SimState {
        ship,
        pools,
        economy,
        ..
    } = state;
    let mut collected = 0;

    for i in 0..pools.pickups.len() {
        let Some(pickup) = pools.pickups.get_mut(i) else {
            continue;
        };
        pickup.pos += pickup.vel * dt;
        let (pos, kind, despawn_at) = (pickup.pos, pickup.kind, pickup.despawn_at);

        if now_ms > despawn_at {
            pools.pickups.mark(i);
        } else if ship.alive && ship.pos.distance(pos) < config.pickup_collect_radius {
            economy.carried.add(kind, economy.multiplier.value());
            pools.pickups.mark(i);
            collected += 1;
        }
    }
    collected
}

/// Drift power-ups, sweep expired ones, apply the ones under the ship.
///
/// Returns the kinds collected this tick.
pub fn collect_powerups(
    state: &mut SimState,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
    dt: f32,
    now_ms: u64,
) -> Vec<PowerUpKind> {
    let SimState {
        ship,
        pools,
        economy,
        ..
    } = state;
    let mut collected = Vec::new();

    for i in 0..pools.powerups.len() {
        let Some(powerup) = pools.powerups.get_mut(i) else {
            continue;
        };
        powerup.pos += powerup.vel * dt;
        let (pos, kind, despawn_at) = (powerup.pos, powerup.kind, powerup.despawn_at);

        if now_ms > despawn_at {
            pools.powerups.mark(i);
            continue;
        }
        if !ship.alive || ship.pos.distance(pos) >= config.powerup_collect_radius {
            continue;
        }

        match kind {
            PowerUpKind::X2 => economy.multiplier.activate(2, now_ms, config.x2_duration_ms),
            PowerUpKind::X4 => economy.multiplier.activate(4, now_ms, config.x4_duration_ms),
            PowerUpKind::Shield => {
                ship.shield = (ship.shield + config.shield_pickup_amount).min(config.ship_max_shield);
                ship.grant_invulnerability(now_ms, config.shield_pickup_invuln_ms);
            }
        }
        debug!("Power-up {:?} collected", kind);

        for _ in 0..COLLECT_BURST_COUNT {
            let vel = Vec2::new(
                rng.symmetric(COLLECT_BURST_SPEED),
                rng.symmetric(COLLECT_BURST_SPEED),
            );
            pools
                .particles
                .spawn(Particle::new(pos, vel, COLLECT_BURST_LIFE, ParticleKind::Collect));
        }
        pools.powerups.mark(i);
        collected.push(kind);
    }
    collected
}

/// Is the ship inside the dock's interaction radius?
pub fn ship_near_dock(state: &SimState, config: &GameConfig) -> bool {
    state.ship.pos.distance(config.dock_position()) < config.dock_radius
}

/// Charge or drain the dock hold; bank everything when it fills.
///
/// Returns the cargo moved into the bank when a transaction completes.
pub fn update_dock(state: &mut SimState, config: &GameConfig, dock_held: bool, dt: f32) -> Option<Cargo> {
    let charging = dock_held && state.ship.alive && ship_near_dock(state, config);
    let economy = &mut state.economy;

    if !charging {
        economy.dock_hold = (economy.dock_hold - dt * config.dock_drain_rate).max(0.0);
        return None;
    }

    economy.dock_hold = (economy.dock_hold + dt * config.dock_charge_rate).min(DOCK_HOLD_MAX);
    if economy.dock_hold < DOCK_HOLD_MAX {
        return None;
    }
    let moved = economy.bank_all();
    info!(
        "Banked cargo: {} coin, {} gorboy, {} crystal",
        moved.coin, moved.gorboy, moved.crystal
    );
    Some(moved)
}

/// Drop the multiplier back to ×1 once its timer has passed.
pub fn expire_multiplier(economy: &mut Economy, now_ms: u64) -> bool {
    economy.multiplier.expire(now_ms)
}
