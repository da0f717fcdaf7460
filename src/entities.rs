//! Entity pools: bullets, asteroids, resource drops, power-ups, particles.
//!
//! Every pool is a [`Pool<T>`]: a dense `Vec` plus a parallel removal mask.
//! Systems never splice while iterating.  They [`Pool::mark`] doomed slots
//! during a pass and the tick calls [`Pool::compact`] once the pass is done,
//! so several bullets destroying several asteroids in the same tick can never
//! skip or double-visit an element.

use crate::math::wrap_position;
use bevy::math::{Vec2, Vec3};
use serde::Serialize;
use std::f32::consts::TAU;

// ── Pool ──────────────────────────────────────────────────────────────────────

/// Dense entity storage with deferred removal.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
    doomed: Vec<bool>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            doomed: Vec::new(),
        }
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, item: T) {
        self.items.push(item);
        self.doomed.push(false);
    }

    /// Schedule slot `index` for removal at the next [`Pool::compact`].
    pub fn mark(&mut self, index: usize) {
        if let Some(flag) = self.doomed.get_mut(index) {
            *flag = true;
        }
    }

    #[inline]
    pub fn is_marked(&self, index: usize) -> bool {
        self.doomed.get(index).copied().unwrap_or(false)
    }

    /// Mark every item for which `doomed` returns `true`.
    pub fn mark_where(&mut self, mut doomed: impl FnMut(&T) -> bool) {
        for (item, flag) in self.items.iter().zip(self.doomed.iter_mut()) {
            if doomed(item) {
                *flag = true;
            }
        }
    }

    /// Drop every marked slot, preserving the order of the survivors.
    /// Returns the number of removed items.
    pub fn compact(&mut self) -> usize {
        let before = self.items.len();
        let mut flags = self.doomed.iter();
        self.items
            .retain(|_| !flags.next().copied().unwrap_or(false));
        self.doomed.clear();
        self.doomed.resize(self.items.len(), false);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.doomed.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

// ── Kinds ─────────────────────────────────────────────────────────────────────

/// Resource types carried and banked by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    Coin,
    Gorboy,
    Crystal,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Coin, ResourceKind::Gorboy, ResourceKind::Crystal];

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Coin => "COIN",
            ResourceKind::Gorboy => "GORBOY",
            ResourceKind::Crystal => "CRYSTAL",
        }
    }

    /// Weighted drop-table lookup for a uniform `roll ∈ [0, 1)`.
    ///
    /// `roll < coin_cut` → Coin, `roll < gorboy_cut` → Gorboy, otherwise Crystal.
    pub fn from_roll(roll: f32, coin_cut: f32, gorboy_cut: f32) -> Self {
        if roll < coin_cut {
            ResourceKind::Coin
        } else if roll < gorboy_cut {
            ResourceKind::Gorboy
        } else {
            ResourceKind::Crystal
        }
    }
}

/// Power-up effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PowerUpKind {
    X2,
    X4,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::X2, PowerUpKind::X4, PowerUpKind::Shield];
}

/// What spawned a particle; the renderer picks colour and size from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Exhaust,
    RollTrail,
    Debris,
    Collect,
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left before the bullet fizzles.
    pub life: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Only ever decreases; the asteroid is removed once it reaches ≤ 0.
    pub hp: f32,
    /// Cosmetic tumble axis (unit length) for the renderer.
    pub spin_axis: Vec3,
    /// Cosmetic tumble rate (rad/s).
    pub spin_rate: f32,
    /// Accumulated tumble angle (rad).
    pub spin_angle: f32,
}

/// Resource drop left behind by a destroyed asteroid.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ResourceKind,
    /// Absolute expiry (ms); swept once `now > despawn_at`.
    pub despawn_at: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerUpKind,
    pub despawn_at: u64,
}

/// Cosmetic particle.  Not authoritative; the core only decides when and
/// where they appear.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life: f32, kind: ParticleKind) -> Self {
        Self {
            pos,
            vel,
            life,
            max_life: life,
            kind,
        }
    }

    /// Remaining-life fraction: 1.0 at birth, 0.0 at expiry.
    #[inline]
    pub fn fade(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// All entity pools, in the order the tick visits them.
#[derive(Debug, Clone, Default)]
pub struct Pools {
    pub bullets: Pool<Bullet>,
    pub asteroids: Pool<Asteroid>,
    pub pickups: Pool<Pickup>,
    pub powerups: Pool<PowerUp>,
    pub particles: Pool<Particle>,
}

impl Pools {
    /// Move bullets, asteroids and particles; count lives down and mark the
    /// expired.  Asteroids wrap at `asteroid_bounds`.
    ///
    /// Drops drift inside the economy pass, next to their collection test.
    pub fn age(&mut self, dt: f32, asteroid_bounds: f32) {
        for b in self.bullets.iter_mut() {
            b.life -= dt;
            b.pos += b.vel * dt;
        }
        self.bullets.mark_where(|b| b.life <= 0.0);

        for p in self.particles.iter_mut() {
            p.life -= dt;
            p.pos += p.vel * dt;
        }
        self.particles.mark_where(|p| p.life <= 0.0);

        for a in self.asteroids.iter_mut() {
            a.pos = wrap_position(a.pos + a.vel * dt, asteroid_bounds);
            a.spin_angle = (a.spin_angle + a.spin_rate * dt).rem_euclid(TAU);
        }
    }

    pub fn compact_all(&mut self) {
        self.bullets.compact();
        self.asteroids.compact();
        self.pickups.compact();
        self.powerups.compact();
        self.particles.compact();
    }
}
