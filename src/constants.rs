//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig`] mirrors every value below and can override
//! them at startup from `assets/game.toml`.
//!
//! ## Units
//!
//! Distances are world units, speeds are units/s, accelerations units/s².
//! Absolute timestamps and durations that gate state (invulnerability,
//! cooldowns, despawn, multiplier expiry) are **milliseconds**; per-entity
//! lifetimes that count down with `dt` are **seconds**.

// ── Tick ──────────────────────────────────────────────────────────────────────

/// Upper clamp on the per-tick delta (s).
///
/// A backgrounded tab or a long frame hitch would otherwise integrate a huge
/// step and tunnel bullets straight through asteroids.
pub const MAX_TICK_DT: f32 = 0.1;

// ── World Bounds ──────────────────────────────────────────────────────────────

/// Half-extent of the ship's torus (wraps at ±SHIP_BOUNDS on both axes).
pub const SHIP_BOUNDS: f32 = 120.0;

/// Half-extent of the asteroid torus.  Slightly larger than the ship's so
/// asteroids re-enter from just beyond the visible play field.
pub const ASTEROID_BOUNDS: f32 = 150.0;

// ── Ship: Movement ────────────────────────────────────────────────────────────

/// Angular acceleration applied by turn intent (rad/s²).
pub const ANGULAR_ACCEL: f32 = 8.0;

/// Exponential angular drag (1/s).  `va -= va * ANGULAR_DRAG * dt`.
pub const ANGULAR_DRAG: f32 = 3.0;

/// Forward thrust acceleration along the heading (u/s²).
pub const THRUST_ACCEL: f32 = 95.0;

/// Per-tick velocity factor applied while braking.  Soft brake, never a full stop.
pub const BRAKE_FACTOR: f32 = 0.95;

/// Per-tick velocity factor applied unconditionally (space friction).
pub const LINEAR_DRAG: f32 = 0.995;

/// Non-rolling tilt follows `va × TILT_PER_ANGVEL`, clamped to ±TILT_MAX.
pub const TILT_PER_ANGVEL: f32 = 0.15;
pub const TILT_MAX: f32 = 0.6;

/// Lerp factor per tick toward the target tilt.
pub const TILT_LERP: f32 = 0.1;

// ── Ship: Roll / Dash ─────────────────────────────────────────────────────────

/// Maximum gap between two taps of the same turn control for a roll (ms).
pub const DOUBLE_TAP_WINDOW_MS: u64 = 300;

/// Duration of the 360° roll animation (ms).
pub const ROLL_DURATION_MS: u64 = 400;

/// Sideways impulse applied on roll trigger (u/s).
pub const ROLL_SIDE_IMPULSE: f32 = 45.0;

/// Forward impulse applied on roll trigger (u/s).
pub const ROLL_FORWARD_IMPULSE: f32 = 20.0;

/// Invulnerability floor refreshed on every rolling tick (ms).
pub const ROLL_INVULN_MS: u64 = 100;

// ── Ship: Combat ──────────────────────────────────────────────────────────────

/// Minimum interval between consecutive shots (ms).
pub const FIRE_COOLDOWN_MS: u64 = 150;

/// Muzzle speed added to the ship's velocity along the heading (u/s).
pub const BULLET_SPEED: f32 = 150.0;

/// Bullet lifetime (s).
pub const BULLET_LIFE: f32 = 1.2;

/// Damage dealt by one bullet to an asteroid.
pub const BULLET_DAMAGE: f32 = 40.0;

// ── Ship: Health ──────────────────────────────────────────────────────────────

pub const SHIP_MAX_HP: f32 = 100.0;
pub const SHIP_MAX_SHIELD: f32 = 100.0;

/// Shield the ship starts each life with.
pub const SHIP_START_SHIELD: f32 = 40.0;

/// Ship collision radius added to the asteroid radius for the contact test.
pub const SHIP_RADIUS: f32 = 2.5;

/// Damage taken per unguarded asteroid contact.  Shield absorbs first; the
/// deficit carries into hull 1:1.
pub const ASTEROID_CONTACT_DAMAGE: f32 = 25.0;

/// Invulnerability window granted after an asteroid contact (ms).
pub const HIT_INVULN_MS: u64 = 1500;

/// Knockback impulse along the ship-minus-asteroid normal (u/s).
pub const HIT_KNOCKBACK: f32 = 50.0;

/// Invulnerability window granted on reset (ms).
pub const RESPAWN_INVULN_MS: u64 = 2000;

// ── Asteroids / Waves ─────────────────────────────────────────────────────────

/// Asteroids per wave: `WAVE_BASE_COUNT + WAVE_COUNT_PER_WAVE × wave`.
pub const WAVE_BASE_COUNT: u32 = 6;
pub const WAVE_COUNT_PER_WAVE: u32 = 4;

pub const ASTEROID_MIN_RADIUS: f32 = 2.5;
pub const ASTEROID_MAX_RADIUS: f32 = 7.5;

/// Asteroid hit points per unit of radius.
pub const ASTEROID_HP_PER_RADIUS: f32 = 25.0;

/// Initial asteroid velocity component range (±, u/s).
pub const ASTEROID_SPEED_RANGE: f32 = 6.0;

/// Spawn ring around the origin: radius uniform in [MIN, MAX].
pub const SPAWN_RING_MIN: f32 = 60.0;
pub const SPAWN_RING_MAX: f32 = 120.0;

/// Cosmetic spin rate range (±, rad/s).
pub const ASTEROID_SPIN_RANGE: f32 = 0.9;

// ── Drops ─────────────────────────────────────────────────────────────────────

/// Cumulative roll thresholds for the resource drop table:
/// `< COIN` → COIN (65%), `< GORBOY` → GORBOY (25%), otherwise CRYSTAL (10%).
pub const DROP_ROLL_COIN: f32 = 0.65;
pub const DROP_ROLL_GORBOY: f32 = 0.90;

/// Resource drop lifetime (ms).
pub const PICKUP_LIFETIME_MS: u64 = 12_000;

/// Resource drop drift velocity component range (±, u/s).
pub const PICKUP_DRIFT: f32 = 4.0;

/// Ship-to-drop distance below which the drop is collected.
pub const PICKUP_COLLECT_RADIUS: f32 = 5.0;

/// Only asteroids strictly larger than this can drop a power-up.
pub const POWERUP_MIN_SOURCE_RADIUS: f32 = 4.0;

/// Chance that a qualifying asteroid drops a power-up.
pub const POWERUP_DROP_CHANCE: f32 = 0.15;

/// Power-up position jitter from the destruction point (±, per axis).
pub const POWERUP_JITTER: f32 = 2.5;

/// Power-up drift velocity component range (±, u/s).
pub const POWERUP_DRIFT: f32 = 3.0;

/// Power-up lifetime (ms).
pub const POWERUP_LIFETIME_MS: u64 = 10_000;

/// Ship-to-power-up distance below which it is collected.
pub const POWERUP_COLLECT_RADIUS: f32 = 4.0;

// ── Power-up Effects ──────────────────────────────────────────────────────────

pub const X2_DURATION_MS: u64 = 8000;
pub const X4_DURATION_MS: u64 = 6000;

/// Shield added by a SHIELD power-up (capped at `SHIP_MAX_SHIELD`).
pub const SHIELD_PICKUP_AMOUNT: f32 = 50.0;

/// Invulnerability floor granted by a SHIELD power-up (ms).
pub const SHIELD_PICKUP_INVULN_MS: u64 = 2000;

// ── Dock ──────────────────────────────────────────────────────────────────────

pub const DOCK_X: f32 = 50.0;
pub const DOCK_Y: f32 = 50.0;

/// Interaction radius around the dock.
pub const DOCK_RADIUS: f32 = 12.0;

/// Charge rate while holding the dock action in range (points/s).
pub const DOCK_CHARGE_RATE: f32 = 100.0;

/// Drain rate otherwise (points/s).  Faster than the charge on purpose:
/// leaving the dock early costs more than it earned.
pub const DOCK_DRAIN_RATE: f32 = 250.0;

/// Charge at which the bank transaction completes.
pub const DOCK_HOLD_MAX: f32 = 100.0;

// ── Effects ───────────────────────────────────────────────────────────────────

/// Camera shake set by a bullet hit / a ship hit; decays ×SHAKE_DECAY per tick.
pub const SHAKE_BULLET_HIT: f32 = 0.5;
pub const SHAKE_SHIP_HIT: f32 = 2.0;
pub const SHAKE_DECAY: f32 = 0.9;

pub const DEBRIS_COUNT: usize = 12;
pub const DEBRIS_SPEED: f32 = 10.0;
pub const DEBRIS_LIFE: f32 = 1.0;

pub const COLLECT_BURST_COUNT: usize = 8;
pub const COLLECT_BURST_SPEED: f32 = 7.5;
pub const COLLECT_BURST_LIFE: f32 = 0.6;

/// Probability per thrusting tick that the engines emit an exhaust pair.
pub const EXHAUST_CHANCE: f32 = 0.6;
pub const EXHAUST_SPEED: f32 = 5.0;
pub const EXHAUST_LIFE: f32 = 0.5;

/// Engine nozzle offsets in ship space: ±lateral, behind.
pub const EXHAUST_LATERAL: f32 = 0.8;
pub const EXHAUST_BEHIND: f32 = 3.5;

/// Probability per rolling tick of a trail particle.
pub const ROLL_TRAIL_CHANCE: f32 = 0.5;
pub const ROLL_TRAIL_LIFE: f32 = 0.3;

// ── Advisory ──────────────────────────────────────────────────────────────────

/// Seconds after which an outstanding briefing request is abandoned.
pub const ADVISORY_TIMEOUT_SECS: f32 = 8.0;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Left-stick X magnitude below which the gamepad reports no turn.
pub const GAMEPAD_TURN_DEADZONE: f32 = 0.3;

// ── Rendering ─────────────────────────────────────────────────────────────────

pub const HUD_FONT_SIZE: f32 = 16.0;

/// World-to-screen scale used by the debug renderer.
pub const RENDER_SCALE: f32 = 2.6;
